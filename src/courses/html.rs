//! HTML course.

use crate::domain::{
    CodeLesson, Course, Lesson, LessonBody, Level, Project, Question, Quiz, Section, Subtopic,
};
use crate::library::AssetLoader;
use crate::schema::ContentError;

pub const ID: &str = "html";

pub fn course(loader: &dyn AssetLoader) -> Result<Course, ContentError> {
    Ok(Course::new(
        ID,
        "HTML",
        "Structure web pages with semantic, accessible markup.",
    )
    .with_icon("file-code")
    .with_color("orange")
    .with_summary(8, 6)
    .with_section(basics(loader)?)
    .with_section(forms())
    .with_section(accessibility(loader)?))
}

fn basics(loader: &dyn AssetLoader) -> Result<Section, ContentError> {
    Ok(Section::new("basics", "HTML Basics", Level::Basic)
        .with_lesson(Lesson::new(
            "what-is-html",
            "What is HTML?",
            "10 min",
            LessonBody::text(
                "HTML (HyperText Markup Language) describes the structure of a web page. \
                 It is made of elements written as tags, such as <p> for a paragraph or \
                 <a> for a link. Browsers read the markup and build a tree of elements \
                 called the DOM, which CSS styles and JavaScript manipulates.",
            ),
        ))
        .with_lesson(Lesson::new(
            "document-structure",
            "Document Structure",
            "15 min",
            LessonBody::markdown(loader.load_lesson_body("html/document-structure.md")?),
        ))
        .with_lesson(Lesson::new(
            "text-and-links",
            "Text, Links and Images",
            "20 min",
            LessonBody::subtopics(vec![
                Subtopic::new(
                    "Headings and paragraphs",
                    "Use <h1> through <h6> for a heading hierarchy and <p> for paragraphs.",
                )
                .with_code(CodeLesson::new(
                    "Heading hierarchy",
                    "<h1>Recipes</h1>\n<h2>Breakfast</h2>\n<p>Start the day right.</p>",
                    "Only one <h1> per page; lower levels nest beneath it.",
                )),
                Subtopic::new(
                    "Links",
                    "The <a> element links to other pages with its href attribute.",
                )
                .with_code(CodeLesson::new(
                    "External link",
                    "<a href=\"https://developer.mozilla.org\" target=\"_blank\" rel=\"noopener\">MDN</a>",
                    "target=\"_blank\" opens a new tab; rel=\"noopener\" stops the new page \
                     from controlling the original one.",
                )),
                Subtopic::new(
                    "Images",
                    "The <img> element embeds an image. It has no closing tag.",
                )
                .with_code(
                    CodeLesson::new(
                        "Image with alt text",
                        "<img src=\"cat.jpg\" alt=\"A ginger cat asleep on a keyboard\">",
                        "alt text is read aloud by screen readers and shown if the image fails.",
                    )
                    .with_image("[image: rendered cat photo with alt text tooltip]"),
                ),
            ]),
        ))
        .with_quiz(Quiz::new(
            "basics-quiz",
            "HTML Basics Quiz",
            vec![
                Question::new(
                    "q1",
                    "Which element holds the content visitors see?",
                    ["<head>", "<body>", "<meta>", "<title>"],
                    1,
                ),
                Question::new(
                    "q2",
                    "What does the alt attribute on <img> provide?",
                    [
                        "The image file size",
                        "A text alternative for the image",
                        "A caption shown under the image",
                        "The image border",
                    ],
                    1,
                ),
                Question::new(
                    "q3",
                    "What does <!DOCTYPE html> do?",
                    [
                        "Loads the HTML library",
                        "Puts the browser in standards mode",
                        "Declares the page language",
                    ],
                    1,
                ),
            ],
        ))
        .with_project(Project::new(
            "profile-page",
            "Personal Profile Page",
            "Build a one-page profile with a heading, a short bio, a photo and links to \
             three of your favourite sites.",
            "The page validates with the W3C validator and every image has alt text.",
        )))
}

fn forms() -> Section {
    Section::new("forms", "Forms and Input", Level::Intermediate)
        .with_lesson(Lesson::new(
            "form-basics",
            "Form Basics",
            "20 min",
            LessonBody::subtopics(vec![
                Subtopic::new(
                    "The form element",
                    "A <form> groups inputs and submits them to the URL in its action attribute.",
                )
                .with_code(CodeLesson::new(
                    "Sign-up form",
                    "<form action=\"/signup\" method=\"post\">\n  <label for=\"email\">Email</label>\n  <input id=\"email\" name=\"email\" type=\"email\" required>\n  <button type=\"submit\">Sign up</button>\n</form>",
                    "Each label's for attribute matches an input id, so clicking the label \
                     focuses the field.",
                )),
                Subtopic::new(
                    "Input types",
                    "type=\"email\", \"number\", \"date\" and friends give free validation and \
                     better mobile keyboards.",
                ),
            ]),
        ))
        .with_lesson(Lesson::new(
            "validation",
            "Built-in Validation",
            "15 min",
            LessonBody::text(
                "Attributes like required, minlength, maxlength, min, max and pattern let \
                 the browser validate input before the form is submitted. Server-side \
                 validation is still required, because client-side checks are easy to \
                 bypass.",
            ),
        ))
        .with_quiz(Quiz::new(
            "forms-quiz",
            "Forms Quiz",
            vec![
                Question::new(
                    "q1",
                    "How is a <label> associated with an <input>?",
                    [
                        "By placing them on the same line",
                        "By matching the label's for attribute to the input's id",
                        "By giving both the same class",
                    ],
                    1,
                ),
                Question::new(
                    "q2",
                    "Is client-side validation enough on its own?",
                    ["Yes", "No"],
                    1,
                ),
            ],
        ))
}

fn accessibility(loader: &dyn AssetLoader) -> Result<Section, ContentError> {
    Ok(Section::new("accessibility", "Semantics and Accessibility", Level::Advanced)
        .with_lesson(Lesson::new(
            "semantic-elements",
            "Semantic Elements",
            "20 min",
            LessonBody::markdown(loader.load_lesson_body("html/semantic-elements.md")?),
        ))
        .with_lesson(Lesson::new(
            "aria",
            "ARIA Basics",
            "25 min",
            LessonBody::text(
                "ARIA attributes add accessibility information when native HTML cannot \
                 express it, for example aria-expanded on a custom disclosure button. \
                 The first rule of ARIA is not to use it when a native element already \
                 does the job: a <button> beats a <div role=\"button\">.",
            ),
        ))
        .with_lesson(Lesson::new(
            "landmarks",
            "Landmarks and Headings",
            "15 min",
            LessonBody::text(
                "Screen reader users navigate by landmarks and headings. Give each page \
                 one <main>, label repeated <nav> elements with aria-label, and keep the \
                 heading outline free of skipped levels.",
            ),
        ))
        .with_project(Project::new(
            "accessible-blog",
            "Accessible Blog Layout",
            "Mark up a blog home page with header, navigation, a list of article \
             previews and a footer using only semantic elements.",
            "A Lighthouse accessibility audit scores 100 and the page is fully usable \
             with the keyboard alone.",
        )))
}
