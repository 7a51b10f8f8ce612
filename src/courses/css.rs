//! CSS course.

use crate::domain::{
    CodeLesson, Course, Lesson, LessonBody, Level, Project, Question, Quiz, Section, Subtopic,
};
use crate::library::AssetLoader;
use crate::schema::ContentError;

pub const ID: &str = "css";

pub fn course(loader: &dyn AssetLoader) -> Result<Course, ContentError> {
    Ok(Course::new(
        ID,
        "CSS",
        "Style and lay out pages, from selectors to responsive grids.",
    )
    .with_icon("palette")
    .with_color("blue")
    .with_summary(9, 10)
    .with_section(fundamentals(loader)?)
    .with_section(layout(loader)?)
    .with_section(responsive()))
}

fn fundamentals(loader: &dyn AssetLoader) -> Result<Section, ContentError> {
    Ok(Section::new("fundamentals", "CSS Fundamentals", Level::Basic)
        .with_lesson(Lesson::new(
            "selectors",
            "Selectors",
            "20 min",
            LessonBody::subtopics(vec![
                Subtopic::new("Type, class and id selectors", "Target elements by tag, class or id.")
                    .with_code(CodeLesson::new(
                        "Basic selectors",
                        "p { line-height: 1.6; }\n.card { padding: 1rem; }\n#hero { min-height: 60vh; }",
                        "Prefer classes for styling; ids are unique per page and hard to override.",
                    )),
                Subtopic::new(
                    "Combinators",
                    "Descendant (space), child (>), adjacent sibling (+) and general sibling (~).",
                )
                .with_code(CodeLesson::new(
                    "Child combinator",
                    "nav > ul { display: flex; }",
                    "Matches only a <ul> that is a direct child of <nav>.",
                )),
                Subtopic::new(
                    "Pseudo-classes",
                    ":hover, :focus-visible, :first-child and :not() select elements by state \
                     or position.",
                ),
            ]),
        ))
        .with_lesson(Lesson::new(
            "cascade",
            "The Cascade and Specificity",
            "25 min",
            LessonBody::markdown(loader.load_lesson_body("css/cascade.md")?),
        ))
        .with_lesson(Lesson::new(
            "box-model",
            "The Box Model",
            "20 min",
            LessonBody::subtopics(vec![Subtopic::new(
                "Content, padding, border, margin",
                "Every element is a rectangle made of four nested areas.",
            )
            .with_code(
                CodeLesson::new(
                    "border-box sizing",
                    "*, *::before, *::after {\n  box-sizing: border-box;\n}",
                    "With border-box, width includes padding and border, which makes sizing \
                     predictable.",
                )
                .with_image("[diagram: box model layers]"),
            )]),
        ))
        .with_quiz(Quiz::new(
            "fundamentals-quiz",
            "Fundamentals Quiz",
            vec![
                Question::new(
                    "q1",
                    "Which selector has the highest specificity?",
                    ["p", ".note", "#intro", "div p"],
                    2,
                ),
                Question::new(
                    "q2",
                    "With box-sizing: border-box, width includes...",
                    [
                        "content only",
                        "content and padding",
                        "content, padding and border",
                        "content, padding, border and margin",
                    ],
                    2,
                ),
                Question::new(
                    "q3",
                    "Which property is inherited by default?",
                    ["margin", "color", "border", "width"],
                    1,
                ),
            ],
        )))
}

fn layout(loader: &dyn AssetLoader) -> Result<Section, ContentError> {
    Ok(Section::new("layout", "Layout", Level::Intermediate)
        .with_lesson(Lesson::new(
            "flexbox",
            "Flexbox",
            "30 min",
            LessonBody::markdown(loader.load_lesson_body("css/flexbox.md")?),
        ))
        .with_lesson(Lesson::new(
            "grid",
            "CSS Grid",
            "35 min",
            LessonBody::subtopics(vec![
                Subtopic::new("Defining tracks", "grid-template-columns and rows define the grid.")
                    .with_code(CodeLesson::new(
                        "Responsive card grid",
                        ".cards {\n  display: grid;\n  grid-template-columns: repeat(auto-fill, minmax(16rem, 1fr));\n  gap: 1rem;\n}",
                        "auto-fill creates as many 16rem+ columns as fit, with no media queries.",
                    )),
                Subtopic::new(
                    "Named areas",
                    "grid-template-areas lets you draw the layout with strings.",
                )
                .with_code(CodeLesson::new(
                    "Page layout",
                    ".page {\n  display: grid;\n  grid-template-areas:\n    \"header header\"\n    \"sidebar main\";\n}\n.page > header { grid-area: header; }",
                    "Each string is a row; repeating a name spans the area across cells.",
                )),
            ]),
        ))
        .with_lesson(Lesson::new(
            "positioning",
            "Positioning",
            "20 min",
            LessonBody::text(
                "position: relative offsets an element from its normal spot and creates a \
                 containing block; absolute removes it from flow and positions it against \
                 the nearest positioned ancestor; fixed positions against the viewport; \
                 sticky behaves as relative until a scroll threshold is crossed.",
            ),
        ))
        .with_quiz(Quiz::new(
            "layout-quiz",
            "Layout Quiz",
            vec![
                Question::new(
                    "q1",
                    "Which property aligns flex items along the main axis?",
                    ["align-items", "justify-content", "align-content", "flex-wrap"],
                    1,
                ),
                Question::new(
                    "q2",
                    "An absolutely positioned element is positioned against...",
                    [
                        "the viewport",
                        "its parent, always",
                        "the nearest positioned ancestor",
                        "the <body>",
                    ],
                    2,
                ),
            ],
        ))
        .with_project(Project::new(
            "dashboard-layout",
            "Dashboard Layout",
            "Recreate an admin dashboard with a fixed sidebar, a sticky header and a \
             grid of statistic cards.",
            "The layout holds together from 320px to 1920px wide without horizontal scrolling.",
        )))
}

fn responsive() -> Section {
    Section::new("responsive", "Responsive Design", Level::Advanced)
        .with_lesson(Lesson::new(
            "media-queries",
            "Media Queries",
            "20 min",
            LessonBody::subtopics(vec![Subtopic::new(
                "Mobile first",
                "Write base styles for small screens, then add min-width queries.",
            )
            .with_code(CodeLesson::new(
                "Min-width breakpoint",
                ".nav { flex-direction: column; }\n@media (min-width: 48rem) {\n  .nav { flex-direction: row; }\n}",
                "The column layout is the default; wider screens opt in to a row.",
            ))]),
        ))
        .with_lesson(Lesson::new(
            "fluid-type",
            "Fluid Typography",
            "15 min",
            LessonBody::text(
                "clamp(min, preferred, max) lets a value scale with the viewport between \
                 two bounds. font-size: clamp(1rem, 0.9rem + 0.5vw, 1.25rem) grows gently \
                 with screen width but never becomes unreadably small or huge.",
            ),
        ))
        .with_lesson(Lesson::new(
            "custom-properties",
            "Custom Properties",
            "20 min",
            LessonBody::text(
                "Custom properties (--brand: #0a66c2) are inherited variables read with \
                 var(--brand). Unlike preprocessor variables they live at runtime, so a \
                 media query or a [data-theme] attribute can change them on the fly.",
            ),
        ))
        .with_project(Project::new(
            "themeable-landing",
            "Themeable Landing Page",
            "Build a responsive landing page whose colours come from custom properties, \
             with a light and a dark theme.",
            "Toggling data-theme on <html> switches every colour, and the page passes \
             WCAG AA contrast in both themes.",
        ))
}
