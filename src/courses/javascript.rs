//! JavaScript course.

use crate::domain::{
    CodeLesson, Course, Lesson, LessonBody, Level, Project, Question, Quiz, Section, Subtopic,
};
use crate::library::AssetLoader;
use crate::schema::ContentError;

pub const ID: &str = "javascript";

pub fn course(loader: &dyn AssetLoader) -> Result<Course, ContentError> {
    Ok(Course::new(
        ID,
        "JavaScript",
        "Make pages interactive: language fundamentals, the DOM and async code.",
    )
    .with_icon("braces")
    .with_color("yellow")
    .with_summary(8, 14)
    .with_section(fundamentals())
    .with_section(functions(loader)?)
    .with_section(asynchronous(loader)?))
}

fn fundamentals() -> Section {
    Section::new("fundamentals", "Language Fundamentals", Level::Basic)
        .with_lesson(Lesson::new(
            "variables",
            "Variables and Types",
            "20 min",
            LessonBody::subtopics(vec![
                Subtopic::new(
                    "let and const",
                    "const for bindings that never change, let for those that do. Avoid var.",
                )
                .with_code(CodeLesson::new(
                    "Declaring variables",
                    "const siteName = \"Coursebook\";\nlet visits = 0;\nvisits += 1;",
                    "Reassigning siteName would throw a TypeError.",
                )),
                Subtopic::new(
                    "Primitive types",
                    "string, number, bigint, boolean, undefined, null and symbol.",
                )
                .with_code(CodeLesson::new(
                    "typeof",
                    "typeof 42;        // \"number\"\ntypeof \"hi\";      // \"string\"\ntypeof null;      // \"object\" (a historical quirk)",
                    "typeof null returning \"object\" is a bug kept for compatibility.",
                )),
            ]),
        ))
        .with_lesson(Lesson::new(
            "equality",
            "Equality and Truthiness",
            "15 min",
            LessonBody::text(
                "=== compares without type coercion and is almost always what you want. \
                 == converts operands first, so 0 == \"\" is true. Falsy values are false, \
                 0, -0, 0n, \"\", null, undefined and NaN; everything else is truthy, \
                 including \"0\" and empty arrays.",
            ),
        ))
        .with_lesson(Lesson::new(
            "dom",
            "Working with the DOM",
            "25 min",
            LessonBody::subtopics(vec![Subtopic::new(
                "Selecting and updating elements",
                "querySelector finds elements; textContent and classList change them.",
            )
            .with_code(CodeLesson::new(
                "Click counter",
                "const button = document.querySelector(\"#count\");\nlet clicks = 0;\nbutton.addEventListener(\"click\", () => {\n  clicks += 1;\n  button.textContent = `Clicked ${clicks} times`;\n});",
                "addEventListener attaches a handler without overwriting existing ones.",
            ))]),
        ))
        .with_quiz(Quiz::new(
            "fundamentals-quiz",
            "Fundamentals Quiz",
            vec![
                Question::new(
                    "q1",
                    "What does typeof null return?",
                    ["\"null\"", "\"undefined\"", "\"object\"", "\"number\""],
                    2,
                ),
                Question::new(
                    "q2",
                    "Which value is truthy?",
                    ["0", "\"\"", "\"0\"", "NaN"],
                    2,
                ),
                Question::new(
                    "q3",
                    "Which keyword declares a binding that cannot be reassigned?",
                    ["var", "let", "const"],
                    2,
                ),
            ],
        ))
}

fn functions(loader: &dyn AssetLoader) -> Result<Section, ContentError> {
    Ok(Section::new("functions", "Functions and Scope", Level::Intermediate)
        .with_lesson(Lesson::new(
            "arrow-functions",
            "Arrow Functions",
            "15 min",
            LessonBody::text(
                "Arrow functions are a shorter syntax, (a, b) => a + b, and they do not \
                 have their own this. That makes them ideal for callbacks inside methods, \
                 and a poor choice for object methods that need this.",
            ),
        ))
        .with_lesson(Lesson::new(
            "closures",
            "Closures",
            "25 min",
            LessonBody::markdown(loader.load_lesson_body("javascript/closures.md")?),
        ))
        .with_quiz(Quiz::new(
            "functions-quiz",
            "Functions Quiz",
            vec![Question::new(
                "q1",
                "for (var i = 0; i < 3; i++) setTimeout(() => console.log(i)); prints...",
                ["0 1 2", "3 3 3", "undefined x3", "an error"],
                1,
            )],
        ))
        .with_project(Project::new(
            "todo-list",
            "To-do List",
            "Build a to-do list that adds, completes and deletes items, storing them \
             in localStorage.",
            "Items survive a page reload and the list works with the keyboard only.",
        )))
}

fn asynchronous(loader: &dyn AssetLoader) -> Result<Section, ContentError> {
    Ok(Section::new("async", "Asynchronous JavaScript", Level::Advanced)
        .with_lesson(Lesson::new(
            "event-loop",
            "The Event Loop",
            "20 min",
            LessonBody::text(
                "JavaScript runs one task at a time. When the call stack empties, the \
                 event loop first drains the microtask queue (promise callbacks) and then \
                 takes the next macrotask (timers, I/O, UI events). That is why a resolved \
                 promise's then runs before a setTimeout(fn, 0).",
            ),
        ))
        .with_lesson(Lesson::new(
            "promises",
            "Promises and async/await",
            "30 min",
            LessonBody::markdown(loader.load_lesson_body("javascript/promises.md")?),
        ))
        .with_lesson(Lesson::new(
            "fetch",
            "Fetching Data",
            "25 min",
            LessonBody::subtopics(vec![Subtopic::new(
                "Handling HTTP errors",
                "fetch only rejects on network failure; check response.ok yourself.",
            )
            .with_code(CodeLesson::new(
                "Checking response.ok",
                "const response = await fetch(url);\nif (!response.ok) {\n  throw new Error(`HTTP ${response.status}`);\n}\nconst data = await response.json();",
                "A 404 or 500 still resolves the promise, so the status check is required.",
            ))]),
        ))
        .with_quiz(Quiz::new(
            "async-quiz",
            "Async Quiz",
            vec![
                Question::new(
                    "q1",
                    "Which runs first after the current script finishes?",
                    ["A setTimeout(fn, 0) callback", "A resolved promise's then callback"],
                    1,
                ),
                Question::new(
                    "q2",
                    "Does fetch reject on a 404 response?",
                    ["Yes", "No"],
                    1,
                ),
            ],
        ))
        .with_project(Project::new(
            "weather-widget",
            "Weather Widget",
            "Fetch a forecast from a public weather API and render the next five days, \
             with loading and error states.",
            "The widget shows a spinner while loading and a readable message when the \
             API is unreachable.",
        )))
}
