//! SQL course.
//!
//! The authored lesson counter here predates the removal of the old
//! "stored procedures" section and overstates the real count; the catalog
//! corrects it at load time.

use crate::domain::{
    CodeLesson, Course, Lesson, LessonBody, Level, Project, Question, Quiz, Section, Subtopic,
};
use crate::library::AssetLoader;
use crate::schema::ContentError;

pub const ID: &str = "sql";

pub fn course(loader: &dyn AssetLoader) -> Result<Course, ContentError> {
    Ok(Course::new(
        ID,
        "SQL",
        "Query, join and aggregate relational data.",
    )
    .with_icon("database")
    .with_color("teal")
    .with_summary(12, 12)
    .with_section(querying(loader)?)
    .with_section(combining(loader)?)
    .with_section(analytics(loader)?))
}

fn querying(loader: &dyn AssetLoader) -> Result<Section, ContentError> {
    Ok(Section::new("basics", "Querying Data", Level::Basic)
        .with_lesson(Lesson::new(
            "relational-model",
            "The Relational Model",
            "10 min",
            LessonBody::text(
                "A relational database stores data in tables. Each row is a record and \
                 each column has a type. A primary key uniquely identifies a row; a \
                 foreign key references the primary key of another table, which is how \
                 tables relate to each other.",
            ),
        ))
        .with_lesson(Lesson::new(
            "select",
            "SELECT Basics",
            "20 min",
            LessonBody::markdown(loader.load_lesson_body("sql/select-basics.md")?),
        ))
        .with_lesson(Lesson::new(
            "modifying-data",
            "Inserting, Updating and Deleting",
            "20 min",
            LessonBody::subtopics(vec![
                Subtopic::new("INSERT", "Add new rows.").with_code(CodeLesson::new(
                    "Insert a row",
                    "INSERT INTO courses (id, title, level)\nVALUES ('sql', 'SQL', 'basic');",
                    "List the columns explicitly so the statement survives schema changes.",
                )),
                Subtopic::new("UPDATE and DELETE", "Change or remove existing rows.").with_code(
                    CodeLesson::new(
                        "Always filter",
                        "UPDATE courses SET level = 'intermediate' WHERE id = 'sql';\nDELETE FROM enrollments WHERE course_id = 'cobol';",
                        "Without WHERE, UPDATE and DELETE touch every row in the table.",
                    ),
                ),
            ]),
        ))
        .with_quiz(Quiz::new(
            "basics-quiz",
            "Querying Quiz",
            vec![
                Question::new(
                    "q1",
                    "How do you test whether a column has no value?",
                    ["col = NULL", "col IS NULL", "col == NULL", "ISNULL = col"],
                    1,
                ),
                Question::new(
                    "q2",
                    "Which clause is evaluated first?",
                    ["SELECT", "ORDER BY", "FROM", "LIMIT"],
                    2,
                ),
                Question::new(
                    "q3",
                    "What does UPDATE without WHERE do?",
                    [
                        "Nothing",
                        "Updates the first row",
                        "Updates every row",
                        "Raises an error",
                    ],
                    2,
                ),
            ],
        )))
}

fn combining(loader: &dyn AssetLoader) -> Result<Section, ContentError> {
    Ok(Section::new("joins", "Combining Tables", Level::Intermediate)
        .with_lesson(Lesson::new(
            "joins",
            "Joining Tables",
            "30 min",
            LessonBody::markdown(loader.load_lesson_body("sql/joins.md")?),
        ))
        .with_lesson(Lesson::new(
            "aggregation",
            "GROUP BY and Aggregates",
            "25 min",
            LessonBody::subtopics(vec![
                Subtopic::new(
                    "Aggregate functions",
                    "COUNT, SUM, AVG, MIN and MAX collapse many rows into one value.",
                )
                .with_code(CodeLesson::new(
                    "Enrollments per course",
                    "SELECT course_id, COUNT(*) AS students\nFROM enrollments\nGROUP BY course_id;",
                    "Every selected column must be grouped or aggregated.",
                )),
                Subtopic::new("HAVING", "Filter groups after aggregation.").with_code(
                    CodeLesson::new(
                        "Popular courses",
                        "SELECT course_id, COUNT(*) AS students\nFROM enrollments\nGROUP BY course_id\nHAVING COUNT(*) > 100;",
                        "WHERE filters rows before grouping; HAVING filters the groups.",
                    ),
                ),
            ]),
        ))
        .with_lesson(Lesson::new(
            "subqueries",
            "Subqueries",
            "20 min",
            LessonBody::text(
                "A subquery is a SELECT nested inside another statement. It can produce a \
                 single value (WHERE score > (SELECT AVG(score) FROM results)), a list \
                 for IN, or a derived table in FROM. Correlated subqueries reference the \
                 outer row and run once per row, so prefer a join when one fits.",
            ),
        ))
        .with_quiz(Quiz::new(
            "joins-quiz",
            "Combining Tables Quiz",
            vec![
                Question::new(
                    "q1",
                    "Which join keeps every row from the left table?",
                    ["INNER JOIN", "LEFT JOIN", "RIGHT JOIN", "CROSS JOIN"],
                    1,
                ),
                Question::new(
                    "q2",
                    "Which clause filters groups after aggregation?",
                    ["WHERE", "HAVING", "GROUP BY", "ORDER BY"],
                    1,
                ),
            ],
        ))
        .with_project(Project::new(
            "library-report",
            "Library Loans Report",
            "Given books, members and loans tables, write queries for overdue loans, \
             the ten most borrowed books and members who never borrowed anything.",
            "All three queries return correct results against the provided sample data.",
        )))
}

fn analytics(loader: &dyn AssetLoader) -> Result<Section, ContentError> {
    Ok(Section::new("analytics", "Analytics and Performance", Level::Advanced)
        .with_lesson(Lesson::new(
            "window-functions",
            "Window Functions",
            "35 min",
            LessonBody::markdown(loader.load_lesson_body("sql/window-functions.md")?),
        ))
        .with_lesson(Lesson::new(
            "ctes",
            "Common Table Expressions",
            "20 min",
            LessonBody::subtopics(vec![Subtopic::new(
                "WITH clauses",
                "Name intermediate results to keep long queries readable.",
            )
            .with_code(CodeLesson::new(
                "Top student per course",
                "WITH ranked AS (\n  SELECT student_id, course_id,\n         RANK() OVER (PARTITION BY course_id ORDER BY score DESC) AS r\n  FROM results\n)\nSELECT * FROM ranked WHERE r = 1;",
                "Window results cannot be filtered in WHERE directly, so a CTE wraps them.",
            ))]),
        ))
        .with_lesson(Lesson::new(
            "indexes",
            "Indexes",
            "25 min",
            LessonBody::text(
                "An index is a sorted structure that lets the database find rows without \
                 scanning the whole table. Index columns used in WHERE, JOIN and ORDER BY; \
                 every index also slows down writes and takes space. Use EXPLAIN to check \
                 whether a query actually uses the index you created.",
            ),
        ))
        .with_quiz(Quiz::new(
            "analytics-quiz",
            "Analytics Quiz",
            vec![
                Question::new(
                    "q1",
                    "RANK() over scores 90, 90, 80 produces...",
                    ["1, 2, 3", "1, 1, 2", "1, 1, 3"],
                    2,
                ),
                Question::new(
                    "q2",
                    "What is a downside of adding an index?",
                    [
                        "Reads become slower",
                        "Writes become slower",
                        "Queries return fewer rows",
                    ],
                    1,
                ),
            ],
        ))
        .with_project(Project::new(
            "sales-dashboard",
            "Sales Dashboard Queries",
            "Write the queries behind a sales dashboard: monthly revenue with a running \
             total, month-over-month growth using LAG, and the top product per region.",
            "Each query runs in under 100ms on the sample dataset with the indexes you add.",
        )))
}
