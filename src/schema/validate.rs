//! Structural validation of typed course values.
//!
//! Walks the whole tree and collects every violation instead of stopping
//! at the first one, so an author sees all problems in a single pass.

use std::collections::HashSet;

use crate::domain::{CodeLesson, Course, Lesson, LessonBody, Project, Quiz, Section, Subtopic};

use super::error::{DuplicateIdError, EntityKind, InvariantError, SchemaError, Violation};

/// Join a field onto a tree path
pub(crate) fn field_path(path: &str, field: &str) -> String {
    if path.is_empty() {
        field.to_string()
    } else {
        format!("{}.{}", path, field)
    }
}

/// Index into a list on a tree path
pub(crate) fn index_path(path: &str, field: &str, index: usize) -> String {
    format!("{}[{}]", field_path(path, field), index)
}

/// Report every repeated ID in a sibling list.
///
/// Each extra occurrence yields one error, paired with its index.
pub fn check_unique_ids<'a>(
    ids: impl IntoIterator<Item = &'a str>,
    kind: EntityKind,
    scope: &str,
) -> Vec<(usize, DuplicateIdError)> {
    let mut seen = HashSet::new();
    let mut duplicates = Vec::new();

    for (index, id) in ids.into_iter().enumerate() {
        if id.is_empty() {
            continue;
        }
        if !seen.insert(id) {
            duplicates.push((
                index,
                DuplicateIdError {
                    kind,
                    id: id.to_string(),
                    scope: scope.to_string(),
                },
            ));
        }
    }

    duplicates
}

/// Validate a course, returning every violation found
pub fn validate_course(course: &Course) -> Result<(), SchemaError> {
    let violations = course_violations(course);
    if violations.is_empty() {
        Ok(())
    } else {
        Err(SchemaError::new(format!("course `{}`", course.id), violations))
    }
}

/// Collect every violation in a course tree
pub fn course_violations(course: &Course) -> Vec<Violation> {
    let mut out = Vec::new();

    require(&mut out, "", "id", &course.id);
    require(&mut out, "", "title", &course.title);

    let scope = format!("course `{}`", course.id);
    for (index, dup) in check_unique_ids(
        course.sections.iter().map(|s| s.id.as_str()),
        EntityKind::Section,
        &scope,
    ) {
        out.push(Violation::new(
            field_path(&index_path("", "sections", index), "id"),
            dup,
        ));
    }

    for (index, section) in course.sections.iter().enumerate() {
        section_violations(&mut out, &index_path("", "sections", index), section);
    }

    out
}

fn require(out: &mut Vec<Violation>, path: &str, field: &str, value: &str) {
    if value.trim().is_empty() {
        out.push(Violation::missing(path, field));
    }
}

fn section_violations(out: &mut Vec<Violation>, path: &str, section: &Section) {
    require(out, path, "id", &section.id);
    require(out, path, "title", &section.title);

    let scope = format!("section `{}`", section.id);
    for (index, dup) in check_unique_ids(
        section.lessons.iter().map(|l| l.id.as_str()),
        EntityKind::Lesson,
        &scope,
    ) {
        out.push(Violation::new(
            field_path(&index_path(path, "lessons", index), "id"),
            dup,
        ));
    }
    for (index, lesson) in section.lessons.iter().enumerate() {
        lesson_violations(out, &index_path(path, "lessons", index), lesson);
    }

    if let Some(quiz) = &section.quiz {
        quiz_violations(out, &field_path(path, "quiz"), quiz);
    }

    for (index, dup) in check_unique_ids(
        section.projects.iter().map(|p| p.id.as_str()),
        EntityKind::Project,
        &scope,
    ) {
        out.push(Violation::new(
            field_path(&index_path(path, "projects", index), "id"),
            dup,
        ));
    }
    for (index, project) in section.projects.iter().enumerate() {
        project_violations(out, &index_path(path, "projects", index), project);
    }
}

fn lesson_violations(out: &mut Vec<Violation>, path: &str, lesson: &Lesson) {
    require(out, path, "id", &lesson.id);
    require(out, path, "title", &lesson.title);

    let body_path = field_path(path, "body");
    if lesson.body.is_empty() {
        out.push(Violation::new(
            body_path.clone(),
            InvariantError::EmptyBody {
                kind: lesson.body.kind(),
            },
        ));
    }

    if let LessonBody::Subtopics(subtopics) = &lesson.body {
        for (index, subtopic) in subtopics.iter().enumerate() {
            subtopic_violations(out, &index_path(&body_path, "value", index), subtopic);
        }
    }
}

fn subtopic_violations(out: &mut Vec<Violation>, path: &str, subtopic: &Subtopic) {
    require(out, path, "title", &subtopic.title);

    for (index, code) in subtopic.code_lessons.iter().enumerate() {
        code_lesson_violations(out, &index_path(path, "codeLessons", index), code);
    }
}

fn code_lesson_violations(out: &mut Vec<Violation>, path: &str, code: &CodeLesson) {
    require(out, path, "title", &code.title);
    require(out, path, "code", &code.code);
}

fn quiz_violations(out: &mut Vec<Violation>, path: &str, quiz: &Quiz) {
    require(out, path, "id", &quiz.id);
    require(out, path, "title", &quiz.title);

    if quiz.questions.is_empty() {
        out.push(Violation::new(path, InvariantError::EmptyQuiz));
    }

    let scope = format!("quiz `{}`", quiz.id);
    for (index, dup) in check_unique_ids(
        quiz.questions.iter().map(|q| q.id.as_str()),
        EntityKind::Question,
        &scope,
    ) {
        out.push(Violation::new(
            field_path(&index_path(path, "questions", index), "id"),
            dup,
        ));
    }

    for (index, question) in quiz.questions.iter().enumerate() {
        let question_path = index_path(path, "questions", index);
        require(out, &question_path, "id", &question.id);
        require(out, &question_path, "question", &question.question);
        for problem in question.violations() {
            out.push(Violation::new(question_path.clone(), problem));
        }
    }
}

fn project_violations(out: &mut Vec<Violation>, path: &str, project: &Project) {
    require(out, path, "id", &project.id);
    require(out, path, "title", &project.title);
    require(out, path, "checkpoint", &project.checkpoint);
}
