//! Validation of untyped course documents.
//!
//! Course documents arrive as JSON or YAML and are checked as a raw
//! [`serde_json::Value`] tree before the typed [`Course`] is built. This
//! catches shape problems (missing fields, wrong types, unknown variant
//! tags) together with the content invariants in one report.

use serde_json::{Map, Value};

use crate::domain::{Course, LessonBody, Level, MIN_OPTIONS};

use super::error::{
    ContentError, EntityKind, InvariantError, Problem, SchemaError, Violation,
};
use super::validate::{check_unique_ids, field_path, index_path};

/// Rules applied to a document
#[derive(Debug, Clone, Default)]
pub struct DocumentRules {
    /// Reject the deprecated `medium` level instead of warning
    pub strict_levels: bool,
}

/// A non-fatal finding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub path: String,
    pub message: String,
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Outcome of validating a document
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub violations: Vec<Violation>,
    pub warnings: Vec<Warning>,
}

impl ValidationReport {
    /// True when no violations were found (warnings allowed)
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Turn the report into a result, keeping warnings on success
    pub fn into_result(self, subject: &str) -> Result<Vec<Warning>, SchemaError> {
        if self.violations.is_empty() {
            Ok(self.warnings)
        } else {
            Err(SchemaError::new(subject, self.violations))
        }
    }
}

/// Validate a course document with default rules
pub fn validate_document(value: &Value) -> ValidationReport {
    validate_document_with(value, &DocumentRules::default())
}

/// Validate a course document
pub fn validate_document_with(value: &Value, rules: &DocumentRules) -> ValidationReport {
    let mut walker = Walker {
        rules,
        report: ValidationReport::default(),
    };
    walker.course(value);
    walker.report
}

/// Validate a document and build the typed course from it
pub fn course_from_document(
    mut value: Value,
    rules: &DocumentRules,
    subject: &str,
) -> Result<(Course, Vec<Warning>), ContentError> {
    let warnings = validate_document_with(&value, rules).into_result(subject)?;
    normalize_document(&mut value);
    let course: Course = serde_json::from_value(value)?;
    Ok((course, warnings))
}

/// Rewrite a validated document into the exact shape the typed model reads.
///
/// Level names become their canonical spelling and `null` members are
/// dropped so optional fields fall back to their defaults.
pub fn normalize_document(value: &mut Value) {
    drop_nulls(value);

    let Some(sections) = value.get_mut("sections").and_then(Value::as_array_mut) else {
        return;
    };
    for section in sections {
        let Some(level) = section.get_mut("level") else {
            continue;
        };
        if let Some(parsed) = level.as_str().and_then(|name| Level::parse(name).ok()) {
            *level = Value::String(parsed.as_str().to_string());
        }
    }
}

fn drop_nulls(value: &mut Value) {
    match value {
        Value::Object(map) => {
            map.retain(|_, member| !member.is_null());
            map.values_mut().for_each(drop_nulls);
        }
        Value::Array(items) => items.iter_mut().for_each(drop_nulls),
        _ => {}
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

struct Walker<'r> {
    rules: &'r DocumentRules,
    report: ValidationReport,
}

impl<'r> Walker<'r> {
    fn violation(&mut self, path: impl Into<String>, problem: impl Into<Problem>) {
        self.report.violations.push(Violation::new(path, problem));
    }

    fn wrong_type(&mut self, path: impl Into<String>, expected: &'static str, found: &Value) {
        self.violation(
            path,
            Problem::WrongType {
                expected,
                found: type_name(found),
            },
        );
    }

    fn object<'v>(&mut self, path: &str, value: &'v Value) -> Option<&'v Map<String, Value>> {
        match value {
            Value::Object(map) => Some(map),
            other => {
                self.wrong_type(path, "object", other);
                None
            }
        }
    }

    /// Required non-empty string
    fn text<'v>(&mut self, obj: &'v Map<String, Value>, path: &str, field: &str) -> Option<&'v str> {
        match obj.get(field) {
            None | Some(Value::Null) => {
                self.violation(path, Problem::MissingField { field: field.into() });
                None
            }
            Some(Value::String(s)) if s.trim().is_empty() => {
                self.violation(path, Problem::MissingField { field: field.into() });
                None
            }
            Some(Value::String(s)) => Some(s.as_str()),
            Some(other) => {
                self.wrong_type(field_path(path, field), "string", other);
                None
            }
        }
    }

    /// Required string that may be empty
    fn string<'v>(&mut self, obj: &'v Map<String, Value>, path: &str, field: &str) -> Option<&'v str> {
        match obj.get(field) {
            None | Some(Value::Null) => {
                self.violation(path, Problem::MissingField { field: field.into() });
                None
            }
            Some(Value::String(s)) => Some(s.as_str()),
            Some(other) => {
                self.wrong_type(field_path(path, field), "string", other);
                None
            }
        }
    }

    fn optional_string(&mut self, obj: &Map<String, Value>, path: &str, field: &str) {
        match obj.get(field) {
            None | Some(Value::Null) | Some(Value::String(_)) => {}
            Some(other) => self.wrong_type(field_path(path, field), "string", other),
        }
    }

    fn array<'v>(&mut self, obj: &'v Map<String, Value>, path: &str, field: &str) -> Option<&'v Vec<Value>> {
        match obj.get(field) {
            None | Some(Value::Null) => {
                self.violation(path, Problem::MissingField { field: field.into() });
                None
            }
            Some(other) => self.array_value(&field_path(path, field), other),
        }
    }

    fn array_value<'v>(&mut self, path: &str, value: &'v Value) -> Option<&'v Vec<Value>> {
        match value {
            Value::Array(items) => Some(items),
            other => {
                self.wrong_type(path, "array", other);
                None
            }
        }
    }

    /// Non-negative integer no larger than `max`
    fn index(
        &mut self,
        obj: &Map<String, Value>,
        path: &str,
        field: &str,
        required: bool,
        max: u64,
    ) -> Option<u64> {
        match obj.get(field) {
            None | Some(Value::Null) => {
                if required {
                    self.violation(path, Problem::MissingField { field: field.into() });
                }
                None
            }
            Some(Value::Number(n)) if n.is_u64() => {
                let value = n.as_u64()?;
                if value > max {
                    self.violation(field_path(path, field), Problem::OutOfRange { value, max });
                    return None;
                }
                Some(value)
            }
            Some(other) => {
                self.wrong_type(field_path(path, field), "non-negative integer", other);
                None
            }
        }
    }

    /// Duplicate check over a sibling list of objects with string ids
    fn unique_ids(&mut self, path: &str, field: &str, items: &[Value], kind: EntityKind, scope: String) {
        let ids = items.iter().map(|item| {
            item.get("id").and_then(Value::as_str).unwrap_or_default()
        });
        for (index, dup) in check_unique_ids(ids, kind, &scope) {
            self.violation(field_path(&index_path(path, field, index), "id"), dup);
        }
    }

    fn course(&mut self, value: &Value) {
        let Some(obj) = self.object("", value) else {
            return;
        };

        let id = self.text(obj, "", "id").unwrap_or_default().to_string();
        self.text(obj, "", "title");
        self.optional_string(obj, "", "description");
        self.optional_string(obj, "", "icon");
        self.optional_string(obj, "", "color");
        self.index(obj, "", "totalLessons", false, u64::from(u32::MAX));
        self.index(obj, "", "estimatedHours", true, u64::from(u32::MAX));

        if let Some(sections) = self.array(obj, "", "sections") {
            self.unique_ids("", "sections", sections, EntityKind::Section, format!("course `{}`", id));
            for (i, section) in sections.iter().enumerate() {
                self.section(&index_path("", "sections", i), section);
            }
        }
    }

    fn section(&mut self, path: &str, value: &Value) {
        let Some(obj) = self.object(path, value) else {
            return;
        };

        let id = self.text(obj, path, "id").unwrap_or_default().to_string();
        self.text(obj, path, "title");

        if let Some(level) = self.text(obj, path, "level") {
            let level_path = field_path(path, "level");
            match Level::parse(level) {
                Err(e) => self.violation(level_path, e),
                Ok(_) if Level::is_deprecated(level) => {
                    if self.rules.strict_levels {
                        self.violation(
                            level_path,
                            Problem::InvalidVariant {
                                value: level.to_string(),
                                allowed: Level::NAMES,
                            },
                        );
                    } else {
                        self.report.warnings.push(Warning {
                            path: level_path,
                            message: format!(
                                "level `{}` is deprecated, use `intermediate`",
                                level
                            ),
                        });
                    }
                }
                Ok(parsed) if level != parsed.as_str() => {
                    if self.rules.strict_levels {
                        self.violation(
                            level_path,
                            Problem::InvalidVariant {
                                value: level.to_string(),
                                allowed: Level::NAMES,
                            },
                        );
                    } else {
                        self.report.warnings.push(Warning {
                            path: level_path,
                            message: format!("level `{}` is not canonical, use `{}`", level, parsed),
                        });
                    }
                }
                Ok(_) => {}
            }
        }

        let scope = format!("section `{}`", id);
        if let Some(lessons) = self.array(obj, path, "lessons") {
            self.unique_ids(path, "lessons", lessons, EntityKind::Lesson, scope.clone());
            for (i, lesson) in lessons.iter().enumerate() {
                self.lesson(&index_path(path, "lessons", i), lesson);
            }
        }

        match obj.get("quiz") {
            None | Some(Value::Null) => {}
            Some(quiz) => self.quiz(&field_path(path, "quiz"), quiz),
        }

        match obj.get("projects") {
            None | Some(Value::Null) => {}
            Some(projects) => {
                let projects_path = field_path(path, "projects");
                if let Some(projects) = self.array_value(&projects_path, projects) {
                    self.unique_ids(path, "projects", projects, EntityKind::Project, scope);
                    for (i, project) in projects.iter().enumerate() {
                        self.project(&index_path(path, "projects", i), project);
                    }
                }
            }
        }
    }

    fn lesson(&mut self, path: &str, value: &Value) {
        let Some(obj) = self.object(path, value) else {
            return;
        };

        self.text(obj, path, "id");
        self.text(obj, path, "title");
        self.string(obj, path, "duration");

        let body_path = field_path(path, "body");
        let Some(body) = obj.get("body") else {
            self.violation(path, Problem::MissingField { field: "body".into() });
            return;
        };
        let Some(body) = self.object(&body_path, body) else {
            return;
        };
        let Some(kind) = self.text(body, &body_path, "kind") else {
            return;
        };

        match kind {
            "text" | "markdown" => {
                if let Some(content) = self.string(body, &body_path, "value") {
                    if content.trim().is_empty() {
                        let kind = if kind == "text" { "text" } else { "markdown" };
                        self.violation(body_path, InvariantError::EmptyBody { kind });
                    }
                }
            }
            "subtopics" => {
                if let Some(subtopics) = self.array(body, &body_path, "value") {
                    if subtopics.is_empty() {
                        self.violation(
                            body_path.clone(),
                            InvariantError::EmptyBody { kind: "subtopics" },
                        );
                    }
                    for (i, subtopic) in subtopics.iter().enumerate() {
                        self.subtopic(&index_path(&body_path, "value", i), subtopic);
                    }
                }
            }
            other => self.violation(
                field_path(&body_path, "kind"),
                Problem::InvalidVariant {
                    value: other.to_string(),
                    allowed: LessonBody::KINDS,
                },
            ),
        }
    }

    fn subtopic(&mut self, path: &str, value: &Value) {
        let Some(obj) = self.object(path, value) else {
            return;
        };

        self.text(obj, path, "title");
        self.string(obj, path, "description");

        match obj.get("codeLessons") {
            None | Some(Value::Null) => {}
            Some(codes) => {
                let codes_path = field_path(path, "codeLessons");
                if let Some(codes) = self.array_value(&codes_path, codes) {
                    for (i, code) in codes.iter().enumerate() {
                        self.code_lesson(&index_path(path, "codeLessons", i), code);
                    }
                }
            }
        }
    }

    fn code_lesson(&mut self, path: &str, value: &Value) {
        let Some(obj) = self.object(path, value) else {
            return;
        };

        self.text(obj, path, "title");
        self.text(obj, path, "code");
        self.string(obj, path, "explanation");
        self.optional_string(obj, path, "image");
    }

    fn quiz(&mut self, path: &str, value: &Value) {
        let Some(obj) = self.object(path, value) else {
            return;
        };

        let id = self.text(obj, path, "id").unwrap_or_default().to_string();
        self.text(obj, path, "title");

        let Some(questions) = self.array(obj, path, "questions") else {
            return;
        };
        if questions.is_empty() {
            self.violation(path, InvariantError::EmptyQuiz);
        }
        self.unique_ids(path, "questions", questions, EntityKind::Question, format!("quiz `{}`", id));
        for (i, question) in questions.iter().enumerate() {
            self.question(&index_path(path, "questions", i), question);
        }
    }

    fn question(&mut self, path: &str, value: &Value) {
        let Some(obj) = self.object(path, value) else {
            return;
        };

        self.text(obj, path, "id");
        self.text(obj, path, "question");

        let options_len = self.array(obj, path, "options").map(|options| {
            for (i, option) in options.iter().enumerate() {
                if !option.is_string() {
                    self.wrong_type(index_path(path, "options", i), "string", option);
                }
            }
            options.len()
        });
        let correct = self.index(obj, path, "correctAnswer", true, usize::MAX as u64);

        if let Some(len) = options_len {
            if len < MIN_OPTIONS {
                self.violation(path, InvariantError::TooFewOptions { len, min: MIN_OPTIONS });
            }
            if let Some(index) = correct {
                if index >= len as u64 {
                    self.violation(
                        path,
                        InvariantError::CorrectAnswerOutOfRange {
                            index: index as usize,
                            len,
                        },
                    );
                }
            }
        }
    }

    fn project(&mut self, path: &str, value: &Value) {
        let Some(obj) = self.object(path, value) else {
            return;
        };

        self.text(obj, path, "id");
        self.text(obj, path, "title");
        self.string(obj, path, "description");
        self.text(obj, path, "checkpoint");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_document() -> Value {
        json!({
            "id": "sql",
            "title": "SQL",
            "description": "Query relational data",
            "icon": "database",
            "color": "blue",
            "totalLessons": 1,
            "estimatedHours": 2,
            "sections": [{
                "id": "basics",
                "title": "Basics",
                "level": "basic",
                "lessons": [{
                    "id": "select",
                    "title": "SELECT",
                    "duration": "10 min",
                    "body": { "kind": "text", "value": "SELECT picks columns." }
                }],
                "quiz": {
                    "id": "basics-quiz",
                    "title": "Basics Quiz",
                    "questions": [{
                        "id": "q1",
                        "question": "Which keyword reads rows?",
                        "options": ["SELECT", "DROP"],
                        "correctAnswer": 0
                    }]
                }
            }]
        })
    }

    #[test]
    fn test_valid_document() {
        let report = validate_document(&valid_document());
        assert!(report.is_valid(), "{:?}", report.violations);
        assert!(report.warnings.is_empty());

        let (course, _) =
            course_from_document(valid_document(), &DocumentRules::default(), "sql.json").unwrap();
        assert_eq!(course.sections[0].lessons[0].id, "select");
    }

    #[test]
    fn test_reports_every_problem() {
        let mut doc = valid_document();
        doc["sections"][0].as_object_mut().unwrap().remove("title");
        doc["sections"][0]["lessons"][0]["body"]["kind"] = json!("video");
        doc["sections"][0]["quiz"]["questions"][0]["correctAnswer"] = json!(5);

        let report = validate_document(&doc);
        assert_eq!(report.violations.len(), 3);
        assert!(matches!(
            report.violations[0].problem,
            Problem::MissingField { ref field } if field == "title"
        ));
        assert_eq!(report.violations[1].path, "sections[0].lessons[0].body.kind");
        assert!(matches!(
            report.violations[2].problem,
            Problem::Invariant(InvariantError::CorrectAnswerOutOfRange { index: 5, len: 2 })
        ));
    }

    #[test]
    fn test_wrong_types() {
        let mut doc = valid_document();
        doc["estimatedHours"] = json!("two");
        doc["sections"][0]["lessons"] = json!({ "id": "oops" });

        let report = validate_document(&doc);
        let paths: Vec<_> = report.violations.iter().map(|v| v.path.as_str()).collect();
        assert_eq!(paths, vec!["estimatedHours", "sections[0].lessons"]);
        assert!(matches!(
            report.violations[0].problem,
            Problem::WrongType { expected: "non-negative integer", found: "string" }
        ));
    }

    #[test]
    fn test_medium_level_warns_or_fails() {
        let mut doc = valid_document();
        doc["sections"][0]["level"] = json!("medium");

        let report = validate_document(&doc);
        assert!(report.is_valid());
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.warnings[0].path, "sections[0].level");

        let strict = DocumentRules { strict_levels: true };
        let report = validate_document_with(&doc, &strict);
        assert_eq!(report.violations.len(), 1);
    }

    #[test]
    fn test_unknown_level() {
        let mut doc = valid_document();
        doc["sections"][0]["level"] = json!("expert");

        let err = validate_document(&doc).into_result("doc").unwrap_err();
        assert_eq!(err.invariants().count(), 1);
    }

    #[test]
    fn test_duplicate_section_ids_in_document() {
        let mut doc = valid_document();
        let section = doc["sections"][0].clone();
        doc["sections"].as_array_mut().unwrap().push(section);

        let err = validate_document(&doc).into_result("doc").unwrap_err();
        let dups: Vec<_> = err.duplicates().collect();
        assert_eq!(dups.len(), 1);
        assert_eq!(dups[0].id, "basics");
        assert_eq!(err.violations[0].path, "sections[1].id");
    }

    #[test]
    fn test_root_must_be_object() {
        let report = validate_document(&json!([1, 2]));
        assert_eq!(report.violations.len(), 1);
        assert!(matches!(
            report.violations[0].problem,
            Problem::WrongType { expected: "object", found: "array" }
        ));
    }

    #[test]
    fn test_normalize_document() {
        let mut doc = valid_document();
        doc["icon"] = json!(null);
        doc["sections"][0]["level"] = json!(" Intermediate ");
        doc["sections"][0]["quiz"] = json!(null);

        normalize_document(&mut doc);
        assert!(doc.get("icon").is_none());
        assert!(doc["sections"][0].get("quiz").is_none());
        assert_eq!(doc["sections"][0]["level"], "intermediate");
    }
}
