//! Error taxonomy for course content.
//!
//! Content is static and known in full at startup, so every error here is
//! an authoring error detected while building or validating the catalog.

use std::path::PathBuf;

use thiserror::Error;

/// Kind of entity an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Course,
    Section,
    Lesson,
    Quiz,
    Question,
    Project,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EntityKind::Course => "course",
            EntityKind::Section => "section",
            EntityKind::Lesson => "lesson",
            EntityKind::Quiz => "quiz",
            EntityKind::Question => "question",
            EntityKind::Project => "project",
        };
        write!(f, "{}", name)
    }
}

/// A value breaks a content invariant
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantError {
    #[error("correctAnswer {index} is out of range for {len} option(s)")]
    CorrectAnswerOutOfRange { index: usize, len: usize },

    #[error("question has {len} option(s), at least {min} required")]
    TooFewOptions { len: usize, min: usize },

    #[error("unknown level `{value}`, expected one of: basic, intermediate, advanced")]
    UnknownLevel { value: String },

    #[error("{kind} body is empty")]
    EmptyBody { kind: &'static str },

    #[error("quiz has no questions")]
    EmptyQuiz,
}

/// Two sibling entities share an identifier
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("duplicate {kind} id `{id}` in {scope}")]
pub struct DuplicateIdError {
    pub kind: EntityKind,
    pub id: String,

    /// Human-readable owner of the sibling list ("course `sql`", "catalog")
    pub scope: String,
}

/// A lookup by identifier found no match
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} not found: {id}")]
pub struct NotFoundError {
    pub kind: EntityKind,
    pub id: String,
}

/// What is wrong at a given location
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Problem {
    #[error("missing required field `{field}`")]
    MissingField { field: String },

    #[error("expected {expected}, found {found}")]
    WrongType {
        expected: &'static str,
        found: &'static str,
    },

    #[error("unknown variant `{value}`, expected one of: {}", .allowed.join(", "))]
    InvalidVariant {
        value: String,
        allowed: &'static [&'static str],
    },

    #[error("{value} is out of range, at most {max} allowed")]
    OutOfRange { value: u64, max: u64 },

    #[error("asset `{asset}` could not be loaded: {reason}")]
    MissingAsset { asset: String, reason: String },

    #[error(transparent)]
    Invariant(#[from] InvariantError),

    #[error(transparent)]
    DuplicateId(#[from] DuplicateIdError),
}

/// A problem and where it was found
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Location in the course tree, e.g. `sections[1].quiz.questions[0]`
    pub path: String,
    pub problem: Problem,
}

impl Violation {
    pub fn new(path: impl Into<String>, problem: impl Into<Problem>) -> Self {
        Self {
            path: path.into(),
            problem: problem.into(),
        }
    }

    pub fn missing(path: impl Into<String>, field: impl Into<String>) -> Self {
        Self::new(path, Problem::MissingField { field: field.into() })
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.problem)
        } else {
            write!(f, "{}: {}", self.path, self.problem)
        }
    }
}

/// Content violates the shape contract.
///
/// Carries every violation found, not just the first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaError {
    /// Subject of the validation (course id or document path)
    pub subject: String,
    pub violations: Vec<Violation>,
}

impl SchemaError {
    pub fn new(subject: impl Into<String>, violations: Vec<Violation>) -> Self {
        Self {
            subject: subject.into(),
            violations,
        }
    }

    /// Number of violations
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Whether there are no violations
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Invariant violations only
    pub fn invariants(&self) -> impl Iterator<Item = &InvariantError> {
        self.violations.iter().filter_map(|v| match &v.problem {
            Problem::Invariant(e) => Some(e),
            _ => None,
        })
    }

    /// Duplicate-id violations only
    pub fn duplicates(&self) -> impl Iterator<Item = &DuplicateIdError> {
        self.violations.iter().filter_map(|v| match &v.problem {
            Problem::DuplicateId(e) => Some(e),
            _ => None,
        })
    }
}

impl std::fmt::Display for SchemaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} has {} schema violation(s)",
            self.subject,
            self.violations.len()
        )?;
        for violation in &self.violations {
            write!(f, "\n  - {}", violation)?;
        }
        Ok(())
    }
}

impl std::error::Error for SchemaError {}

/// Top-level error for loading and querying content
#[derive(Debug, Error)]
pub enum ContentError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Invariant(#[from] InvariantError),

    #[error(transparent)]
    DuplicateId(#[from] DuplicateIdError),

    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    #[error("Failed to load asset {path}: {source}")]
    Asset {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Asset path rejected: {path} ({reason})")]
    AssetPath { path: String, reason: &'static str },

    #[error("Failed to load course document {}: {source}", .path.display())]
    Document {
        path: PathBuf,
        #[source]
        source: Box<ContentError>,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl ContentError {
    /// Attach the document path to an error raised while loading it
    pub fn in_document(self, path: impl Into<PathBuf>) -> Self {
        ContentError::Document {
            path: path.into(),
            source: Box::new(self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_error_lists_every_violation() {
        let err = SchemaError::new(
            "course `sql`",
            vec![
                Violation::missing("sections[0]", "title"),
                Violation::new(
                    "sections[0].quiz.questions[1]",
                    InvariantError::CorrectAnswerOutOfRange { index: 5, len: 4 },
                ),
            ],
        );

        let rendered = err.to_string();
        assert!(rendered.starts_with("course `sql` has 2 schema violation(s)"));
        assert!(rendered.contains("sections[0]: missing required field `title`"));
        assert!(rendered.contains("correctAnswer 5 is out of range for 4 option(s)"));
        assert_eq!(err.invariants().count(), 1);
        assert_eq!(err.duplicates().count(), 0);
    }

    #[test]
    fn test_invalid_variant_message() {
        let problem = Problem::InvalidVariant {
            value: "video".to_string(),
            allowed: &["text", "markdown", "subtopics"],
        };
        assert_eq!(
            problem.to_string(),
            "unknown variant `video`, expected one of: text, markdown, subtopics"
        );
    }

    #[test]
    fn test_duplicate_id_message() {
        let err = DuplicateIdError {
            kind: EntityKind::Section,
            id: "basics".to_string(),
            scope: "course `css`".to_string(),
        };
        assert_eq!(err.to_string(), "duplicate section id `basics` in course `css`");
    }
}
