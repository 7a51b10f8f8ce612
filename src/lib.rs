//! coursebook - Static course catalog for a learning platform
//!
//! Courses are built in code (or loaded from JSON/YAML documents),
//! validated eagerly and served from an immutable [`Catalog`].
//!
//! # Structure
//!
//! A course is an ordered list of sections. Each section has a difficulty
//! level, ordered lessons, an optional quiz and optional projects. A lesson
//! body is plain text, markdown, or a list of subtopics carrying code
//! examples.
//!
//! # Modules
//!
//! - `domain`: Data structures (Course, Section, Lesson, Quiz, Project)
//! - `schema`: Validation and error types
//! - `courses`: Built-in courses, one module per subject
//! - `library`: Asset loading, course documents and the catalog
//! - `config`: Layered configuration
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # List courses
//! coursebook list
//!
//! # Show a course outline with lesson bodies
//! coursebook show sql --full
//!
//! # Lint course documents before publishing them
//! coursebook validate content/*.course.yaml
//! ```

pub mod cli;
pub mod config;
pub mod courses;
pub mod domain;
pub mod library;
pub mod schema;

// Re-export main types at crate root for convenience
pub use domain::{CodeLesson, Course, Lesson, LessonBody, Level, Project, Question, Quiz, Section, Subtopic};
pub use library::{AssetLoader, Catalog, CatalogExport, EmbeddedAssets, FsAssets, MemoryAssets};
pub use schema::{ContentError, DuplicateIdError, InvariantError, NotFoundError, SchemaError};
