//! Content validation.
//!
//! Two entry points:
//! - [`validate_course`] checks a typed [`Course`](crate::domain::Course)
//! - [`validate_document`] checks an untyped JSON/YAML tree before it is
//!   turned into a `Course`
//!
//! Both report every violation with its location in the tree.

pub mod document;
pub mod error;
pub mod validate;

pub use document::{
    course_from_document, normalize_document, validate_document, validate_document_with,
    DocumentRules, ValidationReport, Warning,
};
pub use error::{
    ContentError, DuplicateIdError, EntityKind, InvariantError, NotFoundError, Problem,
    SchemaError, Violation,
};
pub use validate::{check_unique_ids, course_violations, validate_course};
