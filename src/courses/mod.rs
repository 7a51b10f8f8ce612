//! Built-in courses.
//!
//! Each subject lives in its own module and exposes `ID` plus a
//! `course(loader)` constructor. Long lesson bodies are markdown assets
//! fetched through the loader so they can be overridden on disk.

pub mod css;
pub mod git;
pub mod html;
pub mod javascript;
pub mod sql;

use crate::domain::Course;
use crate::library::AssetLoader;
use crate::schema::ContentError;

/// Built-in course IDs in catalog order
pub const ORDER: &[&str] = &[html::ID, css::ID, javascript::ID, sql::ID, git::ID];

/// Build every built-in course, in [`ORDER`]
pub fn all(loader: &dyn AssetLoader) -> Result<Vec<Course>, ContentError> {
    Ok(vec![
        html::course(loader)?,
        css::course(loader)?,
        javascript::course(loader)?,
        sql::course(loader)?,
        git::course(loader)?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::{EmbeddedAssets, MemoryAssets};
    use crate::schema::validate_course;

    #[test]
    fn test_all_follows_order() {
        let courses = all(&EmbeddedAssets).unwrap();
        let ids: Vec<_> = courses.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ORDER);
    }

    #[test]
    fn test_builtin_courses_are_valid() {
        for course in all(&EmbeddedAssets).unwrap() {
            validate_course(&course).unwrap();
            assert!(course.estimated_hours > 0, "{} has no hours", course.id);
        }
    }

    #[test]
    fn test_markdown_bodies_come_from_loader() {
        let course = html::course(&EmbeddedAssets).unwrap();
        let lesson = course
            .section("basics")
            .and_then(|s| s.lesson("document-structure"))
            .unwrap();
        assert_eq!(lesson.body.kind(), "markdown");
        assert!(!lesson.body.is_empty());
    }

    #[test]
    fn test_missing_asset_fails_construction() {
        let err = sql::course(&MemoryAssets::new()).unwrap_err();
        assert!(matches!(err, ContentError::Asset { ref path, .. } if path == "sql/select-basics.md"));
    }

    #[test]
    fn test_sql_authored_total_is_stale() {
        let course = sql::course(&EmbeddedAssets).unwrap();
        assert_eq!(course.sections.len(), 3);
        assert!(course.has_lesson_drift());
        assert_eq!(course.lesson_count(), 9);
    }
}
