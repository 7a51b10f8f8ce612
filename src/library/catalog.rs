//! Catalog of all available courses.
//!
//! A [`Catalog`] is built once from the per-subject courses (and any
//! course documents in the content directory), validated eagerly and then
//! never mutated. Share it by reference or behind an `Arc`.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::config::ResolvedConfig;
use crate::courses;
use crate::domain::Course;
use crate::schema::{
    check_unique_ids, validate_course, ContentError, DocumentRules, EntityKind, NotFoundError,
};

use super::document::{discover_documents, load_course_document};
use super::loader::AssetLoader;

/// Export envelope format version
pub const CATALOG_FORMAT_VERSION: u32 = 1;

/// Catalog behind an `Arc`, for concurrent readers
pub type SharedCatalog = Arc<Catalog>;

/// Options applied while building a catalog
#[derive(Debug, Clone)]
pub struct CatalogOptions {
    /// Replace author-supplied `total_lessons` with the real count
    pub recompute_totals: bool,

    /// Rules for course documents loaded from disk
    pub rules: DocumentRules,
}

impl Default for CatalogOptions {
    fn default() -> Self {
        Self {
            recompute_totals: true,
            rules: DocumentRules::default(),
        }
    }
}

/// Immutable, ordered set of courses
#[derive(Debug, Clone)]
pub struct Catalog {
    courses: Vec<Course>,
}

impl Catalog {
    /// Build a catalog with default options
    pub fn new(courses: Vec<Course>) -> Result<Self, ContentError> {
        Self::with_options(courses, &CatalogOptions::default())
    }

    /// Build a catalog, validating every course.
    ///
    /// Fails on the first duplicate course id, or with the full
    /// violation list of the first invalid course.
    pub fn with_options(
        mut courses: Vec<Course>,
        options: &CatalogOptions,
    ) -> Result<Self, ContentError> {
        if let Some((_, dup)) = check_unique_ids(
            courses.iter().map(|c| c.id.as_str()),
            EntityKind::Course,
            "catalog",
        )
        .into_iter()
        .next()
        {
            return Err(dup.into());
        }

        for course in &mut courses {
            validate_course(course)?;

            if options.recompute_totals && course.has_lesson_drift() {
                let actual = course.lesson_count() as u32;
                tracing::warn!(
                    course = %course.id,
                    authored = course.total_lessons,
                    actual,
                    "Lesson counter drift, using actual count"
                );
                course.total_lessons = actual;
            }
        }

        tracing::debug!(courses = courses.len(), "Catalog built");
        Ok(Self { courses })
    }

    /// Catalog of the built-in courses
    pub fn builtin(loader: &dyn AssetLoader) -> Result<Self, ContentError> {
        Self::new(courses::all(loader)?)
    }

    /// Built-in courses followed by documents from the content directory
    pub async fn load(
        config: &ResolvedConfig,
        loader: &dyn AssetLoader,
    ) -> Result<Self, ContentError> {
        let options = config.catalog_options();

        let mut all = if config.include_builtin {
            courses::all(loader)?
        } else {
            Vec::new()
        };

        let documents = discover_documents(&config.content, &config.document_pattern)?;
        for path in &documents {
            let (course, _warnings) = load_course_document(path, loader, &options.rules).await?;
            all.push(course);
        }

        tracing::info!(
            builtin = config.include_builtin,
            documents = documents.len(),
            "Loading catalog"
        );

        Self::with_options(all, &options)
    }

    /// Wrap in an `Arc` for shared read-only access
    pub fn into_shared(self) -> SharedCatalog {
        Arc::new(self)
    }

    /// All courses in author-defined order
    pub fn list_courses(&self) -> &[Course] {
        &self.courses
    }

    /// Look up a course by ID
    pub fn get_course(&self, id: &str) -> Result<&Course, NotFoundError> {
        self.courses
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| NotFoundError {
                kind: EntityKind::Course,
                id: id.to_string(),
            })
    }

    /// Course IDs in order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.courses.iter().map(|c| c.id.as_str())
    }

    /// Get the number of courses
    pub fn len(&self) -> usize {
        self.courses.len()
    }

    /// Check if the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// SHA-256 of the canonical JSON of the course list, hex encoded
    pub fn fingerprint(&self) -> Result<String, ContentError> {
        fingerprint_courses(&self.courses)
    }

    /// Export envelope for the whole catalog
    pub fn export(&self) -> Result<CatalogExport, ContentError> {
        CatalogExport::new(self.courses.clone())
    }

    /// Export envelope for a single course
    pub fn export_course(&self, id: &str) -> Result<CatalogExport, ContentError> {
        let course = self.get_course(id)?;
        CatalogExport::new(vec![course.clone()])
    }
}

fn fingerprint_courses(courses: &[Course]) -> Result<String, ContentError> {
    let mut hasher = Sha256::new();
    serde_json::to_writer(&mut hasher, courses)?;
    Ok(hex::encode(hasher.finalize()))
}

/// Serialized form of a catalog handed to the front-end
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogExport {
    /// Export format version
    pub version: u32,

    /// When the export was produced
    pub exported_at: DateTime<Utc>,

    /// Fingerprint of `courses`
    pub fingerprint: String,

    pub courses: Vec<Course>,
}

impl CatalogExport {
    pub fn new(courses: Vec<Course>) -> Result<Self, ContentError> {
        Ok(Self {
            version: CATALOG_FORMAT_VERSION,
            exported_at: Utc::now(),
            fingerprint: fingerprint_courses(&courses)?,
            courses,
        })
    }

    /// Whether `fingerprint` still matches `courses`
    pub fn verify(&self) -> Result<bool, ContentError> {
        Ok(fingerprint_courses(&self.courses)? == self.fingerprint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Lesson, LessonBody, Level, Section};

    fn course(id: &str, lessons: usize) -> Course {
        let mut section = Section::new("basics", "Basics", Level::Basic);
        for i in 0..lessons {
            section = section.with_lesson(Lesson::new(
                format!("l{}", i),
                "Lesson",
                "10 min",
                LessonBody::text("body"),
            ));
        }
        Course::new(id, id.to_uppercase(), "").with_section(section)
    }

    #[test]
    fn test_catalog_list_and_get() {
        let catalog = Catalog::new(vec![course("css", 1), course("sql", 2)]).unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.ids().collect::<Vec<_>>(), vec!["css", "sql"]);
        assert_eq!(catalog.get_course("sql").unwrap().title, "SQL");
    }

    #[test]
    fn test_catalog_get_missing() {
        let catalog = Catalog::new(vec![course("css", 1)]).unwrap();
        let err = catalog.get_course("cobol").unwrap_err();
        assert_eq!(err.kind, EntityKind::Course);
        assert_eq!(err.to_string(), "course not found: cobol");
    }

    #[test]
    fn test_catalog_rejects_duplicate_ids() {
        let err = Catalog::new(vec![course("css", 1), course("css", 2)]).unwrap_err();
        match err {
            ContentError::DuplicateId(dup) => {
                assert_eq!(dup.id, "css");
                assert_eq!(dup.scope, "catalog");
            }
            other => panic!("expected duplicate id, got {:?}", other),
        }
    }

    #[test]
    fn test_catalog_recomputes_totals() {
        let drifted = course("sql", 3).with_summary(10, 4);
        let catalog = Catalog::new(vec![drifted.clone()]).unwrap();
        assert_eq!(catalog.get_course("sql").unwrap().total_lessons, 3);

        let options = CatalogOptions {
            recompute_totals: false,
            ..Default::default()
        };
        let catalog = Catalog::with_options(vec![drifted], &options).unwrap();
        assert_eq!(catalog.get_course("sql").unwrap().total_lessons, 10);
    }

    #[test]
    fn test_fingerprint_stable_and_sensitive() {
        let a = Catalog::new(vec![course("css", 1)]).unwrap();
        let b = Catalog::new(vec![course("css", 1)]).unwrap();
        let c = Catalog::new(vec![course("css", 2)]).unwrap();

        let fa = a.fingerprint().unwrap();
        assert_eq!(fa.len(), 64);
        assert_eq!(fa, b.fingerprint().unwrap());
        assert_ne!(fa, c.fingerprint().unwrap());
    }

    #[test]
    fn test_export_verifies() {
        let catalog = Catalog::new(vec![course("css", 1), course("sql", 1)]).unwrap();
        let mut export = catalog.export().unwrap();
        assert_eq!(export.version, CATALOG_FORMAT_VERSION);
        assert!(export.verify().unwrap());

        export.courses.pop();
        assert!(!export.verify().unwrap());

        let single = catalog.export_course("sql").unwrap();
        assert_eq!(single.courses.len(), 1);
        assert!(catalog.export_course("nope").is_err());
    }
}
