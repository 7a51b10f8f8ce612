//! Course documents stored as JSON or YAML files.
//!
//! A document is one course in the exchange format. Lesson bodies may point
//! at a markdown asset instead of inlining it:
//!
//! ```yaml
//! body:
//!   kind: markdown_file
//!   value: sql/joins.md
//! ```
//!
//! Such bodies are resolved through an [`AssetLoader`] into ordinary
//! `markdown` bodies before validation.

use std::path::{Path, PathBuf};

use serde_json::Value;
use tokio::fs;

use crate::domain::Course;
use crate::schema::{
    course_from_document, validate_document_with, ContentError, DocumentRules, Problem,
    SchemaError, ValidationReport, Violation, Warning,
};

use super::loader::AssetLoader;

/// Body kind that references an asset file
pub const MARKDOWN_FILE_KIND: &str = "markdown_file";

/// On-disk document format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// Pick the format from a file extension (`.json`, `.yaml`, `.yml`)
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_lowercase().as_str() {
            "json" => Some(DocumentFormat::Json),
            "yaml" | "yml" => Some(DocumentFormat::Yaml),
            _ => None,
        }
    }
}

/// Parse document text into an untyped tree
pub fn parse_document(text: &str, format: DocumentFormat) -> Result<Value, ContentError> {
    match format {
        DocumentFormat::Json => Ok(serde_json::from_str(text)?),
        DocumentFormat::Yaml => Ok(serde_yaml::from_str(text)?),
    }
}

/// Replace every `markdown_file` body with the asset's markdown.
///
/// Returns one violation per asset that could not be loaded; the
/// offending bodies are left untouched.
pub fn resolve_assets(document: &mut Value, loader: &dyn AssetLoader) -> Vec<Violation> {
    let mut violations = Vec::new();

    let Some(sections) = document.get_mut("sections").and_then(Value::as_array_mut) else {
        return violations;
    };

    for (s, section) in sections.iter_mut().enumerate() {
        let Some(lessons) = section.get_mut("lessons").and_then(Value::as_array_mut) else {
            continue;
        };

        for (l, lesson) in lessons.iter_mut().enumerate() {
            let Some(body) = lesson.get_mut("body").and_then(Value::as_object_mut) else {
                continue;
            };
            if body.get("kind").and_then(Value::as_str) != Some(MARKDOWN_FILE_KIND) {
                continue;
            }

            let path = format!("sections[{}].lessons[{}].body", s, l);
            let Some(asset) = body.get("value").and_then(Value::as_str).map(str::to_string) else {
                violations.push(Violation::missing(path, "value"));
                continue;
            };

            match loader.load_lesson_body(&asset) {
                Ok(markdown) => {
                    body.insert("kind".to_string(), Value::String("markdown".to_string()));
                    body.insert("value".to_string(), Value::String(markdown));
                }
                Err(e) => violations.push(Violation::new(
                    path,
                    Problem::MissingAsset {
                        asset,
                        reason: e.to_string(),
                    },
                )),
            }
        }
    }

    violations
}

/// Resolve assets and validate a parsed document, without building it
pub fn check_document(
    mut document: Value,
    loader: &dyn AssetLoader,
    rules: &DocumentRules,
) -> ValidationReport {
    let asset_violations = resolve_assets(&mut document, loader);
    let mut report = validate_document_with(&document, rules);
    report.violations = merge_violations(asset_violations, report.violations);
    report
}

/// Asset violations first; drop later findings on the same unresolved body
fn merge_violations(assets: Vec<Violation>, rest: Vec<Violation>) -> Vec<Violation> {
    let mut merged = Vec::with_capacity(assets.len() + rest.len());
    let unresolved: Vec<String> = assets.iter().map(|v| v.path.clone()).collect();
    merged.extend(assets);
    merged.extend(
        rest.into_iter()
            .filter(|v| !unresolved.iter().any(|body| v.path.starts_with(body.as_str()))),
    );
    merged
}

/// Build a course from document text
pub fn course_from_text(
    text: &str,
    format: DocumentFormat,
    loader: &dyn AssetLoader,
    rules: &DocumentRules,
    subject: &str,
) -> Result<(Course, Vec<Warning>), ContentError> {
    let mut document = parse_document(text, format)?;

    let violations = resolve_assets(&mut document, loader);
    if !violations.is_empty() {
        // Report asset problems together with everything else
        let rest = validate_document_with(&document, rules).violations;
        return Err(SchemaError::new(subject, merge_violations(violations, rest)).into());
    }

    course_from_document(document, rules, subject)
}

/// Load one course document from disk
pub async fn load_course_document(
    path: &Path,
    loader: &dyn AssetLoader,
    rules: &DocumentRules,
) -> Result<(Course, Vec<Warning>), ContentError> {
    let format = DocumentFormat::from_path(path).ok_or_else(|| {
        ContentError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "unsupported document extension (expected .json, .yaml or .yml)",
        ))
        .in_document(path)
    })?;

    let text = fs::read_to_string(path)
        .await
        .map_err(|e| ContentError::from(e).in_document(path))?;

    let (course, warnings) =
        course_from_text(&text, format, loader, rules, &path.display().to_string())
            .map_err(|e| e.in_document(path))?;

    for warning in &warnings {
        tracing::warn!(document = %path.display(), "{}", warning);
    }
    tracing::debug!(document = %path.display(), course = %course.id, "Loaded course document");

    Ok((course, warnings))
}

/// Find course documents under `dir` matching a glob pattern, sorted by path
pub fn discover_documents(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>, ContentError> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    // The directory is literal; only `pattern` may contain wildcards
    let root = glob::Pattern::escape(&dir.to_string_lossy());
    let full_pattern = Path::new(&root).join(pattern);
    let entries = glob::glob(&full_pattern.to_string_lossy()).map_err(|e| {
        ContentError::Io(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()))
    })?;

    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(e) => {
                tracing::warn!("Skipping unreadable document path: {}", e);
                None
            }
        })
        .filter(|path| path.is_file() && DocumentFormat::from_path(path).is_some())
        .collect();
    paths.sort();

    Ok(paths)
}
