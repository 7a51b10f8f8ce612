//! Course Document Integration Tests
//!
//! Tests for loading course documents and markdown assets from a content
//! directory on disk.

use std::fs;
use std::path::Path;

use coursebook::config::ResolvedConfig;
use coursebook::courses;
use coursebook::domain::{LessonBody, Level};
use coursebook::library::{
    discover_documents, load_course_document, AssetLoader, Catalog, FsAssets,
};
use coursebook::schema::{ContentError, DocumentRules, Problem};
use tempfile::TempDir;

const RUST_COURSE: &str = r#"
id: rust
title: Rust
description: Systems programming without fear
estimatedHours: 20
sections:
  - id: ownership
    title: Ownership
    level: medium
    lessons:
      - id: moves
        title: Moves
        duration: 20 min
        body:
          kind: markdown_file
          value: rust/ownership.md
      - id: borrowing
        title: Borrowing
        duration: 25 min
        body:
          kind: text
          value: A reference borrows a value without taking ownership.
    quiz:
      id: ownership-quiz
      title: Ownership Quiz
      questions:
        - id: q1
          question: What happens to a String after it is moved?
          options:
            - It is copied
            - The old binding can no longer be used
          correctAnswer: 1
"#;

fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Home directory with one course document and its markdown asset
fn content_home() -> (TempDir, ResolvedConfig) {
    let temp = TempDir::new().unwrap();
    let config = ResolvedConfig::with_home(temp.path().to_path_buf());

    write(&config.content.join("rust.course.yaml"), RUST_COURSE);
    write(
        &config.assets.join("rust/ownership.md"),
        "# Moves\n\nAssigning a `String` moves it.\n",
    );

    (temp, config)
}

#[tokio::test]
async fn test_catalog_load_includes_documents() {
    let (_temp, config) = content_home();
    let loader = config.asset_loader();

    let catalog = Catalog::load(&config, &loader).await.unwrap();

    assert_eq!(catalog.len(), courses::ORDER.len() + 1);
    assert_eq!(catalog.ids().last(), Some("rust"));

    let rust = catalog.get_course("rust").unwrap();
    assert_eq!(rust.total_lessons, 2);
    assert_eq!(rust.sections[0].level, Level::Intermediate);
    assert_eq!(
        rust.sections[0].lessons[0].body,
        LessonBody::markdown("# Moves\n\nAssigning a `String` moves it.\n")
    );
}

#[tokio::test]
async fn test_catalog_load_without_builtin() {
    let (_temp, mut config) = content_home();
    config.include_builtin = false;
    let loader = config.asset_loader();

    let catalog = Catalog::load(&config, &loader).await.unwrap();
    assert_eq!(catalog.ids().collect::<Vec<_>>(), vec!["rust"]);
}

#[tokio::test]
async fn test_missing_content_dir_is_empty() {
    let temp = TempDir::new().unwrap();
    let config = ResolvedConfig::with_home(temp.path().join("nowhere"));
    let loader = config.asset_loader();

    let catalog = Catalog::load(&config, &loader).await.unwrap();
    assert_eq!(catalog.len(), courses::ORDER.len());
}

#[tokio::test]
async fn test_load_document_reports_medium_warning() {
    let (_temp, config) = content_home();
    let loader = config.asset_loader();

    let (course, warnings) = load_course_document(
        &config.content.join("rust.course.yaml"),
        &loader,
        &DocumentRules::default(),
    )
    .await
    .unwrap();

    assert_eq!(course.id, "rust");
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].path, "sections[0].level");
}

#[tokio::test]
async fn test_strict_levels_rejects_document() {
    let (_temp, mut config) = content_home();
    config.strict_levels = true;
    let loader = config.asset_loader();

    let err = Catalog::load(&config, &loader).await.unwrap_err();
    match err {
        ContentError::Document { path, source } => {
            assert!(path.ends_with("rust.course.yaml"));
            assert!(matches!(*source, ContentError::Schema(_)));
        }
        other => panic!("expected document error, got {}", other),
    }
}

#[tokio::test]
async fn test_missing_asset_is_violation() {
    let (_temp, config) = content_home();
    fs::remove_file(config.assets.join("rust/ownership.md")).unwrap();
    let loader = FsAssets::new(&config.assets);

    let err = load_course_document(
        &config.content.join("rust.course.yaml"),
        &loader,
        &DocumentRules::default(),
    )
    .await
    .unwrap_err();

    let ContentError::Document { source, .. } = err else {
        panic!("expected document error");
    };
    let ContentError::Schema(schema) = *source else {
        panic!("expected schema error");
    };
    assert_eq!(schema.len(), 1);
    assert_eq!(schema.violations[0].path, "sections[0].lessons[0].body");
    assert!(matches!(
        schema.violations[0].problem,
        Problem::MissingAsset { ref asset, .. } if asset == "rust/ownership.md"
    ));
}

#[test]
fn test_fs_assets_refuses_escape() {
    let temp = TempDir::new().unwrap();
    write(&temp.path().join("secret.md"), "secret");
    let loader = FsAssets::new(temp.path().join("assets"));

    for path in ["../secret.md", "rust/../../secret.md", "/etc/passwd"] {
        let err = loader.load_lesson_body(path).unwrap_err();
        assert!(
            matches!(err, ContentError::AssetPath { .. }),
            "{} was not refused: {}",
            path,
            err
        );
    }
}

#[test]
fn test_filesystem_assets_override_embedded() {
    let temp = TempDir::new().unwrap();
    let config = ResolvedConfig::with_home(temp.path().to_path_buf());
    write(&config.assets.join("sql/joins.md"), "# Local joins\n");

    let catalog = Catalog::builtin(&config.asset_loader()).unwrap();
    let joins = catalog
        .get_course("sql")
        .unwrap()
        .section("joins")
        .and_then(|s| s.lesson("joins"))
        .unwrap();
    assert_eq!(joins.body, LessonBody::markdown("# Local joins\n"));
}

#[test]
fn test_discover_documents_sorted() {
    let temp = TempDir::new().unwrap();
    write(&temp.path().join("b.course.json"), "{}");
    write(&temp.path().join("nested/a.course.yaml"), "{}");
    write(&temp.path().join("notes.md"), "# not a course");
    write(&temp.path().join("c.course.txt"), "nope");

    let found = discover_documents(temp.path(), "**/*.course.*").unwrap();
    let names: Vec<_> = found
        .iter()
        .map(|p| p.strip_prefix(temp.path()).unwrap().to_path_buf())
        .collect();

    assert_eq!(
        names,
        vec![
            Path::new("b.course.json").to_path_buf(),
            Path::new("nested/a.course.yaml").to_path_buf(),
        ]
    );
}

#[test]
fn test_discover_documents_in_directory_with_glob_characters() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("courses [2024] *draft?");
    write(&dir.join("a.course.json"), "{}");
    write(&dir.join("nested/b.course.yaml"), "{}");

    let found = discover_documents(&dir, "**/*.course.*").unwrap();
    assert_eq!(
        found,
        vec![dir.join("a.course.json"), dir.join("nested/b.course.yaml")]
    );
}

#[tokio::test]
async fn test_catalog_load_from_bracketed_home() {
    let temp = TempDir::new().unwrap();
    let config = ResolvedConfig::with_home(temp.path().join("coursebook [staging]"));
    write(&config.content.join("rust.course.yaml"), RUST_COURSE);
    write(&config.assets.join("rust/ownership.md"), "# Moves\n");
    let loader = config.asset_loader();

    let catalog = Catalog::load(&config, &loader).await.unwrap();
    assert!(catalog.get_course("rust").is_ok());
}
