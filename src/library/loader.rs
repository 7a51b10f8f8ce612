//! Lesson body asset loading.
//!
//! Some lessons keep their markdown in separate asset files. Loading goes
//! through [`AssetLoader`] so course modules never touch the filesystem
//! directly and tests can swap in [`MemoryAssets`].

use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

use crate::schema::ContentError;

/// Source of raw lesson body text
pub trait AssetLoader: Send + Sync {
    /// Human-readable loader name
    fn name(&self) -> &str;

    /// Read the asset at `path` verbatim
    fn load_lesson_body(&self, path: &str) -> Result<String, ContentError>;
}

fn not_found(path: &str) -> ContentError {
    ContentError::Asset {
        path: path.to_string(),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "asset not found"),
    }
}

/// Markdown assets compiled into the binary
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedAssets;

macro_rules! embedded {
    ($($path:literal),* $(,)?) => {
        &[$(($path, include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/", $path)))),*]
    };
}

/// Asset path → contents, for every file under `assets/`
const EMBEDDED: &[(&str, &str)] = embedded![
    "html/document-structure.md",
    "html/semantic-elements.md",
    "css/cascade.md",
    "css/flexbox.md",
    "javascript/closures.md",
    "javascript/promises.md",
    "sql/select-basics.md",
    "sql/joins.md",
    "sql/window-functions.md",
    "git/branching.md",
];

impl EmbeddedAssets {
    /// Paths of every embedded asset
    pub fn paths() -> impl Iterator<Item = &'static str> {
        EMBEDDED.iter().map(|(path, _)| *path)
    }
}

impl AssetLoader for EmbeddedAssets {
    fn name(&self) -> &str {
        "embedded"
    }

    fn load_lesson_body(&self, path: &str) -> Result<String, ContentError> {
        EMBEDDED
            .iter()
            .find(|(p, _)| *p == path)
            .map(|(_, content)| content.to_string())
            .ok_or_else(|| not_found(path))
    }
}

/// Assets read from a directory on disk
#[derive(Debug, Clone)]
pub struct FsAssets {
    root: PathBuf,
}

impl FsAssets {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve an asset path under the root, refusing escapes
    pub fn resolve(&self, path: &str) -> Result<PathBuf, ContentError> {
        let relative = Path::new(path);

        if relative.is_absolute() {
            return Err(ContentError::AssetPath {
                path: path.to_string(),
                reason: "absolute paths are not allowed",
            });
        }
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
        {
            return Err(ContentError::AssetPath {
                path: path.to_string(),
                reason: "path must stay inside the asset root",
            });
        }

        Ok(self.root.join(relative))
    }
}

impl AssetLoader for FsAssets {
    fn name(&self) -> &str {
        "filesystem"
    }

    fn load_lesson_body(&self, path: &str) -> Result<String, ContentError> {
        let asset_error = |source| ContentError::Asset {
            path: path.to_string(),
            source,
        };

        let full_path = self.resolve(path)?;

        // Symlinks may still point outside the root
        let real_path = full_path.canonicalize().map_err(asset_error)?;
        let real_root = self.root.canonicalize().map_err(asset_error)?;
        if !real_path.starts_with(&real_root) {
            return Err(ContentError::AssetPath {
                path: path.to_string(),
                reason: "path resolves outside the asset root",
            });
        }

        std::fs::read_to_string(&real_path).map_err(asset_error)
    }
}

/// In-memory assets, mainly for tests
#[derive(Debug, Clone, Default)]
pub struct MemoryAssets {
    assets: HashMap<String, String>,
}

impl MemoryAssets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an asset
    pub fn with_asset(mut self, path: impl Into<String>, content: impl Into<String>) -> Self {
        self.assets.insert(path.into(), content.into());
        self
    }
}

impl AssetLoader for MemoryAssets {
    fn name(&self) -> &str {
        "memory"
    }

    fn load_lesson_body(&self, path: &str) -> Result<String, ContentError> {
        self.assets.get(path).cloned().ok_or_else(|| not_found(path))
    }
}

/// Tries each loader in order, returning the first hit
pub struct LayeredAssets {
    layers: Vec<Box<dyn AssetLoader>>,
}

impl LayeredAssets {
    pub fn new(layers: Vec<Box<dyn AssetLoader>>) -> Self {
        Self { layers }
    }
}

impl AssetLoader for LayeredAssets {
    fn name(&self) -> &str {
        "layered"
    }

    fn load_lesson_body(&self, path: &str) -> Result<String, ContentError> {
        let mut last_err = None;
        for layer in &self.layers {
            match layer.load_lesson_body(path) {
                Ok(content) => return Ok(content),
                // A rejected path is rejected everywhere
                Err(e @ ContentError::AssetPath { .. }) => return Err(e),
                Err(e) => last_err = Some(e),
            }
        }
        Err(last_err.unwrap_or_else(|| not_found(path)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_embedded_assets_all_load() {
        let loader = EmbeddedAssets;
        for path in EmbeddedAssets::paths() {
            let content = loader.load_lesson_body(path).unwrap();
            assert!(!content.trim().is_empty(), "{} is empty", path);
        }
        assert!(loader.load_lesson_body("nope.md").is_err());
    }

    #[test]
    fn test_fs_assets_read_verbatim() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir_all(temp.path().join("sql")).unwrap();
        std::fs::write(temp.path().join("sql/intro.md"), "# Intro\n\n  indented\n").unwrap();

        let loader = FsAssets::new(temp.path());
        let content = loader.load_lesson_body("sql/intro.md").unwrap();
        assert_eq!(content, "# Intro\n\n  indented\n");

        let err = loader.load_lesson_body("sql/missing.md").unwrap_err();
        assert!(matches!(err, ContentError::Asset { .. }));
    }

    #[test]
    fn test_fs_assets_refuse_escapes() {
        let loader = FsAssets::new("/srv/assets");

        let err = loader.load_lesson_body("../etc/passwd").unwrap_err();
        assert!(matches!(err, ContentError::AssetPath { .. }));

        let err = loader.load_lesson_body("/etc/passwd").unwrap_err();
        assert!(matches!(err, ContentError::AssetPath { .. }));

        assert_eq!(
            loader.resolve("./css/grid.md").unwrap(),
            PathBuf::from("/srv/assets/./css/grid.md")
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_fs_assets_refuse_symlink_out_of_root() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("assets");
        std::fs::create_dir_all(root.join("sql")).unwrap();
        std::fs::write(temp.path().join("secret.md"), "secret").unwrap();
        std::os::unix::fs::symlink(temp.path().join("secret.md"), root.join("sql/leak.md")).unwrap();
        std::os::unix::fs::symlink(root.join("sql"), root.join("alias")).unwrap();
        std::fs::write(root.join("sql/joins.md"), "# Joins").unwrap();

        let loader = FsAssets::new(&root);

        let err = loader.load_lesson_body("sql/leak.md").unwrap_err();
        assert!(matches!(err, ContentError::AssetPath { .. }));

        // Links that stay inside the root are fine
        assert_eq!(loader.load_lesson_body("alias/joins.md").unwrap(), "# Joins");
    }

    #[test]
    fn test_layered_assets_fall_through() {
        let loader = LayeredAssets::new(vec![
            Box::new(MemoryAssets::new().with_asset("a.md", "first")),
            Box::new(EmbeddedAssets),
        ]);

        assert_eq!(loader.load_lesson_body("a.md").unwrap(), "first");
        assert!(loader.load_lesson_body("sql/joins.md").is_ok());
        assert!(loader.load_lesson_body("missing.md").is_err());
    }
}
