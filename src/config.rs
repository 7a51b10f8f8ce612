//! Configuration for coursebook.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variables (COURSEBOOK_HOME, COURSEBOOK_CONTENT)
//! 2. Config file (.coursebook/config.yaml)
//! 3. Defaults (~/.coursebook)
//!
//! Config file discovery:
//! - Searches current directory and parents for .coursebook/config.yaml
//! - Paths in config file are relative to the project root (the parent of
//!   .coursebook/)

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::library::{CatalogOptions, EmbeddedAssets, FsAssets, LayeredAssets};
use crate::schema::DocumentRules;

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<Result<ResolvedConfig, String>> = OnceLock::new();

/// Default glob for course documents inside the content directory
pub const DEFAULT_DOCUMENT_PATTERN: &str = "**/*.course.*";

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub catalog: Option<CatalogConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathsConfig {
    /// Coursebook home directory (relative to project root)
    pub home: Option<String>,
    /// Course document directory (relative to project root)
    pub content: Option<String>,
    /// Markdown asset directory (relative to project root)
    pub assets: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogConfig {
    pub include_builtin: Option<bool>,
    pub recompute_totals: Option<bool>,
    pub strict_levels: Option<bool>,
    pub document_pattern: Option<String>,
}

/// Resolved configuration with absolute paths
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Coursebook home directory
    pub home: PathBuf,
    /// Directory searched for course documents
    pub content: PathBuf,
    /// Directory markdown assets are read from
    pub assets: PathBuf,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
    /// List built-in courses before documents
    pub include_builtin: bool,
    /// Replace authored lesson counters with real counts
    pub recompute_totals: bool,
    /// Reject the deprecated `medium` level
    pub strict_levels: bool,
    /// Glob (relative to `content`) selecting course documents
    pub document_pattern: String,
}

impl ResolvedConfig {
    /// Defaults rooted at `home`
    pub fn with_home(home: PathBuf) -> Self {
        let content = home.join("content");
        Self {
            assets: content.join("assets"),
            content,
            home,
            config_file: None,
            include_builtin: true,
            recompute_totals: true,
            strict_levels: false,
            document_pattern: DEFAULT_DOCUMENT_PATTERN.to_string(),
        }
    }

    /// Catalog build options derived from this configuration
    pub fn catalog_options(&self) -> CatalogOptions {
        CatalogOptions {
            recompute_totals: self.recompute_totals,
            rules: DocumentRules {
                strict_levels: self.strict_levels,
            },
        }
    }

    /// Asset loader: the asset directory first, then embedded assets
    pub fn asset_loader(&self) -> LayeredAssets {
        LayeredAssets::new(vec![
            Box::new(FsAssets::new(self.assets.clone())),
            Box::new(EmbeddedAssets),
        ])
    }
}

/// Find config file by searching current directory and parents
fn find_config_file() -> Option<PathBuf> {
    let mut current = std::env::current_dir().ok()?;

    loop {
        let config_path = current.join(".coursebook").join("config.yaml");
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolve a path that may be relative to the project root
fn resolve_path(base: &Path, path_str: &str) -> PathBuf {
    let path = PathBuf::from(path_str);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
            .canonicalize()
            .unwrap_or_else(|_| base.join(path_str))
    }
}

/// Apply a parsed config file on top of defaults
fn apply_config_file(config_path: &Path, file: ConfigFile, default_home: PathBuf) -> ResolvedConfig {
    // Project root is the parent of .coursebook/
    let base_dir = config_path
        .parent()
        .and_then(|p| p.parent())
        .unwrap_or(Path::new("."));

    let home = match std::env::var("COURSEBOOK_HOME") {
        Ok(env_home) => PathBuf::from(env_home),
        Err(_) => file
            .paths
            .home
            .as_deref()
            .map(|h| resolve_path(base_dir, h))
            .unwrap_or(default_home),
    };

    let mut resolved = ResolvedConfig::with_home(home);
    resolved.config_file = Some(config_path.to_path_buf());

    if let Ok(env_content) = std::env::var("COURSEBOOK_CONTENT") {
        resolved.content = PathBuf::from(env_content);
        resolved.assets = resolved.content.join("assets");
    } else if let Some(content) = file.paths.content.as_deref() {
        resolved.content = resolve_path(base_dir, content);
        resolved.assets = resolved.content.join("assets");
    }
    if let Some(assets) = file.paths.assets.as_deref() {
        resolved.assets = resolve_path(base_dir, assets);
    }

    let catalog = file.catalog.unwrap_or_default();
    if let Some(include_builtin) = catalog.include_builtin {
        resolved.include_builtin = include_builtin;
    }
    if let Some(recompute_totals) = catalog.recompute_totals {
        resolved.recompute_totals = recompute_totals;
    }
    if let Some(strict_levels) = catalog.strict_levels {
        resolved.strict_levels = strict_levels;
    }
    if let Some(pattern) = catalog.document_pattern {
        resolved.document_pattern = pattern;
    }

    resolved
}

/// Load configuration from all sources
fn load_config() -> Result<ResolvedConfig> {
    let default_home = dirs::home_dir()
        .context("Failed to determine home directory")?
        .join(".coursebook");

    if let Some(config_path) = find_config_file() {
        let file = load_config_file(&config_path)?;
        return Ok(apply_config_file(&config_path, file, default_home));
    }

    // No config file - use env vars or defaults
    let home = std::env::var("COURSEBOOK_HOME")
        .map(PathBuf::from)
        .unwrap_or(default_home);
    let mut resolved = ResolvedConfig::with_home(home);

    if let Ok(env_content) = std::env::var("COURSEBOOK_CONTENT") {
        resolved.content = PathBuf::from(env_content);
        resolved.assets = resolved.content.join("assets");
    }

    Ok(resolved)
}

/// Get the global configuration (loads once, then cached)
pub fn config() -> Result<&'static ResolvedConfig> {
    let result = CONFIG.get_or_init(|| load_config().map_err(|e| e.to_string()));

    match result {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("{}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_rooted_at_home() {
        let config = ResolvedConfig::with_home(PathBuf::from("/test/.coursebook"));

        assert_eq!(config.content, PathBuf::from("/test/.coursebook/content"));
        assert_eq!(config.assets, PathBuf::from("/test/.coursebook/content/assets"));
        assert!(config.include_builtin);
        assert!(config.recompute_totals);
        assert!(!config.strict_levels);
        assert_eq!(config.document_pattern, DEFAULT_DOCUMENT_PATTERN);
    }

    #[test]
    fn test_config_file_parsing() {
        let temp = TempDir::new().unwrap();
        let dot_dir = temp.path().join(".coursebook");
        std::fs::create_dir_all(&dot_dir).unwrap();

        let config_path = dot_dir.join("config.yaml");
        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(
            file,
            r#"
version: "1.0"
paths:
  content: ./courses
  assets: ./courses/md
catalog:
  include_builtin: false
  strict_levels: true
  document_pattern: "*.json"
"#
        )
        .unwrap();

        let parsed = load_config_file(&config_path).unwrap();
        assert_eq!(parsed.version, "1.0");
        assert_eq!(parsed.paths.content, Some("./courses".to_string()));
        assert_eq!(parsed.paths.home, None);

        let resolved = apply_config_file(&config_path, parsed, PathBuf::from("/default"));
        assert!(!resolved.include_builtin);
        assert!(resolved.strict_levels);
        assert!(resolved.recompute_totals);
        assert_eq!(resolved.document_pattern, "*.json");
        assert!(resolved.assets.ends_with("courses/md"));
        assert_eq!(resolved.config_file, Some(config_path));

        let options = resolved.catalog_options();
        assert!(options.rules.strict_levels);
    }

    #[test]
    fn test_resolve_relative_path() {
        let base = PathBuf::from("/home/user/project");

        assert_eq!(
            resolve_path(&base, "./subdir"),
            PathBuf::from("/home/user/project/subdir")
        );
        assert_eq!(
            resolve_path(&base, "/absolute/path"),
            PathBuf::from("/absolute/path")
        );
    }
}
