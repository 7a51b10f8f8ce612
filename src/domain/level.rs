//! Section difficulty levels.

use serde::{Deserialize, Serialize};

use crate::schema::InvariantError;

/// Difficulty level of a section.
///
/// `intermediate` is the canonical spelling. Older content uses `medium`;
/// it still deserializes to [`Level::Intermediate`], and the document
/// validator reports it as deprecated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    /// Entry-level material
    Basic,

    /// Builds on the basics
    #[serde(alias = "medium")]
    Intermediate,

    /// Deep dives and edge cases
    Advanced,
}

impl Level {
    /// Canonical level names, in ascending difficulty
    pub const NAMES: &'static [&'static str] = &["basic", "intermediate", "advanced"];

    /// Deprecated spelling of [`Level::Intermediate`]
    pub const DEPRECATED_MEDIUM: &'static str = "medium";

    /// Canonical name of this level
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Basic => "basic",
            Level::Intermediate => "intermediate",
            Level::Advanced => "advanced",
        }
    }

    /// Parse a level name, normalizing the deprecated `medium` spelling.
    pub fn parse(value: &str) -> Result<Self, InvariantError> {
        match value.trim().to_lowercase().as_str() {
            "basic" => Ok(Level::Basic),
            "intermediate" | "medium" => Ok(Level::Intermediate),
            "advanced" => Ok(Level::Advanced),
            _ => Err(InvariantError::UnknownLevel {
                value: value.to_string(),
            }),
        }
    }

    /// Whether `value` is an accepted but deprecated spelling
    pub fn is_deprecated(value: &str) -> bool {
        value.trim().eq_ignore_ascii_case(Self::DEPRECATED_MEDIUM)
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Level {
    type Err = InvariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_canonical_names() {
        assert_eq!(Level::parse("basic").unwrap(), Level::Basic);
        assert_eq!(Level::parse("Intermediate").unwrap(), Level::Intermediate);
        assert_eq!(" advanced ".parse::<Level>().unwrap(), Level::Advanced);
    }

    #[test]
    fn test_medium_normalizes_to_intermediate() {
        assert_eq!(Level::parse("medium").unwrap(), Level::Intermediate);
        assert!(Level::is_deprecated("Medium"));
        assert!(!Level::is_deprecated("intermediate"));

        let level: Level = serde_json::from_str("\"medium\"").unwrap();
        assert_eq!(level, Level::Intermediate);
        assert_eq!(serde_json::to_string(&level).unwrap(), "\"intermediate\"");
    }

    #[test]
    fn test_unknown_level_rejected() {
        let err = Level::parse("expert").unwrap_err();
        assert!(matches!(err, InvariantError::UnknownLevel { ref value } if value == "expert"));
    }

    #[test]
    fn test_levels_order_by_difficulty() {
        assert!(Level::Basic < Level::Intermediate);
        assert!(Level::Intermediate < Level::Advanced);
    }
}
