//! Hands-on projects attached to a section.

use serde::{Deserialize, Serialize};

/// A hands-on exercise with a completion checkpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub title: String,
    pub description: String,

    /// What the learner must have working to call the project done
    pub checkpoint: String,
}

impl Project {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        checkpoint: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            checkpoint: checkpoint.into(),
        }
    }
}
