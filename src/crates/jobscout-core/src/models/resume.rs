//! Resume type.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored resume.
///
/// Created by the user pasting text, or by the parsing task from an
/// uploaded document. Owned by the session's profile list and deleted
/// explicitly; nothing mutates a resume in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resume {
    /// Unique identifier.
    pub id: String,
    /// Display name (e.g., "Backend 2025" or the uploaded file name).
    pub name: String,
    /// Free-text resume content.
    pub content: String,
}

impl Resume {
    /// Create a new resume with a generated id.
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            content: content.into(),
        }
    }
}
