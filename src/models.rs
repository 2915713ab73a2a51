//! Article domain types.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// A stored article. Timestamps are epoch milliseconds.
#[derive(Debug, Clone, Serialize)]
pub struct Article {
    pub id: String,
    pub title: String,
    pub body: String,
    pub created_on: i64,
    pub updated_on: i64,
}

/// Form payload for creating or updating an article.
///
/// Fields default to empty when absent from the submission so that a
/// missing field and an empty field fail validation the same way.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ArticleDraft {
    pub title: String,
    pub body: String,
}

impl ArticleDraft {
    /// Check required fields, returning every violation at once.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();
        if self.title.trim().is_empty() {
            errors.push("title is required".to_string());
        }
        if self.body.trim().is_empty() {
            errors.push("body is required".to_string());
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Current time in epoch milliseconds, the unit stored on articles.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}
