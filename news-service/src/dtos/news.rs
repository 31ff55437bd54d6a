use serde_json::Value;
use service_core::error::AppError;

use crate::models::NewsEntry;

pub const TITLE_REQUIRED: &str = "title is required";

/// Body of `POST /news`. Both fields are optional on the wire.
#[derive(Debug, Default, PartialEq)]
pub struct CreateNewsRequest {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl CreateNewsRequest {
    /// Parse the raw body field by field. A body that is not a JSON object
    /// yields an empty request; a field that is not a string counts as absent
    /// without affecting the other field.
    pub fn from_body(body: &[u8]) -> Self {
        let value: Value = match serde_json::from_slice(body) {
            Ok(value) => value,
            Err(e) => {
                if !body.is_empty() {
                    tracing::debug!(error = %e, "Unparseable news body, treating as empty");
                }
                return Self::default();
            }
        };

        let field = |name: &str| {
            value
                .get(name)
                .and_then(Value::as_str)
                .map(str::to_string)
        };

        Self {
            title: field("title"),
            content: field("content"),
        }
    }

    /// Trim both fields and stamp a new entry; an empty title is rejected.
    pub fn into_entry(self) -> Result<NewsEntry, AppError> {
        let title = self.title.as_deref().unwrap_or_default().trim();
        if title.is_empty() {
            return Err(AppError::BadRequest(anyhow::anyhow!(TITLE_REQUIRED)));
        }
        let content = self.content.as_deref().unwrap_or_default().trim();

        Ok(NewsEntry::new(title.to_string(), content.to_string()))
    }
}
