use super::ValidationError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: Uuid,
    pub content: String,
    pub image_url: Option<String>,
    pub author_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Post {
    pub fn author(&self) -> &str {
        self.author_name.as_deref().unwrap_or("Anonymous")
    }
}

/// A post ready to be inserted.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub content: String,
    pub author_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl NewPost {
    /// Trims the inputs; a blank author is stored as anonymous.
    pub fn new(content: &str, author_name: &str) -> Result<Self, ValidationError> {
        let content = content.trim();
        if content.is_empty() {
            return Err(ValidationError::MissingMessage);
        }
        let author_name = author_name.trim();
        Ok(Self {
            content: content.to_string(),
            author_name: (!author_name.is_empty()).then(|| author_name.to_string()),
            image_url: None,
        })
    }

    pub fn with_image(mut self, image_url: String) -> Self {
        self.image_url = Some(image_url);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PostOrder {
    #[default]
    Newest,
    Oldest,
}
