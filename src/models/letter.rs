use super::ValidationError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const SNIPPET_LENGTH: usize = 150;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Letter {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub author_name: String,
    pub created_at: DateTime<Utc>,
}

impl Letter {
    /// The first 150 characters of the letter, with `...` when cut.
    pub fn snippet(&self) -> String {
        match self.content.char_indices().nth(SNIPPET_LENGTH) {
            Some((cut, _)) => format!("{}...", &self.content[..cut]),
            None => self.content.clone(),
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct NewLetter {
    pub title: String,
    pub content: String,
    pub author_name: String,
}

impl NewLetter {
    /// Every field is required.
    pub fn new(title: &str, content: &str, author_name: &str) -> Result<Self, ValidationError> {
        let (title, content, author_name) = (title.trim(), content.trim(), author_name.trim());
        if author_name.is_empty() {
            return Err(ValidationError::MissingAuthor);
        }
        if title.is_empty() {
            return Err(ValidationError::MissingTitle);
        }
        if content.is_empty() {
            return Err(ValidationError::MissingMessage);
        }
        Ok(Self {
            title: title.to_string(),
            content: content.to_string(),
            author_name: author_name.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn letter(content: &str) -> Letter {
        Letter {
            id: Uuid::new_v4(),
            title: "t".into(),
            content: content.into(),
            author_name: "a".into(),
            created_at: Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap(),
        }
    }

    #[test]
    fn short_content_is_not_cut() {
        let text = "x".repeat(150);
        assert_eq!(letter(&text).snippet(), text);
    }

    #[test]
    fn long_content_is_cut_on_characters() {
        let text = "é".repeat(151);
        let snippet = letter(&text).snippet();
        assert_eq!(snippet, format!("{}...", "é".repeat(150)));
    }

    #[test]
    fn all_fields_required() {
        assert_eq!(
            NewLetter::new("t", "c", " "),
            Err(ValidationError::MissingAuthor)
        );
        assert_eq!(
            NewLetter::new("", "c", "a"),
            Err(ValidationError::MissingTitle)
        );
        assert_eq!(
            NewLetter::new("t", "\n", "a"),
            Err(ValidationError::MissingMessage)
        );
        let ok = NewLetter::new(" Dear ", " words ", " me ").unwrap();
        assert_eq!(ok.title, "Dear");
        assert_eq!(ok.content, "words");
        assert_eq!(ok.author_name, "me");
    }
}
