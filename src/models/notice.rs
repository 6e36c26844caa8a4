use std::fmt;
use thiserror::Error;

/// A form field that was left blank.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please write a message")]
    MissingMessage,
    #[error("Please give your letter a title")]
    MissingTitle,
    #[error("Please enter your name")]
    MissingAuthor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Destructive,
}

/// A short message shown to the visitor after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub kind: NoticeKind,
}

impl Notice {
    pub fn success(title: &str, description: &str) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            kind: NoticeKind::Success,
        }
    }

    pub fn destructive(title: &str, description: &str) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            kind: NoticeKind::Destructive,
        }
    }

    /// Generic failure notice; the details only go to the log.
    pub fn failure(description: &str) -> Self {
        Self::destructive("Error", description)
    }
}

impl From<ValidationError> for Notice {
    fn from(e: ValidationError) -> Self {
        let title = match e {
            ValidationError::MissingMessage => "Missing Message",
            ValidationError::MissingTitle | ValidationError::MissingAuthor => {
                "Missing Information"
            }
        };
        Notice::destructive(title, &e.to_string())
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = match self.kind {
            NoticeKind::Success => "✓",
            NoticeKind::Destructive => "✗",
        };
        write!(f, "{} {}: {}", marker, self.title, self.description)
    }
}
