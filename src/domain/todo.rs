use std::fmt;

/// Upper bound on a title, counted in characters rather than bytes.
pub const TITLE_MAX_CHARS: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TodoId(pub i64);

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Todo {
    pub id: TodoId,
    pub title: String,
    pub is_completed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TitleError {
    #[error("title is required")]
    Missing,
    #[error("title must be at most {max} characters")]
    TooLong { max: usize },
    #[error("title must not contain control characters")]
    ControlCharacter,
}

/// A title that is non-blank, free of control characters and at most [`TITLE_MAX_CHARS`] long.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoTitle(String);

impl TodoTitle {
    pub fn parse(raw: impl Into<String>) -> Result<Self, TitleError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(TitleError::Missing);
        }
        if raw.chars().count() > TITLE_MAX_CHARS {
            return Err(TitleError::TooLong { max: TITLE_MAX_CHARS });
        }
        // SQLite's length() stops at NUL, so these never reach the table's CHECK.
        if raw.chars().any(char::is_control) {
            return Err(TitleError::ControlCharacter);
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str { &self.0 }

    pub fn into_inner(self) -> String { self.0 }
}

/// The mutable part of a todo, written wholesale by an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoFields {
    pub title: TodoTitle,
    pub is_completed: bool,
}
