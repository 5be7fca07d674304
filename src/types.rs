//! Record types for the books API.

use serde::{Deserialize, Serialize};

/// Longest accepted title, in characters.
pub const MAX_TITLE_LEN: usize = 200;

/// Longest accepted author name, in characters.
pub const MAX_AUTHOR_LEN: usize = 100;

/// Latest accepted publication year.
pub const MAX_YEAR: i32 = 2100;

/// A stored book.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Book {
    /// Row id assigned by SQLite
    pub id: i64,

    pub title: String,

    pub author: String,

    /// Publication year, 0-2100
    pub year: i32,
}

/// Request body for creating a book. Every field is required.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookCreate {
    pub title: String,
    pub author: String,
    pub year: i32,
}

/// Request body for a partial update. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
}

/// Search filters. Each present filter narrows the result set.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookQuery {
    /// Case-insensitive substring of the title
    pub title: Option<String>,

    /// Case-insensitive substring of the author
    pub author: Option<String>,

    /// Exact publication year
    pub year: Option<i32>,
}

impl BookQuery {
    /// Title filter, ignoring empty strings.
    pub fn title_filter(&self) -> Option<&str> {
        self.title.as_deref().filter(|t| !t.is_empty())
    }

    /// Author filter, ignoring empty strings.
    pub fn author_filter(&self) -> Option<&str> {
        self.author.as_deref().filter(|a| !a.is_empty())
    }
}

/// Validation errors for book payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    TitleTooLong,
    AuthorTooLong,
    YearOutOfRange(i32),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::TitleTooLong => {
                write!(f, "title must be at most {} characters", MAX_TITLE_LEN)
            }
            ValidationError::AuthorTooLong => {
                write!(f, "author must be at most {} characters", MAX_AUTHOR_LEN)
            }
            ValidationError::YearOutOfRange(year) => {
                write!(f, "year {} is out of range 0-{}", year, MAX_YEAR)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

fn check_title(title: &str) -> Result<(), ValidationError> {
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(ValidationError::TitleTooLong);
    }
    Ok(())
}

fn check_author(author: &str) -> Result<(), ValidationError> {
    if author.chars().count() > MAX_AUTHOR_LEN {
        return Err(ValidationError::AuthorTooLong);
    }
    Ok(())
}

fn check_year(year: i32) -> Result<(), ValidationError> {
    if !(0..=MAX_YEAR).contains(&year) {
        return Err(ValidationError::YearOutOfRange(year));
    }
    Ok(())
}

impl BookCreate {
    /// Validate the payload's fields.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_title(&self.title)?;
        check_author(&self.author)?;
        check_year(self.year)
    }
}

impl BookUpdate {
    /// Validate only the fields that are present.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(title) = &self.title {
            check_title(title)?;
        }
        if let Some(author) = &self.author {
            check_author(author)?;
        }
        if let Some(year) = self.year {
            check_year(year)?;
        }
        Ok(())
    }

    /// Returns true if the update carries no fields.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.author.is_none() && self.year.is_none()
    }

    /// Apply the present fields to `book`.
    pub fn apply_to(&self, book: &mut Book) {
        if let Some(title) = &self.title {
            book.title = title.clone();
        }
        if let Some(author) = &self.author {
            book.author = author.clone();
        }
        if let Some(year) = self.year {
            book.year = year;
        }
    }
}
