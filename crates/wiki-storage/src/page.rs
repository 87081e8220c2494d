//! Page value types.
//!
//! A [`Title`] can only be built from `[A-Za-z0-9]+`, so every filename derived
//! from it stays inside the storage root. Titles arriving from anywhere other than
//! the router (form fields, config) go through the same check.

use std::fmt;

use crate::storage::{StorageError, StorageErrorKind};

/// File extension appended to a title to form its storage filename.
pub const PAGE_EXTENSION: &str = "txt";

/// Validated page title.
///
/// # Example
///
/// ```ignore
/// let title = Title::parse("FrontPage")?;
/// assert_eq!(title.file_name(), "FrontPage.txt");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Title(String);

impl Title {
    /// Parse a title, accepting only ASCII letters and digits.
    ///
    /// # Errors
    ///
    /// Returns [`StorageErrorKind::InvalidTitle`] if the input is empty or contains
    /// any other character.
    pub fn parse(raw: &str) -> Result<Self, StorageError> {
        if Self::is_valid(raw) {
            Ok(Self(raw.to_owned()))
        } else {
            Err(StorageError::new(StorageErrorKind::InvalidTitle).with_path(raw))
        }
    }

    /// Check whether `raw` is a well-formed title.
    #[must_use]
    pub fn is_valid(raw: &str) -> bool {
        !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_alphanumeric())
    }

    /// Title as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Storage filename for this title (`<title>.txt`).
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}.{PAGE_EXTENSION}", self.0)
    }
}

impl fmt::Display for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single wiki page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Page title (unique identifier).
    pub title: Title,
    /// Raw page body. No encoding is enforced.
    pub body: Vec<u8>,
}

impl Page {
    /// Create a page from a title and body.
    #[must_use]
    pub fn new(title: Title, body: Vec<u8>) -> Self {
        Self { title, body }
    }

    /// Create a page with an empty body.
    #[must_use]
    pub fn empty(title: Title) -> Self {
        Self::new(title, Vec::new())
    }
}

/// Pages shown on the front page, in listing order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PageList {
    /// Loaded pages.
    pub pages: Vec<Page>,
}
