//! Storage trait and error types.
//!
//! Provides the core [`Storage`] trait for loading, saving, and enumerating pages,
//! along with [`StorageError`] for unified error handling across backends.

use std::path::PathBuf;

use crate::page::{Page, Title};

/// Semantic error categories.
#[derive(Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum StorageErrorKind {
    /// Page does not exist or could not be read.
    NotFound,
    /// Title is not a valid page identifier.
    InvalidTitle,
    /// Permission denied.
    PermissionDenied,
    /// Other/unknown error category.
    Other,
}

/// Storage error with semantic kind and backend-specific source.
#[derive(Debug)]
pub struct StorageError {
    /// Semantic error category.
    pub kind: StorageErrorKind,
    /// Path context (if applicable).
    pub path: Option<PathBuf>,
    /// Backend identifier (e.g., "Fs", "Mock").
    pub backend: Option<&'static str>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl StorageError {
    /// Create a new storage error.
    #[must_use]
    pub fn new(kind: StorageErrorKind) -> Self {
        Self {
            kind,
            path: None,
            backend: None,
            source: None,
        }
    }

    /// Attach path context.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Attach backend identifier.
    #[must_use]
    pub fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Downcast the source error to a concrete type.
    #[must_use]
    pub fn downcast_source<E: std::error::Error + 'static>(&self) -> Option<&E> {
        self.source.as_ref()?.downcast_ref()
    }

    /// Create a not found error with path.
    #[must_use]
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::new(StorageErrorKind::NotFound).with_path(path)
    }

    /// Create a storage error from an I/O error raised while writing.
    ///
    /// Read failures are always reported as [`StorageErrorKind::NotFound`] by
    /// backends; this mapping is for the write path.
    #[must_use]
    pub fn io(err: std::io::Error, path: Option<PathBuf>) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => StorageErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => StorageErrorKind::PermissionDenied,
            _ => StorageErrorKind::Other,
        };
        let mut error = Self::new(kind).with_source(err);
        if let Some(p) = path {
            error = error.with_path(p);
        }
        error
    }

    /// True if this error means the page is absent or unreadable.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.kind == StorageErrorKind::NotFound
    }
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format: "[Backend] Kind: message (path: /foo/bar)"
        if let Some(backend) = self.backend {
            write!(f, "[{backend}] ")?;
        }

        let kind_str = match self.kind {
            StorageErrorKind::NotFound => "Not found",
            StorageErrorKind::InvalidTitle => "Invalid title",
            StorageErrorKind::PermissionDenied => "Permission denied",
            StorageErrorKind::Other => "Error",
        };

        write!(f, "{kind_str}")?;

        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }

        if let Some(path) = &self.path {
            write!(f, " (path: {})", path.display())?;
        }

        Ok(())
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Storage abstraction for wiki pages.
///
/// Pages are addressed by [`Title`]. Implementations map titles to their own
/// naming scheme; because titles are validated on construction, that mapping
/// never needs to sanitise input.
pub trait Storage: Send + Sync {
    /// Load a page by title.
    ///
    /// # Errors
    ///
    /// Returns [`StorageErrorKind::NotFound`] for any failure to read the page,
    /// whatever the underlying cause.
    fn load(&self, title: &Title) -> Result<Page, StorageError>;

    /// Persist a page, replacing any existing content for its title.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the page could not be written.
    fn save(&self, page: &Page) -> Result<(), StorageError>;

    /// List titles of all stored pages except `exclude`.
    ///
    /// Enumeration failures yield an empty list rather than an error.
    fn list_titles(&self, exclude: &Title) -> Vec<Title>;
}
