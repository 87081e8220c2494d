//! Mock storage implementation for testing.
//!
//! Provides [`MockStorage`] for unit testing without filesystem access.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::page::{Page, Title};
use crate::storage::{Storage, StorageError, StorageErrorKind};

/// Backend identifier for error messages.
const BACKEND: &str = "Mock";

/// Mock storage for testing.
///
/// Stores page bodies in memory keyed by title. Use the builder methods
/// to configure the mock with test data.
///
/// # Example
///
/// ```ignore
/// use wiki_storage::{MockStorage, Storage, Title};
///
/// let storage = MockStorage::new().with_page("Guide", "Read me");
/// let page = storage.load(&Title::parse("Guide")?)?;
/// ```
#[derive(Debug, Default)]
pub struct MockStorage {
    pages: RwLock<BTreeMap<String, Vec<u8>>>,
    unreadable: BTreeSet<String>,
    fail_saves: AtomicBool,
}

impl MockStorage {
    /// Create a new empty mock storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a page with the given title and body.
    ///
    /// The title is stored as-is, so tests can seed entries a real
    /// backend would never produce.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_page(self, title: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        self.pages.write().unwrap().insert(title.into(), body.into());
        self
    }

    /// Add a title that is listed but whose `load` always fails.
    #[must_use]
    pub fn with_unreadable_page(mut self, title: impl Into<String>) -> Self {
        self.unreadable.insert(title.into());
        self
    }

    /// Make every subsequent `save` fail.
    #[must_use]
    pub fn with_failing_saves(self) -> Self {
        self.fail_saves.store(true, Ordering::SeqCst);
        self
    }

    /// Current body stored for `title`, if any.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn body(&self, title: &str) -> Option<Vec<u8>> {
        self.pages.read().unwrap().get(title).cloned()
    }
}

impl Storage for MockStorage {
    fn load(&self, title: &Title) -> Result<Page, StorageError> {
        if self.unreadable.contains(title.as_str()) {
            return Err(StorageError::new(StorageErrorKind::Other)
                .with_backend(BACKEND)
                .with_path(title.file_name())
                .with_source(std::io::Error::other("simulated read failure")));
        }
        let pages = self.pages.read().unwrap();
        let body = pages.get(title.as_str()).ok_or_else(|| {
            StorageError::not_found(title.file_name()).with_backend(BACKEND)
        })?;
        Ok(Page::new(title.clone(), body.clone()))
    }

    fn save(&self, page: &Page) -> Result<(), StorageError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(StorageError::new(StorageErrorKind::Other)
                .with_backend(BACKEND)
                .with_path(page.title.file_name())
                .with_source(std::io::Error::other("simulated write failure")));
        }
        self.pages
            .write()
            .unwrap()
            .insert(page.title.as_str().to_owned(), page.body.clone());
        Ok(())
    }

    fn list_titles(&self, exclude: &Title) -> Vec<Title> {
        let pages = self.pages.read().unwrap();
        pages
            .keys()
            .chain(&self.unreadable)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .filter(|name| name.as_str() != exclude.as_str())
            .filter_map(|name| Title::parse(name).ok())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn title(raw: &str) -> Title {
        Title::parse(raw).unwrap()
    }

    #[test]
    fn test_load_missing() {
        let storage = MockStorage::new();

        let err = storage.load(&title("Missing")).unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(err.backend, Some("Mock"));
    }

    #[test]
    fn test_save_then_load() {
        let storage = MockStorage::new();
        let page = Page::new(title("Guide"), b"hello".to_vec());

        storage.save(&page).unwrap();

        assert_eq!(storage.load(&title("Guide")).unwrap(), page);
    }

    #[test]
    fn test_failing_saves() {
        let storage = MockStorage::new().with_failing_saves();

        let err = storage.save(&Page::empty(title("Guide"))).unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::Other);
        assert!(storage.body("Guide").is_none());
    }

    #[test]
    fn test_list_titles_excludes_reserved_and_invalid() {
        let storage = MockStorage::new()
            .with_page("FrontPage", "home")
            .with_page("Beta", "b")
            .with_page("Alpha", "a")
            .with_page("not valid", "x");

        let titles = storage.list_titles(&title("FrontPage"));

        assert_eq!(titles, vec![title("Alpha"), title("Beta")]);
    }

    #[test]
    fn test_unreadable_page_is_listed_but_fails_to_load() {
        let storage = MockStorage::new()
            .with_page("Beta", "b")
            .with_unreadable_page("Alpha");

        let titles = storage.list_titles(&title("FrontPage"));
        let err = storage.load(&title("Alpha")).unwrap_err();

        assert_eq!(titles, vec![title("Alpha"), title("Beta")]);
        assert_eq!(err.kind, StorageErrorKind::Other);
        assert!(!err.is_not_found());
    }
}
