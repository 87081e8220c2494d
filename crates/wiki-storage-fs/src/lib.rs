//! Filesystem storage implementation for the wiki server.
//!
//! This crate provides [`FsStorage`], a filesystem-based implementation of the
//! [`Storage`](wiki_storage::Storage) trait. Each page is a single file
//! `<root>/<title>.txt` holding the raw body bytes with no header or metadata.
//!
//! # Example
//!
//! ```ignore
//! use std::path::PathBuf;
//! use wiki_storage::{Storage, Title};
//! use wiki_storage_fs::FsStorage;
//!
//! let storage = FsStorage::new(PathBuf::from("data"));
//! for title in storage.list_titles(&Title::parse("FrontPage")?) {
//!     println!("{title}");
//! }
//! ```

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use tempfile::NamedTempFile;
use wiki_storage::{PAGE_EXTENSION, Page, Storage, StorageError, Title};

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Filesystem-backed page storage.
///
/// Writes go to a temporary file in the storage root that is then renamed over
/// the page file, so a concurrent reader sees either the old or the new body.
/// There is no per-title locking: concurrent saves of one title are
/// last-writer-wins.
#[derive(Debug, Clone)]
pub struct FsStorage {
    root: PathBuf,
}

impl FsStorage {
    /// Create storage rooted at `root`.
    ///
    /// The directory is not touched until the first operation; call
    /// [`ensure_root`](Self::ensure_root) to create it up front.
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Create the storage root (and parents) if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the directory cannot be created.
    pub fn ensure_root(&self) -> Result<(), StorageError> {
        fs::create_dir_all(&self.root)
            .map_err(|e| StorageError::io(e, Some(self.root.clone())).with_backend(BACKEND))
    }

    /// Full path of the file holding `title`.
    ///
    /// This is the only place a filesystem path is derived from a title.
    fn page_path(&self, title: &Title) -> PathBuf {
        self.root.join(title.file_name())
    }

    /// Map a directory entry to a page title, if it names one.
    fn entry_title(entry: &fs::DirEntry) -> Option<Title> {
        if !entry.file_type().ok()?.is_file() {
            return None;
        }
        let name = entry.file_name();
        let stem = name.to_str()?.strip_suffix(PAGE_EXTENSION)?.strip_suffix('.')?;
        Title::parse(stem).ok()
    }
}

impl Storage for FsStorage {
    fn load(&self, title: &Title) -> Result<Page, StorageError> {
        let path = self.page_path(title);
        let body = fs::read(&path).map_err(|e| {
            tracing::debug!(title = %title, error = %e, "Page unreadable");
            StorageError::not_found(&path)
                .with_backend(BACKEND)
                .with_source(e)
        })?;
        Ok(Page::new(title.clone(), body))
    }

    fn save(&self, page: &Page) -> Result<(), StorageError> {
        let path = self.page_path(&page.title);
        let io_error =
            |e: std::io::Error| StorageError::io(e, Some(path.clone())).with_backend(BACKEND);

        // NamedTempFile is created with owner-only permissions (0600 on Unix).
        let mut tmp = NamedTempFile::new_in(&self.root).map_err(io_error)?;
        tmp.write_all(&page.body).map_err(io_error)?;
        tmp.persist(&path).map_err(|e| io_error(e.error))?;

        tracing::debug!(title = %page.title, bytes = page.body.len(), "Page saved");
        Ok(())
    }

    fn list_titles(&self, exclude: &Title) -> Vec<Title> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(root = %self.root.display(), error = %e, "Failed to list pages");
                return Vec::new();
            }
        };

        let mut titles: Vec<Title> = entries
            .filter_map(Result::ok)
            .filter_map(|entry| Self::entry_title(&entry))
            .filter(|title| title != exclude)
            .collect();
        titles.sort();
        titles
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use wiki_storage::StorageErrorKind;

    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_fs_storage_is_send_sync() {
        assert_send_sync::<FsStorage>();
    }

    fn create_test_dir() -> tempfile::TempDir {
        tempfile::tempdir().unwrap()
    }

    fn title(raw: &str) -> Title {
        Title::parse(raw).unwrap()
    }

    fn front_page() -> Title {
        title("FrontPage")
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let temp_dir = create_test_dir();
        let storage = FsStorage::new(temp_dir.path().to_path_buf());

        for (raw, body) in [
            ("Guide", b"Plain text".to_vec()),
            ("a1", Vec::new()),
            ("Binary", vec![0, 159, 146, 150, 255]),
        ] {
            let page = Page::new(title(raw), body);
            storage.save(&page).unwrap();
            assert_eq!(storage.load(&title(raw)).unwrap(), page);
        }
    }

    #[test]
    fn test_save_writes_raw_body_to_txt_file() {
        let temp_dir = create_test_dir();
        let storage = FsStorage::new(temp_dir.path().to_path_buf());

        storage
            .save(&Page::new(title("Guide"), b"Hello".to_vec()))
            .unwrap();

        let content = fs::read(temp_dir.path().join("Guide.txt")).unwrap();
        assert_eq!(content, b"Hello");
    }

    #[test]
    fn test_save_overwrites_existing() {
        let temp_dir = create_test_dir();
        let storage = FsStorage::new(temp_dir.path().to_path_buf());

        storage
            .save(&Page::new(title("Guide"), b"a much longer first body".to_vec()))
            .unwrap();
        storage
            .save(&Page::new(title("Guide"), b"short".to_vec()))
            .unwrap();

        assert_eq!(storage.load(&title("Guide")).unwrap().body, b"short");
    }

    #[test]
    fn test_save_leaves_no_temporary_files() {
        let temp_dir = create_test_dir();
        let storage = FsStorage::new(temp_dir.path().to_path_buf());

        storage.save(&Page::empty(title("Guide"))).unwrap();

        let names: Vec<_> = fs::read_dir(temp_dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, vec!["Guide.txt".to_owned()]);
    }

    #[cfg(unix)]
    #[test]
    fn test_save_restricts_permissions_to_owner() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = create_test_dir();
        let storage = FsStorage::new(temp_dir.path().to_path_buf());

        storage.save(&Page::empty(title("Guide"))).unwrap();

        let mode = fs::metadata(temp_dir.path().join("Guide.txt"))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_save_missing_root_fails() {
        let temp_dir = create_test_dir();
        let storage = FsStorage::new(temp_dir.path().join("missing"));

        let err = storage.save(&Page::empty(title("Guide"))).unwrap_err();

        assert_eq!(err.backend, Some("Fs"));
        assert!(err.to_string().contains("Guide.txt"));
    }

    #[test]
    fn test_load_missing_is_not_found() {
        let temp_dir = create_test_dir();
        let storage = FsStorage::new(temp_dir.path().to_path_buf());

        let err = storage.load(&title("Missing")).unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::NotFound);
        assert!(err.downcast_source::<std::io::Error>().is_some());
    }

    #[test]
    fn test_load_directory_is_not_found() {
        let temp_dir = create_test_dir();
        fs::create_dir(temp_dir.path().join("Odd.txt")).unwrap();
        let storage = FsStorage::new(temp_dir.path().to_path_buf());

        let err = storage.load(&title("Odd")).unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::NotFound);
    }

    #[test]
    fn test_ensure_root_creates_directory() {
        let temp_dir = create_test_dir();
        let root = temp_dir.path().join("nested").join("data");
        let storage = FsStorage::new(root.clone());

        storage.ensure_root().unwrap();
        storage.save(&Page::empty(title("Guide"))).unwrap();

        assert!(root.join("Guide.txt").is_file());
    }

    #[test]
    fn test_list_titles_empty_dir() {
        let temp_dir = create_test_dir();
        let storage = FsStorage::new(temp_dir.path().to_path_buf());

        assert!(storage.list_titles(&front_page()).is_empty());
    }

    #[test]
    fn test_list_titles_missing_dir() {
        let storage = FsStorage::new(PathBuf::from("/nonexistent/wiki/data"));

        assert!(storage.list_titles(&front_page()).is_empty());
    }

    #[test]
    fn test_list_titles_excludes_front_page() {
        let temp_dir = create_test_dir();
        fs::write(temp_dir.path().join("FrontPage.txt"), "home").unwrap();
        fs::write(temp_dir.path().join("Guide.txt"), "guide").unwrap();
        let storage = FsStorage::new(temp_dir.path().to_path_buf());

        assert_eq!(storage.list_titles(&front_page()), vec![title("Guide")]);
    }

    #[test]
    fn test_list_titles_filters_and_sorts() {
        let temp_dir = create_test_dir();
        for name in [
            "Zeta.txt",
            "Alpha.txt",
            "notes.md",
            "Guide.txt.bak",
            "has space.txt",
            ".txt",
            ".hidden",
        ] {
            fs::write(temp_dir.path().join(name), "x").unwrap();
        }
        fs::create_dir(temp_dir.path().join("Dir.txt")).unwrap();
        fs::create_dir(temp_dir.path().join("nested")).unwrap();
        fs::write(temp_dir.path().join("nested").join("Inner.txt"), "x").unwrap();
        let storage = FsStorage::new(temp_dir.path().to_path_buf());

        let titles = storage.list_titles(&front_page());

        assert_eq!(titles, vec![title("Alpha"), title("Zeta")]);
    }
}
