//! Page storage abstraction for the wiki server.
//!
//! This crate provides a [`Storage`] trait that maps page titles to page bodies,
//! independent of where the bytes actually live. This enables:
//!
//! - **Unit testing** of page orchestration without touching the real filesystem
//! - **Clean separation** between request handling and I/O
//!
//! # Architecture
//!
//! The crate provides:
//! - [`Title`], the only way to name a page; construction validates the title
//! - [`Page`] and [`PageList`] value types
//! - [`Storage`] trait with `load()`, `save()`, and `list_titles()` methods
//! - [`MockStorage`] for testing (behind `mock` feature flag)
//!
//! # Example
//!
//! ```ignore
//! use wiki_storage::{Page, Storage, Title};
//!
//! let title = Title::parse("HelloWorld")?;
//! storage.save(&Page::new(title.clone(), b"Hi there".to_vec()))?;
//! let page = storage.load(&title)?;
//! ```

#[cfg(feature = "mock")]
mod mock;
mod page;
mod storage;

#[cfg(feature = "mock")]
pub use mock::MockStorage;
pub use page::{PAGE_EXTENSION, Page, PageList, Title};
pub use storage::{Storage, StorageError, StorageErrorKind};
