//! Page orchestration.
//!
//! [`PageService`] runs one wiki operation against storage and reports what the
//! HTTP layer should do next as an [`Outcome`]. It knows nothing about HTTP or
//! templates.

use std::sync::Arc;

use wiki_storage::{Page, PageList, Storage, StorageError, Title};

use crate::route::Operation;

/// Result of a page operation.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Outcome {
    /// Show a page.
    ViewPage(Page),
    /// Show the edit form for a page (existing or blank).
    EditPage(Page),
    /// Show the page listing.
    FrontPage(PageList),
    /// Redirect the client to a path.
    Redirect(String),
}

/// Page operation failure surfaced to the client.
#[derive(Debug, thiserror::Error)]
pub(crate) enum ServiceError {
    /// Writing a page failed.
    #[error("{source}")]
    Persistence {
        /// Page being saved.
        title: Title,
        /// Underlying storage error.
        #[source]
        source: StorageError,
    },
}

/// Orchestrates load/save/list operations on wiki pages.
pub(crate) struct PageService {
    storage: Arc<dyn Storage>,
    front_page: Title,
}

impl PageService {
    /// Create a service over `storage` with the given reserved front-page title.
    pub(crate) fn new(storage: Arc<dyn Storage>, front_page: Title) -> Self {
        Self {
            storage,
            front_page,
        }
    }

    /// Show a page, or send the client to its edit form if it does not exist.
    ///
    /// A missing front page redirects to `/` rather than to the edit form,
    /// because editing the front page redirects back here.
    pub(crate) fn view(&self, title: &Title) -> Outcome {
        match self.storage.load(title) {
            Ok(page) => Outcome::ViewPage(page),
            Err(_) if *title == self.front_page => Outcome::Redirect("/".to_owned()),
            Err(_) => Outcome::Redirect(Operation::Edit.path(title)),
        }
    }

    /// Show the edit form for a page; a missing page gets a blank form.
    pub(crate) fn edit(&self, title: &Title) -> Outcome {
        if *title == self.front_page {
            return Outcome::Redirect(Operation::View.path(&self.front_page));
        }
        let page = self
            .storage
            .load(title)
            .unwrap_or_else(|_| Page::empty(title.clone()));
        Outcome::EditPage(page)
    }

    /// Persist a page body and redirect to its view.
    pub(crate) fn save(&self, title: Title, body: Vec<u8>) -> Result<Outcome, ServiceError> {
        let page = Page::new(title, body);
        self.storage
            .save(&page)
            .map_err(|source| ServiceError::Persistence {
                title: page.title.clone(),
                source,
            })?;
        tracing::info!(title = %page.title, "Page saved");
        Ok(Outcome::Redirect(Operation::View.path(&page.title)))
    }

    /// Normalise a user-supplied title and redirect to its edit form.
    ///
    /// Whitespace and any other character outside `[A-Za-z0-9]` are dropped, so
    /// the result always matches the page route grammar. Input that normalises
    /// to nothing redirects to the front page.
    pub(crate) fn create(&self, raw_title: &str) -> Outcome {
        let normalized: String = raw_title
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .collect();
        match Title::parse(&normalized) {
            Ok(title) => {
                tracing::debug!(raw = raw_title, title = %title, "Creating page");
                Outcome::Redirect(Operation::Edit.path(&title))
            }
            Err(_) => Outcome::Redirect("/".to_owned()),
        }
    }

    /// Load every page except the front page.
    ///
    /// Pages that fail to load are skipped.
    pub(crate) fn front_page(&self) -> Outcome {
        let pages = self
            .storage
            .list_titles(&self.front_page)
            .iter()
            .filter_map(|title| {
                self.storage
                    .load(title)
                    .inspect_err(|e| {
                        tracing::warn!(title = %title, error = %e, "Skipping unreadable page");
                    })
                    .ok()
            })
            .collect();
        Outcome::FrontPage(PageList { pages })
    }
}
