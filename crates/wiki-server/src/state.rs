//! Application state.
//!
//! Shared, read-only state for all request handlers.

use crate::render::Renderer;
use crate::route::RoutePattern;
use crate::service::PageService;

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Compiled page route grammar.
    pub(crate) routes: RoutePattern,
    /// Page operations against storage.
    pub(crate) pages: PageService,
    /// HTML renderer.
    pub(crate) renderer: Renderer,
}

impl AppState {
    pub(crate) fn new(pages: PageService, renderer: Renderer) -> Self {
        Self {
            routes: RoutePattern::new(),
            pages,
            renderer,
        }
    }
}
