//! Request path classification.
//!
//! Page routes follow the grammar `/<op>/<title>` with `op` one of `view`,
//! `edit`, `save` and `title` matching `[A-Za-z0-9]+`. Anything else is not a
//! page route.

use regex::Regex;
use wiki_storage::Title;

/// Page route grammar.
const PAGE_ROUTE: &str = "^/(edit|save|view)/([a-zA-Z0-9]+)$";

/// Operation addressed by a page route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Operation {
    View,
    Edit,
    Save,
}

impl Operation {
    fn from_segment(segment: &str) -> Option<Self> {
        match segment {
            "view" => Some(Self::View),
            "edit" => Some(Self::Edit),
            "save" => Some(Self::Save),
            _ => None,
        }
    }

    /// Path segment naming this operation.
    pub(crate) fn segment(self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Edit => "edit",
            Self::Save => "save",
        }
    }

    /// Request path for this operation on `title` (e.g. `/view/Guide`).
    pub(crate) fn path(self, title: &Title) -> String {
        format!("/{}/{title}", self.segment())
    }
}

/// Compiled page route grammar.
///
/// Built once at startup and shared read-only through the application state.
#[derive(Debug)]
pub(crate) struct RoutePattern {
    regex: Regex,
}

impl RoutePattern {
    /// Compile the page route grammar.
    ///
    /// # Panics
    ///
    /// Panics if the built-in pattern fails to compile, which would be a
    /// programming error.
    pub(crate) fn new() -> Self {
        Self {
            regex: Regex::new(PAGE_ROUTE).expect("page route pattern is valid"),
        }
    }

    /// Classify a request path.
    ///
    /// Returns `None` when the path is not a page route.
    pub(crate) fn classify(&self, path: &str) -> Option<(Operation, Title)> {
        let caps = self.regex.captures(path)?;
        let op = Operation::from_segment(&caps[1])?;
        let title = Title::parse(&caps[2]).ok()?;
        Some((op, title))
    }

    /// Extract the title from `path` if it is a route for `op`.
    pub(crate) fn title_for(&self, op: Operation, path: &str) -> Option<Title> {
        self.classify(path)
            .and_then(|(matched, title)| (matched == op).then_some(title))
    }
}
