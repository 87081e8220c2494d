//! HTML rendering of pages and the page listing.
//!
//! Three templates make up the wiki UI: `view.html`, `edit.html`, and
//! `frontpage.html`. The defaults are compiled into the binary; a templates
//! directory can replace them. Output is HTML-escaped by minijinja based on the
//! `.html` template names.

use std::borrow::Cow;
use std::path::Path;

use minijinja::Environment;
use serde::Serialize;
use wiki_storage::{Page, PageList};

const VIEW: &str = "view.html";
const EDIT: &str = "edit.html";
const FRONT_PAGE: &str = "frontpage.html";

/// Template context for a single page.
#[derive(Serialize)]
struct PageView<'a> {
    title: &'a str,
    body: Cow<'a, str>,
}

impl<'a> From<&'a Page> for PageView<'a> {
    fn from(page: &'a Page) -> Self {
        Self {
            title: page.title.as_str(),
            body: String::from_utf8_lossy(&page.body),
        }
    }
}

/// Template context for the front page.
#[derive(Serialize)]
struct PageListView<'a> {
    pages: Vec<PageView<'a>>,
}

/// Renders wiki pages to HTML.
pub(crate) struct Renderer {
    env: Environment<'static>,
}

impl Renderer {
    /// Create a renderer, loading templates from `templates_dir` if given.
    ///
    /// # Errors
    ///
    /// Returns an error if a template is missing or fails to parse.
    pub(crate) fn new(templates_dir: Option<&Path>) -> Result<Self, minijinja::Error> {
        match templates_dir {
            Some(dir) => Self::from_dir(dir),
            None => Self::builtin(),
        }
    }

    /// Create a renderer using the templates compiled into the binary.
    pub(crate) fn builtin() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.add_template(VIEW, include_str!("../templates/view.html"))?;
        env.add_template(EDIT, include_str!("../templates/edit.html"))?;
        env.add_template(FRONT_PAGE, include_str!("../templates/frontpage.html"))?;
        Ok(Self { env })
    }

    /// Create a renderer reading templates from `dir`.
    ///
    /// All three templates are loaded eagerly so a missing file fails at
    /// startup rather than on the first request.
    pub(crate) fn from_dir(dir: &Path) -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.set_loader(minijinja::path_loader(dir.to_path_buf()));
        for name in [VIEW, EDIT, FRONT_PAGE] {
            env.get_template(name)?;
        }
        Ok(Self { env })
    }

    /// Render a page for reading.
    pub(crate) fn view(&self, page: &Page) -> Result<String, minijinja::Error> {
        self.render(VIEW, &PageView::from(page))
    }

    /// Render the edit form for a page.
    pub(crate) fn edit(&self, page: &Page) -> Result<String, minijinja::Error> {
        self.render(EDIT, &PageView::from(page))
    }

    /// Render the page listing.
    pub(crate) fn front_page(&self, list: &PageList) -> Result<String, minijinja::Error> {
        let view = PageListView {
            pages: list.pages.iter().map(PageView::from).collect(),
        };
        self.render(FRONT_PAGE, &view)
    }

    fn render<S: Serialize>(&self, name: &str, ctx: &S) -> Result<String, minijinja::Error> {
        self.env.get_template(name)?.render(ctx)
    }
}
