//! Page endpoints.
//!
//! `view`, `edit`, and `save` re-check the full request path against the page
//! route grammar before touching storage; a mismatch is a plain 404.

use std::sync::Arc;

use axum::extract::State;
use axum::http::Uri;
use axum::response::Response;
use wiki_storage::Title;

use crate::error::ServerError;
use crate::handlers::form::FormFields;
use crate::handlers::respond;
use crate::route::Operation;
use crate::state::AppState;

fn page_title(state: &AppState, op: Operation, uri: &Uri) -> Result<Title, ServerError> {
    state
        .routes
        .title_for(op, uri.path())
        .ok_or(ServerError::NotFound)
}

/// Handle /view/{title}.
pub(crate) async fn view(
    State(state): State<Arc<AppState>>,
    uri: Uri,
) -> Result<Response, ServerError> {
    let title = page_title(&state, Operation::View, &uri)?;
    respond(&state, state.pages.view(&title))
}

/// Handle /edit/{title}.
pub(crate) async fn edit(
    State(state): State<Arc<AppState>>,
    uri: Uri,
) -> Result<Response, ServerError> {
    let title = page_title(&state, Operation::Edit, &uri)?;
    respond(&state, state.pages.edit(&title))
}

/// Handle /save/{title} with form field `body`.
pub(crate) async fn save(
    State(state): State<Arc<AppState>>,
    uri: Uri,
    form: FormFields,
) -> Result<Response, ServerError> {
    let title = page_title(&state, Operation::Save, &uri)?;
    let outcome = state.pages.save(title, form.value("body"))?;
    respond(&state, outcome)
}

/// Handle /create/ with form field `title`.
pub(crate) async fn create(
    State(state): State<Arc<AppState>>,
    form: FormFields,
) -> Result<Response, ServerError> {
    let raw_title = String::from_utf8_lossy(&form.value("title")).into_owned();
    respond(&state, state.pages.create(&raw_title))
}

/// Handle / (page listing).
pub(crate) async fn front_page(
    State(state): State<Arc<AppState>>,
) -> Result<Response, ServerError> {
    respond(&state, state.pages.front_page())
}
