//! HTTP request handlers.

pub(crate) mod form;
pub(crate) mod pages;

use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Response};

use crate::error::ServerError;
use crate::service::Outcome;
use crate::state::AppState;

/// Turn a page operation outcome into an HTTP response.
///
/// Pages are rendered through the state's renderer; redirects use `302 Found`.
pub(crate) fn respond(state: &AppState, outcome: Outcome) -> Result<Response, ServerError> {
    let response = match outcome {
        Outcome::ViewPage(page) => Html(state.renderer.view(&page)?).into_response(),
        Outcome::EditPage(page) => Html(state.renderer.edit(&page)?).into_response(),
        Outcome::FrontPage(list) => Html(state.renderer.front_page(&list)?).into_response(),
        Outcome::Redirect(location) => {
            (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
        }
    };
    Ok(response)
}

/// Fallback for paths outside the registered routes.
pub(crate) async fn not_found() -> ServerError {
    ServerError::NotFound
}
