//! Server error type and its HTTP mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::service::ServiceError;

/// Errors returned by request handlers.
#[derive(Debug, thiserror::Error)]
pub(crate) enum ServerError {
    /// Path is not a registered route.
    #[error("404 page not found")]
    NotFound,
    /// A page operation failed.
    #[error("{0}")]
    Service(#[from] ServiceError),
    /// A template failed to render.
    #[error("{0}")]
    Render(#[from] minijinja::Error),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Service(ServiceError::Persistence { title, .. }) => {
                tracing::error!(title = %title, error = %self, "Failed to save page");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Render(_) => {
                tracing::error!(error = %self, "Failed to render template");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, format!("{self}\n")).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_status() {
        let response = ServerError::NotFound.into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_render_error_status() {
        let err = minijinja::Error::new(minijinja::ErrorKind::TemplateNotFound, "view.html");

        let response = ServerError::from(err).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
