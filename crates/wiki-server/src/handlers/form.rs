//! Byte-preserving form field extraction.
//!
//! Fields come from the urlencoded request body (POST, PUT, PATCH with an
//! `application/x-www-form-urlencoded` content type) followed by the query
//! string. Values are percent-decoded to raw bytes with no UTF-8 check.
//! A missing field, a missing body, or a body of another content type all
//! read as empty values; extraction never rejects the request.

use std::convert::Infallible;

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::{Method, header};
use percent_encoding::percent_decode;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Decoded form fields in request order, body fields first.
#[derive(Debug, Default)]
pub(crate) struct FormFields {
    fields: Vec<(Vec<u8>, Vec<u8>)>,
}

impl FormFields {
    /// Parse fields from an optional urlencoded body and query string.
    pub(crate) fn parse(body: Option<&[u8]>, query: Option<&str>) -> Self {
        let fields = body
            .into_iter()
            .chain(query.map(str::as_bytes))
            .flat_map(|raw| raw.split(|&b| b == b'&'))
            .filter(|pair| !pair.is_empty())
            .map(|pair| match pair.iter().position(|&b| b == b'=') {
                Some(eq) => (decode(&pair[..eq]), decode(&pair[eq + 1..])),
                None => (decode(pair), Vec::new()),
            })
            .collect();
        Self { fields }
    }

    /// First value for `name`, or empty bytes if the field is absent.
    pub(crate) fn value(&self, name: &str) -> Vec<u8> {
        self.fields
            .iter()
            .find(|(key, _)| key == name.as_bytes())
            .map(|(_, value)| value.clone())
            .unwrap_or_default()
    }
}

/// Percent-decode one urlencoded component, treating `+` as a space.
fn decode(raw: &[u8]) -> Vec<u8> {
    let spaced: Vec<u8> = raw
        .iter()
        .map(|&b| if b == b'+' { b' ' } else { b })
        .collect();
    percent_decode(&spaced).collect()
}

fn has_form_body(req: &Request) -> bool {
    let method_carries_body = matches!(*req.method(), Method::POST | Method::PUT | Method::PATCH);
    let is_form = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| {
            ct.split(';')
                .next()
                .is_some_and(|mime| mime.trim().eq_ignore_ascii_case(FORM_CONTENT_TYPE))
        });
    method_carries_body && is_form
}

impl<S> FromRequest<S> for FormFields
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let query = req.uri().query().map(str::to_owned);
        let body = if has_form_body(&req) {
            match Bytes::from_request(req, state).await {
                Ok(bytes) => Some(bytes),
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to read form body, treating as empty");
                    None
                }
            }
        } else {
            None
        };
        Ok(Self::parse(body.as_deref(), query.as_deref()))
    }
}
