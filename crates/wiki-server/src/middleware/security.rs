//! Response headers that lock wiki pages down to plain HTML forms.

use axum::Router;
use axum::http::HeaderValue;
use axum::http::header::HeaderName;
use tower_http::set_header::SetResponseHeaderLayer;

/// Pages carry no scripts and only ever submit forms back to the wiki.
const CSP: &str = "default-src 'self'; \
                   script-src 'none'; \
                   style-src 'self' 'unsafe-inline'; \
                   img-src 'self' data:; \
                   form-action 'self'; \
                   frame-ancestors 'none'";

/// Headers set on every response, including redirects and 404s.
const PAGE_HEADERS: [(&str, &str); 3] = [
    ("content-security-policy", CSP),
    ("x-content-type-options", "nosniff"),
    ("x-frame-options", "DENY"),
];

fn header_layer(name: &'static str, value: &'static str) -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::overriding(
        HeaderName::from_static(name),
        HeaderValue::from_static(value),
    )
}

/// Wrap `router` so every response carries the page headers.
pub(crate) fn with_page_headers<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    PAGE_HEADERS
        .into_iter()
        .fold(router, |router, (name, value)| {
            router.layer(header_layer(name, value))
        })
}
