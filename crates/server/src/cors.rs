//! Origin allowlist.
//!
//! Two layers work together:
//! - `origin_gate` rejects any request whose `Origin` is not allowlisted
//!   before it reaches a handler. Requests without an `Origin` (curl,
//!   server-to-server) always pass.
//! - `OriginPolicy::cors_layer` adds the CORS response headers and answers
//!   preflights for the origins that got through.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::header::ORIGIN;
use axum::http::{HeaderValue, Method, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};
use tracing::warn;

/// Fixed set of browser origins permitted to call the API
#[derive(Debug, Clone)]
pub struct OriginPolicy {
    allowed: Vec<HeaderValue>,
}

impl OriginPolicy {
    /// Entries that aren't valid header values are logged and skipped
    pub fn new<I, S>(origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let allowed = origins
            .into_iter()
            .filter_map(|origin| {
                let origin = origin.as_ref();
                match HeaderValue::from_str(origin) {
                    Ok(value) => Some(value),
                    Err(_) => {
                        warn!("Ignoring invalid allowed origin {:?}", origin);
                        None
                    }
                }
            })
            .collect();
        Self { allowed }
    }

    pub fn allows(&self, origin: Option<&HeaderValue>) -> bool {
        match origin {
            None => true,
            Some(origin) => self.allowed.contains(origin),
        }
    }

    /// CORS headers for allowlisted origins
    pub fn cors_layer(&self) -> CorsLayer {
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(self.allowed.clone()))
            .allow_methods([
                Method::GET,
                Method::HEAD,
                Method::PUT,
                Method::PATCH,
                Method::POST,
                Method::DELETE,
            ])
            .allow_headers(AllowHeaders::mirror_request())
    }
}

/// Middleware: block requests from origins outside the allowlist
pub async fn origin_gate(
    State(policy): State<Arc<OriginPolicy>>,
    request: Request,
    next: Next,
) -> Response {
    if policy.allows(request.headers().get(ORIGIN)) {
        return next.run(request).await;
    }

    warn!(
        "Rejected {} {} from origin {:?}",
        request.method(),
        request.uri().path(),
        request.headers().get(ORIGIN)
    );
    (StatusCode::FORBIDDEN, "Not allowed by CORS").into_response()
}
