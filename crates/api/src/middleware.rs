//! API middleware.

#![allow(missing_docs)]

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{Request, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};
use mypoll_core::PollService;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use tracing::warn;

/// Application state.
#[derive(Clone)]
pub struct AppState {
    pub poll_service: PollService,
    /// Token that unlocks the admin endpoints; `None` disables them.
    pub admin_token: Option<Arc<str>>,
}

impl AppState {
    #[must_use]
    pub fn new(poll_service: PollService, admin_token: Option<String>) -> Self {
        Self {
            poll_service,
            admin_token: admin_token.map(Arc::from),
        }
    }
}

/// Marker placed in request extensions once the admin token checked out.
#[derive(Debug, Clone, Copy)]
pub struct AdminSession;

/// Admin authentication middleware.
///
/// Never rejects on its own; handlers that need an admin use the
/// [`crate::extractors::AdminAuth`] extractor.
pub async fn admin_auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    if let Some(auth_header) = req.headers().get(AUTHORIZATION)
        && let Ok(auth_str) = auth_header.to_str()
        && let Some(token) = auth_str.strip_prefix("Bearer ")
    {
        match state.admin_token.as_deref() {
            Some(expected) if token_matches(expected, token) => {
                req.extensions_mut().insert(AdminSession);
            }
            _ => warn!(path = %req.uri().path(), "Rejected admin token"),
        }
    }

    next.run(req).await
}

/// Compare tokens without leaking where they differ.
///
/// Both sides are hashed first so the comparison runs over equal-length
/// digests whatever the token lengths are.
fn token_matches(expected: &str, presented: &str) -> bool {
    let expected = Sha256::digest(expected.as_bytes());
    let presented = Sha256::digest(presented.as_bytes());
    bool::from(expected.as_slice().ct_eq(presented.as_slice()))
}
