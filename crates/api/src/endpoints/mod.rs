//! HTTP endpoints.

mod admin;
mod polls;
mod questions;

use axum::{Router, response::Redirect, routing::get};

use crate::middleware::AppState;

/// Create the application router.
///
/// HTML pages live under `/polls/`, the JSON API under `/api`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(|| async { Redirect::permanent("/polls/") }))
        .merge(polls::router())
        .nest(
            "/api",
            Router::new()
                .merge(questions::router())
                .nest("/admin", admin::router()),
        )
}
