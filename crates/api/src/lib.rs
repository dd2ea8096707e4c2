//! HTTP layer for mypoll-rs.
//!
//! This crate provides the web surface:
//!
//! - **Pages**: server-rendered HTML for listing, voting and results
//! - **Endpoints**: JSON API for questions, votes and administration
//! - **Extractors / Middleware**: admin bearer-token authentication
//!
//! Built on Axum 0.8 with Tower middleware stack.

pub mod endpoints;
pub mod extractors;
pub mod middleware;
pub mod pages;
pub mod response;

pub use endpoints::router;
pub use middleware::AppState;
