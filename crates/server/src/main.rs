//! mypoll-rs server entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::middleware;
use mypoll_api::{AppState, middleware::admin_auth_middleware, router as app_router};
use mypoll_common::Config;
use mypoll_core::PollService;
use mypoll_db::repositories::{ChoiceRepository, QuestionRepository, VoteRepository};
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Waits for a shutdown signal (SIGINT or SIGTERM).
///
/// On Unix systems, this listens for both SIGINT (Ctrl+C) and SIGTERM.
/// On Windows, this only listens for Ctrl+C.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received SIGINT, initiating graceful shutdown...");
        },
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        },
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mypoll=debug,tower_http=debug".into()),
        )
        .init();

    info!("Starting mypoll-rs server...");

    let config = match std::env::var("MYPOLL_CONFIG") {
        Ok(path) => {
            info!(path = %path, "Loading configuration file");
            Config::from_file(path)?
        }
        Err(_) => Config::load()?,
    };

    let db = mypoll_db::init(&config).await?;
    info!("Connected to database");

    info!("Running database migrations...");
    mypoll_db::migrate(&db).await?;
    info!("Migrations completed");

    let db = Arc::new(db);
    let poll_service = PollService::new(
        QuestionRepository::new(Arc::clone(&db)),
        ChoiceRepository::new(Arc::clone(&db)),
        VoteRepository::new(Arc::clone(&db)),
        config.polls.latest_limit,
    );

    if config.polls.admin_token.is_none() {
        info!("No admin token configured, admin endpoints are disabled");
    }
    let state = AppState::new(poll_service, config.polls.admin_token.clone());

    let app = app_router()
        .layer(middleware::from_fn_with_state(
            state.clone(),
            admin_auth_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let ip: std::net::IpAddr = config.server.host.parse()?;
    let addr = SocketAddr::from((ip, config.server.port));
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
