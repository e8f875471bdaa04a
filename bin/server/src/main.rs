use std::sync::Arc;

use axum::{
    extract::Extension,
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};
use tracing::{info, instrument};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod dto;
mod error;
mod routers;
mod service;

use config::Settings;
use dto::HealthStatus;
use service::BoardService;

/// Health check endpoint
#[instrument(skip(service))]
async fn healthcheck(
    Extension(service): Extension<Arc<BoardService>>,
) -> (StatusCode, Json<HealthStatus>) {
    if service.is_healthy().await {
        (
            StatusCode::OK,
            Json(HealthStatus {
                status: "healthy".to_string(),
            }),
        )
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthStatus {
                status: "unhealthy".to_string(),
            }),
        )
    }
}

/// Build the router with all routes around a ready service
fn build_app(service: Arc<BoardService>) -> Router {
    Router::new()
        .route("/healthcheck", get(healthcheck))
        .merge(routers::create_router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
                .layer(CorsLayer::permissive())
                .layer(Extension(service)),
        )
}

/// Initialize the Axum web server
async fn create_app(settings: &Settings) -> Result<(Router, Arc<BoardService>), anyhow::Error> {
    let service = Arc::new(BoardService::new(settings).await?);
    Ok((build_app(service.clone()), service))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "board_server=debug,board_core=debug,tower_http=debug,axum::rejection=trace".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let settings = Settings::load()?;
    info!("Starting message board server with settings: {:?}", settings);

    // Create the app
    let (app, service) = create_app(&settings).await?;

    // Start the server
    let listener = tokio::net::TcpListener::bind(&settings.server_address()).await?;
    info!("Server listening on {}", settings.server_address());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    service.shutdown().await?;
    info!("Server stopped");

    Ok(())
}
