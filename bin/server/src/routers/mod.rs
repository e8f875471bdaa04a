use axum::Router;

pub mod messages;

/// Create the main API router
pub fn create_router() -> Router {
    Router::new().nest("/messages", messages::create_router())
}
