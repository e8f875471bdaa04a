use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Extension, Path, Query,
    },
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::{CreateMessageRequest, MessageResponse, PageQuery, PageResponse, UpdateMessageRequest},
    error::ApiError,
    service::BoardService,
};

/// Create messages router
pub fn create_router() -> Router {
    Router::new()
        .route("/", get(list_messages).post(create_message))
        .route(
            "/:id",
            get(get_message).put(update_message).delete(delete_message),
        )
}

fn parse_id(id: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(id).map_err(|_| ApiError::InvalidIdentifier)
}

/// Post a new message
#[instrument(skip_all)]
async fn create_message(
    Extension(service): Extension<Arc<BoardService>>,
    payload: Result<Json<CreateMessageRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let Json(request) = payload?;
    request.validate()?;

    let message = service.messages().create(request.into()).await?;
    Ok((StatusCode::CREATED, Json(message.into())))
}

/// Get a message by id
#[instrument(skip(service))]
async fn get_message(
    Extension(service): Extension<Arc<BoardService>>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = parse_id(&id)?;

    let message = service.messages().get(id).await?;
    Ok(Json(message.into()))
}

/// Edit the content of a message
#[instrument(skip(service, payload))]
async fn update_message(
    Extension(service): Extension<Arc<BoardService>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateMessageRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let id = parse_id(&id)?;
    let Json(request) = payload?;
    request.validate()?;

    let message = service.messages().update(id, request.into()).await?;
    Ok((StatusCode::ACCEPTED, Json(message.into())))
}

/// Delete a message
#[instrument(skip(service))]
async fn delete_message(
    Extension(service): Extension<Arc<BoardService>>,
    Path(id): Path<String>,
) -> Result<(StatusCode, &'static str), ApiError> {
    let id = parse_id(&id)?;

    service.messages().delete(id).await?;
    Ok((StatusCode::OK, "mensagem removida"))
}

/// List messages one page at a time
#[instrument(skip_all)]
async fn list_messages(
    Extension(service): Extension<Arc<BoardService>>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<PageResponse>, ApiError> {
    let Query(query) = query?;

    let page = service.messages().list(query.into()).await?;
    Ok(Json(page.into()))
}
