use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use board_core::BoardError;
use thiserror::Error;
use tracing::error;
use validator::ValidationErrors;

use crate::dto::{FieldError, ValidationErrorResponse};

/// Errors a handler can answer with
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("ID inválido")]
    InvalidIdentifier,

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    IdMismatch(String),

    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    #[error("Content-Type deve ser application/json")]
    UnsupportedMediaType,

    #[error("{0}")]
    MalformedBody(String),

    #[error("{0}")]
    InvalidQuery(String),

    #[error("Erro interno")]
    Internal(String),
}

impl From<BoardError> for ApiError {
    fn from(err: BoardError) -> Self {
        match err {
            BoardError::MessageNotFound { .. } => ApiError::NotFound(err.to_string()),
            BoardError::IdMismatch { .. } => ApiError::IdMismatch(err.to_string()),
            BoardError::InvalidPageRequest { message } => ApiError::InvalidQuery(message),
            BoardError::Database(_) => ApiError::Internal(err.to_string()),
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<FieldError> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| FieldError {
                    field: field.to_string(),
                    message: e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string()),
                })
            })
            .collect();
        fields.sort_by(|a, b| a.field.cmp(&b.field));

        ApiError::Validation(fields)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::MissingJsonContentType(_) => ApiError::UnsupportedMediaType,
            other => ApiError::MalformedBody(other.body_text()),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::InvalidQuery(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::InvalidIdentifier => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) | ApiError::IdMismatch(_) => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ApiError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        match self {
            ApiError::Validation(errors) => {
                (status, Json(ValidationErrorResponse { errors })).into_response()
            }
            ApiError::Internal(ref detail) => {
                error!(error = %detail, "request failed");
                (status, self.to_string()).into_response()
            }
            other => (status, other.to_string()).into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use board_core::database::DatabaseError;
    use uuid::Uuid;

    #[test]
    fn test_board_errors_map_to_kinds() {
        let id = Uuid::new_v4();
        assert!(matches!(
            ApiError::from(BoardError::MessageNotFound { id }),
            ApiError::NotFound(body) if body == "Mensagem não encontrada"
        ));
        assert!(matches!(
            ApiError::from(BoardError::IdMismatch { expected: id, received: None }),
            ApiError::IdMismatch(body) if body == "mensagem não apresenta o ID correto"
        ));
        assert!(matches!(
            ApiError::from(BoardError::Database(DatabaseError::Connection("down".into()))),
            ApiError::Internal(_)
        ));
    }

    #[test]
    fn test_status_codes() {
        let cases = [
            (ApiError::InvalidIdentifier, StatusCode::BAD_REQUEST),
            (ApiError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (ApiError::IdMismatch("x".into()), StatusCode::NOT_FOUND),
            (ApiError::Validation(vec![]), StatusCode::BAD_REQUEST),
            (ApiError::UnsupportedMediaType, StatusCode::UNSUPPORTED_MEDIA_TYPE),
            (ApiError::MalformedBody("x".into()), StatusCode::BAD_REQUEST),
            (ApiError::InvalidQuery("x".into()), StatusCode::BAD_REQUEST),
            (ApiError::Internal("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }
}
