use axum::{
    extract::rejection::{FormRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

use super::error_payload::ErrorPayload;

/// Application error types
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// A request parameter failed validation; nothing was persisted
    #[error("Invalid {field}: {message}")]
    ValidationError { field: String, message: String },

    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("An error occurred while accessing the database")]
    DatabaseError(#[from] sqlx::Error),

    #[error("An error occurred while rendering the view")]
    TemplateError(#[from] minijinja::Error),
}

impl AppError {
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        AppError::ValidationError {
            field: field.to_string(),
            message: message.into(),
        }
    }

    pub fn code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::ValidationError { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::TemplateError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_type(&self) -> String {
        match self {
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::ValidationError { .. } => "VALIDATION_ERROR",
            AppError::UnsupportedMediaType(_) => "UNSUPPORTED_MEDIA_TYPE",
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::DatabaseError(_) => "DATABASE_ERROR",
            AppError::TemplateError(_) => "TEMPLATE_ERROR",
        }
        .to_string()
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            AppError::ValidationError { field, .. } => Some(json!({ "field": field })),
            _ => None,
        }
    }
}

/// Form bodies that fail to deserialize become validation errors on the
/// field serde names, e.g. "unknown field `review[user_id]`".
impl From<FormRejection> for AppError {
    fn from(rejection: FormRejection) -> Self {
        let message = rejection.body_text();
        match rejection {
            FormRejection::InvalidFormContentType(_) => AppError::UnsupportedMediaType(message),
            FormRejection::FailedToDeserializeForm(_)
            | FormRejection::FailedToDeserializeFormBody(_) => {
                match named_field(&message).map(str::to_string) {
                    Some(field) => AppError::ValidationError { field, message },
                    None => AppError::BadRequest(message),
                }
            }
            _ => AppError::BadRequest(message),
        }
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

fn named_field(message: &str) -> Option<&str> {
    ["unknown field `", "missing field `"]
        .iter()
        .find_map(|marker| {
            let (_, rest) = message.split_once(marker)?;
            rest.split_once('`').map(|(field, _)| field)
        })
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.code();
        match &self {
            AppError::DatabaseError(e) => error!("Database error: {}", e),
            AppError::TemplateError(e) => error!("Template error: {:#}", e),
            _ => {}
        }
        let error_response = ErrorPayload {
            message: self.to_string(),
            code: status.as_u16(),
            r#type: self.error_type(),
            details: self.details(),
        };

        (status, Json(error_response)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_maps_to_unprocessable_entity_with_field_details() {
        let err = AppError::validation("review_text", "can't be blank");

        assert_eq!(err.code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.to_string(), "Invalid review_text: can't be blank");
        assert_eq!(err.error_type(), "VALIDATION_ERROR");
        assert_eq!(err.details(), Some(json!({ "field": "review_text" })));
    }

    #[test]
    fn database_errors_are_internal() {
        let err = AppError::from(sqlx::Error::RowNotFound);

        assert_eq!(err.code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.error_type(), "DATABASE_ERROR");
        assert_eq!(err.details(), None);
    }

    #[test]
    fn named_field_reads_unknown_and_missing_fields() {
        assert_eq!(
            named_field("unknown field `review[user_id]`, expected one of `review[title]`"),
            Some("review[user_id]")
        );
        assert_eq!(
            named_field("missing field `review_comment[review_text]`"),
            Some("review_comment[review_text]")
        );
        assert_eq!(named_field("invalid character: found `n` at 1"), None);
        assert_eq!(named_field("invalid digit found in string"), None);
    }

    #[test]
    fn into_response_uses_error_status() {
        let response = AppError::NotFound("Review".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = AppError::Unauthorized("Missing user".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
