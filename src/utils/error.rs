use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use std::time::Duration;
use thiserror::Error;

use crate::models::Envelope;

const REDACTED_MESSAGE: &str = "Internal server error";

/// Every failure a user request can end in. The HTTP translation lives in
/// the `ResponseError` impl below, so handlers just return `Result<_, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    InvalidRequest(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("{operation} timed out after {budget:?}")]
    Timeout {
        operation: &'static str,
        budget: Duration,
    },
}

impl AppError {
    pub fn is_internal(&self) -> bool {
        matches!(self, AppError::DatabaseError(_) | AppError::Timeout { .. })
    }
}

impl From<mongodb::error::Error> for AppError {
    fn from(err: mongodb::error::Error) -> Self {
        AppError::DatabaseError(err.to_string())
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidRequest(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::DatabaseError(_) | AppError::Timeout { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        // Driver text stays in the logs, never in the response body.
        let message = if self.is_internal() {
            log::error!("❌ {}", self);
            REDACTED_MESSAGE.to_string()
        } else {
            log::warn!("⚠️ {}", self);
            self.to_string()
        };

        HttpResponse::build(self.status_code()).json(Envelope::new(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    async fn body_of(err: AppError) -> serde_json::Value {
        let bytes = to_bytes(err.error_response().into_body()).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::InvalidRequest("bad".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Validation("name is required".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::NotFound("gone".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::DatabaseError("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::Timeout { operation: "find user", budget: Duration::from_secs(10) }
                .status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[actix_web::test]
    async fn test_client_errors_keep_their_message() {
        let body = body_of(AppError::Validation("name: field is required".into())).await;
        assert_eq!(body["data"], "name: field is required");
    }

    #[actix_web::test]
    async fn test_internal_errors_are_redacted() {
        let body = body_of(AppError::DatabaseError("connection reset by 10.0.0.3".into())).await;
        assert_eq!(body["data"], REDACTED_MESSAGE);

        let body = body_of(AppError::Timeout {
            operation: "list users",
            budget: Duration::from_millis(5),
        })
        .await;
        assert_eq!(body["data"], REDACTED_MESSAGE);
    }
}
