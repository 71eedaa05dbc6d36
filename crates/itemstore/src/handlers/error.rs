use axum::{
    extract::rejection::{BytesRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use itemstore_core::item::ValidationError;
use itemstore_core::storage::{
    repository_error_to_status_code, validation_error_to_status_code, RepositoryError,
};

use super::response::{self, INTERNAL_ERROR, ITEM_NOT_FOUND, SERVICE_UNAVAILABLE};

/// Every failure a handler can return.
///
/// Validation messages go back to the caller. Store failures are logged and
/// replaced by a generic message. Extractor rejections keep their status and
/// text but are rendered as JSON like every other error.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Path(#[from] PathRejection),
    #[error(transparent)]
    Body(#[from] BytesRejection),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(error) => {
                let status = StatusCode::from_u16(validation_error_to_status_code(&error))
                    .unwrap_or(StatusCode::BAD_REQUEST);
                tracing::warn!(status = %status, error = %error, "Rejected request");
                response::message(status, error.to_string())
            }
            ApiError::Repository(error) => {
                let status = StatusCode::from_u16(repository_error_to_status_code(&error))
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

                let message = match &error {
                    RepositoryError::NotFound { id } => {
                        tracing::info!(id = %id, "Item not found");
                        ITEM_NOT_FOUND
                    }
                    RepositoryError::ConnectionFailed(_) => {
                        tracing::error!(error = %error, "Item store unreachable");
                        SERVICE_UNAVAILABLE
                    }
                    _ => {
                        tracing::error!(error = %error, "Item store request failed");
                        INTERNAL_ERROR
                    }
                };

                response::message(status, message)
            }
            ApiError::Path(rejection) => rejected(rejection.status(), rejection.body_text()),
            ApiError::Body(rejection) => rejected(rejection.status(), rejection.body_text()),
        }
    }
}

fn rejected(status: StatusCode, text: String) -> Response {
    tracing::warn!(status = %status, error = %text, "Rejected request");
    response::message(status, text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use serde_json::{json, Value};

    async fn render(error: ApiError) -> (StatusCode, Value) {
        let response = error.into_response();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_validation_error_is_returned_verbatim() {
        let (status, body) = render(ValidationError::MissingId.into()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({"message": "\"id\" (primary key) is required in the body"})
        );
    }

    #[tokio::test]
    async fn test_not_found() {
        let error = RepositoryError::NotFound {
            id: "abc".to_string(),
        };
        let (status, body) = render(error.into()).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"message": "Item not found"}));
    }

    #[tokio::test]
    async fn test_store_failure_hides_details() {
        let error = RepositoryError::QueryFailed("Table not found".to_string());
        let (status, body) = render(error.into()).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"message": "Internal server error"}));
    }

    #[tokio::test]
    async fn test_connection_failure_is_unavailable() {
        let error = RepositoryError::ConnectionFailed("dispatch failure".to_string());
        let (status, body) = render(error.into()).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body, json!({"message": "Service unavailable"}));
    }

    #[tokio::test]
    async fn test_path_rejection_keeps_status_as_json() {
        use axum::{
            extract::{FromRequestParts, Path},
            http::Request,
        };

        // Outside a matched route there are no path parameters to extract.
        let (mut parts, _) = Request::new(()).into_parts();
        let rejection = Path::<String>::from_request_parts(&mut parts, &())
            .await
            .unwrap_err();
        let expected_status = rejection.status();
        let expected_text = rejection.body_text();

        let (status, body) = render(rejection.into()).await;

        assert_eq!(status, expected_status);
        assert_eq!(body, json!({"message": expected_text}));
    }
}
