use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

/// JSON error body shared by every endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Present only on degraded list responses, always empty
    #[serde(skip_serializing_if = "Option::is_none")]
    pub events: Option<Vec<serde_json::Value>>,
}

#[derive(Debug)]
pub enum AppError {
    BadRequest {
        message: String,
        details: Option<String>,
    },
    NotFound {
        message: String,
    },
    InternalServerError {
        message: String,
        details: Option<String>,
        empty_events: bool,
    },
}

impl AppError {
    pub fn bad_request(message: &str) -> Self {
        Self::BadRequest {
            message: message.to_string(),
            details: None,
        }
    }

    pub fn bad_request_with_details(message: &str, details: &str) -> Self {
        Self::BadRequest {
            message: message.to_string(),
            details: Some(details.to_string()),
        }
    }

    pub fn not_found(message: &str) -> Self {
        Self::NotFound {
            message: message.to_string(),
        }
    }

    pub fn internal_server_error(message: &str) -> Self {
        Self::InternalServerError {
            message: message.to_string(),
            details: None,
            empty_events: false,
        }
    }

    pub fn internal_server_error_with_details(
        message: &str, details: &str,
    ) -> Self {
        Self::InternalServerError {
            message: message.to_string(),
            details: Some(details.to_string()),
            empty_events: false,
        }
    }

    /// Adds `"events": []` to a server error body so list consumers always
    /// find an array.
    pub fn with_empty_events(self) -> Self {
        match self {
            Self::InternalServerError {
                message, details, ..
            } => Self::InternalServerError {
                message,
                details,
                empty_events: true,
            },
            other => other,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::InternalServerError { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn to_response_data(&self) -> ApiErrorResponse {
        match self {
            Self::BadRequest { message, details } => ApiErrorResponse {
                error: message.clone(),
                details: details.clone(),
                events: None,
            },
            Self::NotFound { message } => ApiErrorResponse {
                error: message.clone(),
                details: None,
                events: None,
            },
            Self::InternalServerError {
                message,
                details,
                empty_events,
            } => ApiErrorResponse {
                error: message.clone(),
                details: details.clone(),
                events: empty_events.then(Vec::new),
            },
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadRequest { message, .. } | Self::NotFound { message } => {
                write!(f, "{}", message)
            }
            Self::InternalServerError { message, details, .. } => {
                match details {
                    Some(details) => write!(f, "{}: {}", message, details),
                    None => write!(f, "{}", message),
                }
            }
        }
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("{}", self);
        }
        let response_data = self.to_response_data();
        (status, Json(response_data)).into_response()
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::internal_server_error_with_details(
            "An unexpected error occurred",
            &err.to_string(),
        )
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;

    use super::*;

    async fn body_json(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_bad_request_body_has_only_error() {
        let (status, json) =
            body_json(AppError::bad_request("Invalid event data")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json, serde_json::json!({"error": "Invalid event data"}));
    }

    #[tokio::test]
    async fn test_internal_error_carries_details() {
        let (status, json) = body_json(
            AppError::internal_server_error_with_details(
                "Failed to process event",
                "pool closed",
            ),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"], "Failed to process event");
        assert_eq!(json["details"], "pool closed");
        assert!(json.get("events").is_none());
    }

    #[tokio::test]
    async fn test_degraded_list_error_has_empty_events() {
        let (status, json) = body_json(
            AppError::internal_server_error_with_details(
                "Failed to retrieve events",
                "pool closed",
            )
            .with_empty_events(),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["events"], serde_json::json!([]));
    }

    #[test]
    fn test_with_empty_events_leaves_bad_request_alone() {
        let err = AppError::bad_request("Invalid event data").with_empty_events();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_not_found_body() {
        let (status, json) = body_json(AppError::not_found("Not found")).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json, serde_json::json!({"error": "Not found"}));
    }
}
