use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use passgen_core::CoreError;
use serde::Serialize;

#[derive(Debug)]
pub enum AppError {
    BadRequest {
        reason: &'static str,
        message: String,
    },
    RateLimited {
        retry_after_seconds: u64,
    },
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    error: String,
    reason: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    retry_after: Option<u64>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::BadRequest { reason, message } => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    success: false,
                    error: message,
                    reason,
                    retry_after: None,
                },
            ),
            AppError::RateLimited {
                retry_after_seconds,
            } => (
                StatusCode::TOO_MANY_REQUESTS,
                ErrorBody {
                    success: false,
                    error: "Rate limit exceeded".to_string(),
                    reason: "rate_limit_exceeded",
                    retry_after: Some(retry_after_seconds),
                },
            ),
            AppError::Internal(msg) => {
                // Log the real error server-side, return generic message to client
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        success: false,
                        error: "Internal server error".to_string(),
                        reason: "internal",
                        retry_after: None,
                    },
                )
            }
        };

        let retry_after = body.retry_after;
        let mut response = (status, axum::Json(body)).into_response();
        if let Some(seconds) = retry_after {
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from(seconds));
        }
        response
    }
}

impl From<CoreError> for AppError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::RateLimitExceeded {
                retry_after_seconds,
            } => AppError::RateLimited {
                retry_after_seconds,
            },
            CoreError::InvalidConfig(msg) => AppError::Internal(msg),
            other => AppError::BadRequest {
                reason: other.reason(),
                message: other.to_string(),
            },
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(e: anyhow::Error) -> Self {
        AppError::Internal(format!("{e:#}"))
    }
}
