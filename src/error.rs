use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

/// Central error type for gateway operations.
///
/// Every failure a handler can hit collapses into one of these four kinds,
/// and every kind renders as `{"error": <message>}` with its status code.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// The caller sent missing or invalid input. Never reaches Stripe.
    #[error("Invalid data: {0}")]
    Validation(String),

    /// A referenced product or price does not exist upstream.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Stripe rejected or failed a call. The message is Stripe's own
    /// user-facing message where one was returned.
    #[error("Stripe error: {0}")]
    Upstream(String),

    /// Anything else: decode surprises, missing response fields, violated
    /// invariants.
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Convenience alias for gateway results.
pub type GatewayResult<T> = Result<T, GatewayError>;

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl ResponseError for GatewayError {
    fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::Validation(_) => StatusCode::BAD_REQUEST,
            GatewayError::NotFound(_) => StatusCode::NOT_FOUND,
            GatewayError::Upstream(_) | GatewayError::Unexpected(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.to_string(),
        })
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        GatewayError::Upstream(err.to_string())
    }
}
