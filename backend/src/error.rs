//! API error type and the JSON bodies shared by all endpoints.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use records_core::RecordsError;
use serde::{Deserialize, Serialize};

/// `{"error": "..."}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// `{"message": "..."}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageBody {
    pub message: String,
}

impl MessageBody {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("Unauthorized. Invalid API Key.")]
    Unauthorized,

    /// Malformed body or missing query parameter
    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Records(#[from] RecordsError),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Records(err) => match err {
                RecordsError::Validation(_) => StatusCode::BAD_REQUEST,
                RecordsError::NotFound(_) => StatusCode::NOT_FOUND,
                RecordsError::Conflict(_) => StatusCode::CONFLICT,
                RecordsError::Blocked(_) => StatusCode::BAD_REQUEST,
            },
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let cases = [
            (ApiError::Unauthorized, StatusCode::UNAUTHORIZED),
            (ApiError::BadRequest("x".into()), StatusCode::BAD_REQUEST),
            (RecordsError::Validation("x".into()).into(), StatusCode::BAD_REQUEST),
            (RecordsError::NotFound("x".into()).into(), StatusCode::NOT_FOUND),
            (RecordsError::Conflict("x".into()).into(), StatusCode::CONFLICT),
            (RecordsError::Blocked("x".into()).into(), StatusCode::BAD_REQUEST),
        ];

        for (err, expected) in cases {
            assert_eq!(err.status_code(), expected, "{:?}", err);
        }
    }

    #[test]
    fn test_records_message_passes_through() {
        let err: ApiError = RecordsError::NotFound("Career not found.".into()).into();
        assert_eq!(err.to_string(), "Career not found.");
        assert_eq!(err.error_response().status(), StatusCode::NOT_FOUND);
    }
}
