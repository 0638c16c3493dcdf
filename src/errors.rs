use axum::http::StatusCode;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while producing the daily report: talking to the nutrition
/// service, reading or writing the cache file, or parsing an exported CSV.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to nutrition service failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("nutrition service returned HTTP {0}")]
    Upstream(StatusCode),
    #[error("cache file error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse cached data: {0}")]
    Json(#[from] serde_json::Error),
    #[error("input file '{}' was not found", .0.display())]
    MissingInput(PathBuf),
    #[error("malformed input: {0}")]
    Malformed(String),
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<FetchError> for AppError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::Http(_) | FetchError::Upstream(_) => Self {
                status: StatusCode::BAD_GATEWAY,
                message: err.to_string(),
            },
            other => Self::internal(other),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
