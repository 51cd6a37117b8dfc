use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    #[error("Dataset fetch failed: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("Record encoding failed: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Chart rendering failed: {0}")]
    Chart(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
    }
}
