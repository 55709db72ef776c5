//! Store errors and their HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("todo {0} not found")]
    NotFound(u64),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// JSON body returned with every error status.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

impl IntoResponse for StoreError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            StoreError::NotFound(_) => (StatusCode::NOT_FOUND, "Todo not found".to_string()),
            StoreError::InvalidInput(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
        };
        (status, Json(ErrorBody { detail })).into_response()
    }
}
