use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

use crate::store::DbError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(&'static str),

    #[error("{context}: {source}")]
    Storage {
        context: &'static str,
        #[source]
        source: DbError,
    },

    #[error("Blocking task was cancelled")]
    Blocking(#[from] actix_web::error::BlockingError),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation(message.into())
    }

    /// Wraps a store failure, logging it once with its operation context.
    pub fn storage(context: &'static str) -> impl FnOnce(DbError) -> Self {
        move |source| {
            log::error!("{context}: {source}");
            ApiError::Storage { context, source }
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Storage { .. } | ApiError::Blocking(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() }))
    }
}
