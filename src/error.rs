/*
 * Responsibility
 * - demo server の AppError 定義
 * - IntoResponse 実装 (HTTP status / JSON error body)
 * - 起動時エラー (config / casbin model+policy / bind) もここに集約
 *
 * 認可拒否 (403) はここを通らない: authz middleware が空 body で返す
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("not found")]
    NotFound,

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to load casbin model/policy: {0}")]
    Enforcer(#[from] casbin::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Serialize)]
struct ErrorResponseBody {
    error: ErrorBody,
}

#[derive(Serialize)]
struct ErrorBody {
    code: &'static str,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::InvalidRequest(_) => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", self.to_string())
            }
            AppError::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND", self.to_string()),
            // Startup errors never reach a client; keep details out of the body anyway.
            AppError::Config(_) | AppError::Enforcer(_) | AppError::Io(_) => {
                tracing::error!(error = %self, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL",
                    "internal server error".to_string(),
                )
            }
        };

        let body = ErrorResponseBody {
            error: ErrorBody { code, message },
        };

        (status, Json(body)).into_response()
    }
}
