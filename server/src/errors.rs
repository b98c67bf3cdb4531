// artisan_market/src/errors.rs

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use artisan_core::catalog::ListingError;
use artisan_core::FlowError;
use serde_json::json;
use thiserror::Error;

use crate::services::identity::AuthError;

/// Every failure a request can end in. AI failures never reach this type:
/// the generator answers them with fallbacks.
#[derive(Debug, Error)]
pub enum AppError {
  #[error("invalid request: {0}")]
  Validation(String),

  #[error("unauthorized: {0}")]
  Auth(String),

  #[error("not found: {0}")]
  NotFound(String),

  #[error("misconfigured: {0}")]
  Config(String),

  #[error("storage failure: {0}")]
  Sqlx(#[from] sqlx::Error),

  #[error("pipeline failure: {source}")]
  Workflow {
    #[from]
    source: FlowError,
  },

  #[error("internal failure: {0}")]
  Internal(String),

  /// A pipeline answered `Stop` where the handler needed it to complete.
  #[error("request pipeline stopped before completing")]
  PipelineHalted,
}

impl From<anyhow::Error> for AppError {
  fn from(err: anyhow::Error) -> Self {
    match err.downcast::<sqlx::Error>() {
      Ok(sqlx_err) => AppError::Sqlx(sqlx_err),
      Err(other) => AppError::Internal(format!("{:#}", other)),
    }
  }
}

impl From<ListingError> for AppError {
  fn from(err: ListingError) -> Self {
    AppError::Validation(err.to_string())
  }
}

impl From<AuthError> for AppError {
  fn from(err: AuthError) -> Self {
    match err {
      AuthError::InvalidGrant(m) => AppError::Config(m),
      other => AppError::Auth(other.to_string()),
    }
  }
}

impl ResponseError for AppError {
  fn status_code(&self) -> StatusCode {
    match self {
      AppError::Validation(_) => StatusCode::BAD_REQUEST,
      AppError::Auth(_) => StatusCode::UNAUTHORIZED,
      AppError::NotFound(_) => StatusCode::NOT_FOUND,
      AppError::PipelineHalted => StatusCode::CONFLICT,
      AppError::Config(_) | AppError::Sqlx(_) | AppError::Workflow { .. } | AppError::Internal(_) => {
        StatusCode::INTERNAL_SERVER_ERROR
      }
    }
  }

  fn error_response(&self) -> HttpResponse {
    let status = self.status_code();
    let body = match self {
      AppError::Validation(m) | AppError::Auth(m) | AppError::NotFound(m) => {
        tracing::warn!(status = status.as_u16(), error = %self, "Rejecting request.");
        json!({ "error": m })
      }
      AppError::PipelineHalted => {
        tracing::warn!(error = %self, "Request pipeline halted.");
        json!({ "error": "Request could not be completed." })
      }
      AppError::Sqlx(e) => {
        tracing::error!(error = %e, "Storage failure while handling request.");
        json!({ "error": "Storage is unavailable." })
      }
      AppError::Workflow { source } => {
        tracing::error!(flow_error = ?source, "Pipeline failure while handling request.");
        json!({ "error": "Request processing failed.", "detail": source.to_string() })
      }
      AppError::Config(m) | AppError::Internal(m) => {
        tracing::error!(error = %self, "Server-side failure while handling request.");
        json!({ "error": "Something went wrong on our side.", "detail": m })
      }
    };
    HttpResponse::build(status).json(body)
  }
}

pub type Result<T, E = AppError> = std::result::Result<T, E>;
