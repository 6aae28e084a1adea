//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
    #[error("invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
    #[error("invalid request schema {id}: {reason}")]
    Schema { id: &'static str, reason: String },
}

/// Outcome taxonomy of a scoped database call. Zero-row reads are not errors here;
/// handlers turn them into [`AppError::NotFound`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Pool exhausted, closed, or backend unreachable before the call was issued.
    #[error("database unavailable: {0}")]
    ResourceUnavailable(String),
    /// Procedure raised, connection dropped mid-call, or the call timed out.
    #[error("{0}")]
    Backend(String),
    /// Backend rejected the bound parameters; the message is the backend's own.
    #[error("{0}")]
    ValidationDeferred(String),
}

impl SessionError {
    /// Error raised while leasing a session from the pool.
    pub fn unavailable(e: sqlx::Error) -> Self {
        SessionError::ResourceUnavailable(e.to_string())
    }

    /// Error raised by a statement issued on a leased session.
    pub fn from_backend(e: sqlx::Error) -> Self {
        match &e {
            sqlx::Error::Database(db) => {
                let rejected = db.code().map(|c| rejects_parameters(&c)).unwrap_or(false);
                if rejected {
                    SessionError::ValidationDeferred(db.message().to_string())
                } else {
                    SessionError::Backend(db.message().to_string())
                }
            }
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => SessionError::unavailable(e),
            _ => SessionError::Backend(e.to_string()),
        }
    }

    /// Message passed through to the client as `details`.
    pub fn details(&self) -> &str {
        match self {
            SessionError::ResourceUnavailable(m)
            | SessionError::Backend(m)
            | SessionError::ValidationDeferred(m) => m,
        }
    }
}

/// SQLSTATE classes meaning "the arguments were refused": data exceptions (22),
/// integrity constraint violations (23) and user `SIGNAL SQLSTATE '45000'`.
pub(crate) fn rejects_parameters(sqlstate: &str) -> bool {
    sqlstate == "45000" || sqlstate.starts_with("22") || sqlstate.starts_with("23")
}

#[derive(Error, Debug)]
pub enum AppError {
    /// Message is the full client-facing text, e.g. "No hardware items found".
    #[error("{0}")]
    NotFound(&'static str),
    #[error("validation: {0}")]
    Validation(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    /// Server-side fault unrelated to the request's content.
    #[error("internal: {0}")]
    Internal(String),
    #[error("{action}: {source}")]
    Session {
        action: &'static str,
        #[source]
        source: SessionError,
    },
}

impl AppError {
    /// Attach the client-facing action message to a session failure.
    pub fn session(action: &'static str) -> impl FnOnce(SessionError) -> AppError {
        move |source| AppError::Session { action, source }
    }
}

#[derive(Serialize, Debug, PartialEq)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::NotFound(message) => (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    error: message.to_string(),
                    details: None,
                },
            ),
            AppError::Validation(reason) | AppError::BadRequest(reason) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    error: "Invalid request".into(),
                    details: Some(reason),
                },
            ),
            AppError::Internal(reason) => {
                tracing::error!(error = %reason, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        error: "Internal server error".into(),
                        details: None,
                    },
                )
            }
            AppError::Session { action, source } => {
                let status = match &source {
                    SessionError::ResourceUnavailable(_) => {
                        tracing::error!(action, error = %source, "database unavailable");
                        StatusCode::INTERNAL_SERVER_ERROR
                    }
                    SessionError::Backend(_) => {
                        tracing::error!(action, error = %source, "stored procedure failed");
                        StatusCode::INTERNAL_SERVER_ERROR
                    }
                    SessionError::ValidationDeferred(_) => {
                        tracing::warn!(action, error = %source, "backend rejected parameters");
                        StatusCode::BAD_REQUEST
                    }
                };
                (
                    status,
                    ErrorBody {
                        error: action.to_string(),
                        details: Some(source.details().to_string()),
                    },
                )
            }
        };
        (status, Json(body)).into_response()
    }
}
