use actix_web::{HttpResponse, ResponseError};
use std::fmt;

use crate::store::StoreError;

/// Application error taxonomy. Every variant maps to a stable HTTP status
/// and a JSON body of the form `{"error": ..., "details": ...}`.
#[derive(Debug)]
pub enum AppError {
    /// No resolvable identity where one is required. Distinct from
    /// `AccessDenied` so clients can tell "log in" from "not permitted".
    Unauthenticated,
    /// Identity resolved but the authorization policy said no.
    AccessDenied(String),
    /// Malformed or out-of-enum field values. Carries every violated rule
    /// found; the whole operation is rejected atomically.
    Validation(Vec<String>),
    /// An `assignedTo` value that looks like an email but resolves to no
    /// identity.
    UnknownAssignee(String),
    NotFound,
    /// Store failures are passed through unmodified; no retries.
    Store(StoreError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Unauthenticated => write!(f, "Authentication required"),
            AppError::AccessDenied(msg) => write!(f, "{msg}"),
            AppError::Validation(errors) => write!(f, "Validation failed: {}", errors.join(", ")),
            AppError::UnknownAssignee(value) => write!(f, "assignedTo email not found: {value}"),
            AppError::NotFound => write!(f, "Not found"),
            AppError::Store(e) => write!(f, "Store error: {e}"),
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Unauthenticated => HttpResponse::Unauthorized().json(serde_json::json!({
                "error": "Authentication required"
            })),
            AppError::AccessDenied(msg) => HttpResponse::Forbidden().json(serde_json::json!({
                "error": msg
            })),
            AppError::Validation(errors) => HttpResponse::BadRequest().json(serde_json::json!({
                "error": "Validation failed",
                "details": errors.join(", ")
            })),
            AppError::UnknownAssignee(_) => HttpResponse::BadRequest().json(serde_json::json!({
                "error": "assignedTo email not found"
            })),
            AppError::NotFound => HttpResponse::NotFound().json(serde_json::json!({
                "error": "Not found"
            })),
            AppError::Store(e) => {
                log::error!("store failure: {e}");
                HttpResponse::InternalServerError().json(serde_json::json!({
                    "error": "Internal server error"
                }))
            }
        }
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::Store(e)
    }
}
