use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use rust_decimal::Decimal;
use sea_orm::error::DbErr;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use utoipa::ToSchema;

/// Whether raw store error text may be included in HTTP error bodies.
/// Switched on at startup for every environment except production.
static EXPOSE_INTERNAL_DETAILS: AtomicBool = AtomicBool::new(false);

pub fn set_expose_internal_details(enabled: bool) {
    EXPOSE_INTERNAL_DETAILS.store(enabled, Ordering::Relaxed);
}

fn expose_internal_details() -> bool {
    EXPOSE_INTERNAL_DETAILS.load(Ordering::Relaxed)
}

fn current_request_id() -> Option<String> {
    crate::tracing::current_request_id().map(|rid| rid.as_str().to_string())
}

/// Error body returned by every endpoint
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "error": "Bad Request",
    "kind": "quantity_exceeded",
    "message": "Offered quantity 41 exceeds remaining accepted quantity 40",
    "context": { "offered": "41", "available": "40" },
    "request_id": "req-abc123xyz",
    "timestamp": "2025-03-09T10:30:00.000Z"
}))]
pub struct ErrorResponse {
    /// HTTP status category (e.g., "Not Found", "Bad Request")
    pub error: String,
    /// Stable, machine-readable error kind
    pub kind: String,
    /// Human-readable error description
    pub message: String,
    /// Structured data attached to business rejections
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub context: Option<serde_json::Value>,
    /// Raw internal error text, omitted in production
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    /// ISO 8601 timestamp when error occurred
    pub timestamp: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Missing field: {0}")]
    MissingField(String),

    #[error("Upstream call not approved: {0}")]
    UpstreamNotApproved(String),

    #[error("Heat {heat_number} not found on raw material call {rm_ic_number}")]
    HeatNotFound {
        rm_ic_number: String,
        heat_number: String,
    },

    #[error("Offered quantity {offered} exceeds remaining accepted quantity {available}")]
    QuantityExceeded { offered: Decimal, available: Decimal },

    #[error("Sequence counter not initialized for call type {0}")]
    SequenceNotInitialized(String),

    #[error("Unknown sequence type: {0}")]
    UnknownSequenceType(String),

    #[error("Transient store error: {0}")]
    TransientStoreError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    DatabaseError(DbErr),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<DbErr> for ServiceError {
    fn from(err: DbErr) -> Self {
        ServiceError::db_error(err)
    }
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(err: validator::ValidationErrors) -> Self {
        ServiceError::ValidationError(err.to_string())
    }
}

/// Fragments of driver messages that identify a lock conflict the caller may retry.
const TRANSIENT_MARKERS: [&str; 7] = [
    "deadlock detected",
    "could not serialize access",
    "lock timeout",
    "canceling statement due to lock timeout",
    "could not obtain lock",
    "database is locked",
    "database table is locked",
];

impl ServiceError {
    /// Classifies a store error as transient (safe to retry the whole operation) or fatal.
    pub fn db_error(error: DbErr) -> Self {
        let text = error.to_string().to_ascii_lowercase();
        if TRANSIENT_MARKERS.iter().any(|marker| text.contains(marker))
            || text.contains("sqlite_busy")
        {
            ServiceError::TransientStoreError(error.to_string())
        } else {
            ServiceError::DatabaseError(error)
        }
    }

    pub fn missing(field: &str) -> Self {
        ServiceError::MissingField(field.to_string())
    }

    pub fn is_transient(&self) -> bool {
        matches!(self, Self::TransientStoreError(_))
    }

    /// True for errors an operator must act on rather than the caller.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::SequenceNotInitialized(_) | Self::UnknownSequenceType(_)
        )
    }

    /// Stable snake_case name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ValidationError(_) => "validation_error",
            Self::MissingField(_) => "missing_field",
            Self::UpstreamNotApproved(_) => "upstream_not_approved",
            Self::HeatNotFound { .. } => "heat_not_found",
            Self::QuantityExceeded { .. } => "quantity_exceeded",
            Self::SequenceNotInitialized(_) => "sequence_not_initialized",
            Self::UnknownSequenceType(_) => "unknown_sequence_type",
            Self::TransientStoreError(_) => "transient_store_error",
            Self::NotFound(_) => "not_found",
            Self::DatabaseError(_) => "database_error",
            Self::InternalError(_) => "internal_error",
        }
    }

    /// Returns the HTTP status code for this error.
    /// This is the single source of truth for error-to-status mapping.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::ValidationError(_)
            | Self::MissingField(_)
            | Self::UpstreamNotApproved(_)
            | Self::HeatNotFound { .. }
            | Self::QuantityExceeded { .. }
            | Self::UnknownSequenceType(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::TransientStoreError(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::SequenceNotInitialized(_) | Self::DatabaseError(_) | Self::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Returns the error message suitable for HTTP responses.
    /// Internal errors return generic messages to avoid leaking implementation details.
    pub fn response_message(&self) -> String {
        match self {
            Self::DatabaseError(_) => "Database error".to_string(),
            Self::InternalError(_) => "Internal server error".to_string(),
            Self::TransientStoreError(_) => {
                "The store is busy; retry the whole request".to_string()
            }
            _ => self.to_string(),
        }
    }

    /// Structured payload for business rejections that carry numbers.
    pub fn context(&self) -> Option<serde_json::Value> {
        match self {
            Self::QuantityExceeded { offered, available } => Some(serde_json::json!({
                "offered": offered,
                "available": available,
            })),
            Self::HeatNotFound {
                rm_ic_number,
                heat_number,
            } => Some(serde_json::json!({
                "rm_ic_number": rm_ic_number,
                "heat_number": heat_number,
            })),
            _ => None,
        }
    }

    fn internal_details(&self) -> Option<String> {
        match self {
            Self::DatabaseError(e) => Some(e.to_string()),
            Self::TransientStoreError(msg) | Self::InternalError(msg) => Some(msg.clone()),
            _ => None,
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if self.is_configuration_error() {
            tracing::error!(kind = self.kind(), error = %self, "Configuration error surfaced to caller");
        }

        let details = if expose_internal_details() {
            self.internal_details()
        } else {
            None
        };

        let body = ErrorResponse {
            error: status.canonical_reason().unwrap_or("Error").to_string(),
            kind: self.kind().to_string(),
            message: self.response_message(),
            context: self.context(),
            details,
            request_id: current_request_id(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        (status, Json(body)).into_response()
    }
}

pub type AppError = ServiceError;
