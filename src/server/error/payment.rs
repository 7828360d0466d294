use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::server::error::error_response;

#[derive(Error, Debug, PartialEq)]
pub enum PaymentError {
    /// The callback status is not one of success/fail/cancel.
    #[error("Invalid status '{0}'")]
    UnknownStatus(String),

    /// A field the callback cannot be processed without is absent.
    #[error("Missing callback field '{0}'")]
    MissingField(&'static str),

    /// The callback references a sale that does not exist.
    #[error("Failed to locate sale id {0}")]
    SaleNotFound(String),

    /// A successful payment arrived for a sale whose items were already released.
    #[error("Sale {0} has no items to authorize")]
    NoItemsToAuthorize(i32),
}

/// Maps payment errors to HTTP responses.
///
/// - `SaleNotFound` → 404 Not Found
/// - `NoItemsToAuthorize` → 409 Conflict
/// - Everything else → 400 Bad Request
impl IntoResponse for PaymentError {
    fn into_response(self) -> Response {
        tracing::warn!("Rejected payment callback: {}", self);
        let status = match self {
            Self::SaleNotFound(_) => StatusCode::NOT_FOUND,
            Self::NoItemsToAuthorize(_) => StatusCode::CONFLICT,
            _ => StatusCode::BAD_REQUEST,
        };
        let message = self.to_string();
        error_response(status, message)
    }
}
