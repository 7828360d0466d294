use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::server::{
    error::error_response,
    model::status::{SaleAction, SaleItemStatus},
};

#[derive(Error, Debug, PartialEq)]
pub enum SaleError {
    /// The action is not allowed from the item's current status.
    ///
    /// Raised from inside a cascade this aborts the whole transaction.
    #[error("Cannot {action} {kind} {id} in status {status}")]
    InvalidTransition {
        /// `ticket` or `pass`
        kind: &'static str,
        id: i32,
        status: SaleItemStatus,
        action: SaleAction,
    },

    /// A status string that is not part of the lifecycle.
    #[error("Invalid status '{0}'")]
    UnknownStatus(String),

    /// A pass still holds authorized tickets and cannot be deleted.
    #[error("Can't delete user pass {0} with authorized tickets")]
    AuthorizedTickets(i32),

    /// The pass used to book a ticket is not valid for that booking.
    #[error("Pass {pass_id} cannot be used for timeslot {timeslot_id}")]
    PassUnavailable { pass_id: i32, timeslot_id: i32 },

    /// A checkout was requested with nothing in the shopping cart.
    #[error("Shopping cart is empty")]
    EmptyCart,
}

/// All sale errors are caused by the request and map to 400 Bad Request.
impl IntoResponse for SaleError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);
        let message = self.to_string();
        error_response(StatusCode::BAD_REQUEST, message)
    }
}
