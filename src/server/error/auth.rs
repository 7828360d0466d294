use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::server::error::{error_response, InternalServerError};

#[derive(Error, Debug)]
pub enum AuthError {
    /// CSRF state validation failed during the provider callback.
    ///
    /// The state in the callback URL does not match the token stored in the session.
    /// Results in a 400 Bad Request response.
    #[error("Failed to login user due to CSRF state mismatch")]
    CsrfValidationFailed,

    /// No authenticated user: neither a session user nor a valid bearer token.
    #[error("No user in session")]
    UserNotInSession,

    /// The session or token refers to a user that no longer exists.
    #[error("User {0} not found in database")]
    UserNotInDatabase(i32),

    /// The request has no `Convention` header or its key matches no convention.
    #[error("Missing or invalid convention key")]
    InvalidConvention,

    /// The caller is known but not allowed to perform the operation.
    ///
    /// The message is logged; the client only sees a generic 403.
    #[error("Access denied: {0}")]
    AccessDenied(String),

    /// A callback arrived but the session holds no last used provider.
    #[error("No authentication provider bound to the session")]
    NoProviderInSession,

    /// The requested provider is not configured.
    #[error("Unknown authentication provider '{0}'")]
    UnknownProvider(String),

    /// The provider's identity response carried no email address.
    #[error("Authentication provider did not return an email address")]
    MissingEmail,

    /// Authorization code exchange with the provider failed.
    #[error("Failed to exchange authorization code: {0}")]
    TokenExchange(String),

    /// A configured provider URL failed to parse.
    #[error(transparent)]
    InvalidUrl(#[from] url::ParseError),
}

/// Converts authentication errors into HTTP responses.
///
/// - `CsrfValidationFailed` → 400 Bad Request with "There was an issue logging you in"
/// - `UserNotInSession` / `InvalidConvention` → 401 Unauthorized
/// - `UserNotInDatabase` → 404 Not Found with "User not found"
/// - `AccessDenied` → 403 Forbidden
/// - `NoProviderInSession` / `UnknownProvider` / `MissingEmail` → 400 Bad Request
/// - Other errors → 500 Internal Server Error with generic message
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        match self {
            Self::CsrfValidationFailed => error_response(
                StatusCode::BAD_REQUEST,
                "There was an issue logging you in, please try again.",
            ),
            Self::UserNotInSession => error_response(StatusCode::UNAUTHORIZED, "Not authenticated"),
            Self::InvalidConvention => {
                error_response(StatusCode::UNAUTHORIZED, "Invalid convention key")
            }
            Self::UserNotInDatabase(_) => error_response(StatusCode::NOT_FOUND, "User not found"),
            Self::AccessDenied(_) => error_response(StatusCode::FORBIDDEN, "Access denied"),
            Self::NoProviderInSession | Self::UnknownProvider(_) | Self::MissingEmail => {
                let message = self.to_string();
                error_response(StatusCode::BAD_REQUEST, message)
            }
            err => InternalServerError(err).into_response(),
        }
    }
}
