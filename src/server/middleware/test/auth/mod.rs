use axum::http::{HeaderMap, HeaderValue};
use chrono::{Duration, Utc};

use crate::server::{
    data::auth_token::AuthTokenRepository,
    error::{auth::AuthError, internal::InternalError, AppError},
    middleware::{
        auth::{AuthGuard, ConventionGuard},
        session::AuthSession,
    },
};
use test_utils::{builder::TestBuilder, factory};

mod convention_guard;
mod user;

/// Builds request headers from name/value pairs.
fn headers(pairs: &[(&'static str, &str)]) -> HeaderMap {
    let mut headers = HeaderMap::new();
    for (name, value) in pairs {
        headers.insert(*name, HeaderValue::from_str(value).unwrap());
    }
    headers
}
