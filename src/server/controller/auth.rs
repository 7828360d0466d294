use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::{
    model::{
        api::{ErrorDto, StatusDto},
        auth::{AuthProviderDto, AuthTokenDto, AuthUrlDto, StartAuthDto, VerifyTokenDto},
    },
    server::{
        auth::DEFAULT_PROVIDER,
        error::AppError,
        middleware::session::{AuthSession, CsrfSession, ProviderSession},
        service::auth::AuthService,
        state::AppState,
        util::input::Input,
    },
};

/// Tag for grouping auth endpoints in OpenAPI documentation
pub static AUTH_TAG: &str = "auth";

/// Query parameters of the provider callback.
#[derive(Deserialize)]
pub struct CallbackParams {
    /// CSRF state, must match the value stored when the login started.
    pub state: String,
    /// Authorization code to exchange for an access token.
    pub code: String,
}

/// List the configured login providers.
#[utoipa::path(
    get,
    path = "/api/auth/providers",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Configured providers", body = Vec<AuthProviderDto>)
    ),
)]
pub async fn list_providers(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.auth_providers.list())
}

/// Begin a login.
///
/// Binds the provider to the session and returns the provider URL the client should
/// navigate to. The provider defaults to `google`.
///
/// # Returns
/// - `200 OK` - `{"auth-url": ...}`
/// - `400 Bad Request` - Unknown provider
#[utoipa::path(
    post,
    path = "/api/auth/start",
    tag = AUTH_TAG,
    request_body = StartAuthDto,
    responses(
        (status = 200, description = "Provider login URL", body = AuthUrlDto),
        (status = 400, description = "Unknown provider", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn start(
    State(state): State<AppState>,
    session: Session,
    input: Input,
) -> Result<impl IntoResponse, AppError> {
    let provider = input
        .get("provider")
        .unwrap_or_else(|| DEFAULT_PROVIDER.to_string());

    let service = auth_service(&state);
    let auth_url = service
        .start(
            &ProviderSession::new(&session),
            &CsrfSession::new(&session),
            &provider,
        )
        .await?;

    Ok(Json(AuthUrlDto { auth_url }))
}

/// Complete a login.
///
/// # Returns
/// - `200 OK` - Logged in user and a bearer token
/// - `400 Bad Request` - CSRF state mismatch or no login started in this session
#[utoipa::path(
    get,
    path = "/api/auth/callback",
    tag = AUTH_TAG,
    params(
        ("state" = String, Query, description = "CSRF state"),
        ("code" = String, Query, description = "Authorization code")
    ),
    responses(
        (status = 200, description = "Logged in", body = AuthTokenDto),
        (status = 400, description = "Invalid login state", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn callback(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<CallbackParams>,
) -> Result<impl IntoResponse, AppError> {
    let service = auth_service(&state);
    let (user, token) = service
        .callback(
            &ProviderSession::new(&session),
            &CsrfSession::new(&session),
            &AuthSession::new(&session),
            params.code,
            params.state,
        )
        .await?;

    Ok(Json(AuthTokenDto {
        status: true,
        token: token.token,
        user: user.into_dto(),
    }))
}

/// Check whether an auth token is valid.
#[utoipa::path(
    post,
    path = "/api/auth/verify",
    tag = AUTH_TAG,
    request_body = VerifyTokenDto,
    responses(
        (status = 200, description = "Token validity", body = StatusDto),
        (status = 400, description = "Missing token", body = ErrorDto)
    ),
)]
pub async fn verify(
    State(state): State<AppState>,
    input: Input,
) -> Result<impl IntoResponse, AppError> {
    let payload: VerifyTokenDto = input.deserialize()?;

    let status = auth_service(&state).verify(&payload.token).await?;

    Ok(Json(StatusDto { status }))
}

/// Log out, clearing the session and revoking the user's tokens.
#[utoipa::path(
    get,
    path = "/api/auth/logout",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Logged out", body = StatusDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn logout(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    auth_service(&state)
        .logout(&AuthSession::new(&session))
        .await?;

    Ok((StatusCode::OK, Json(StatusDto::ok())))
}

fn auth_service(state: &AppState) -> AuthService<'_> {
    AuthService::new(
        &state.db,
        &state.http_client,
        &state.auth_providers,
        &state.app_url,
    )
}
