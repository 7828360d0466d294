use axum::{extract::State, http::HeaderMap, response::IntoResponse, Json};
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        sale::{CartDto, ReservePassDto, ReserveTicketDto, TicketDto, UserPassDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, ConventionGuard},
        model::{pass::CreateUserPassParams, ticket::CreateTicketParams},
        service::cart::CartService,
        state::AppState,
        util::input::Input,
    },
};

/// Tag for grouping shopping cart endpoints in OpenAPI documentation
pub static CART_TAG: &str = "cart";

/// Show the user's shopping cart.
///
/// # Returns
/// - `200 OK` - Reserved tickets and passes with their total
/// - `401 Unauthorized` - Not logged in or unknown convention
#[utoipa::path(
    get,
    path = "/api/cart",
    tag = CART_TAG,
    params(
        ("Convention" = String, Header, description = "Convention API key")
    ),
    responses(
        (status = 200, description = "Cart contents", body = CartDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_cart(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let access = ConventionGuard::new(&state.db).require(&headers).await?;
    let user = AuthGuard::new(&state.db, &session)
        .require(&headers)
        .await?;

    let items = CartService::new(&state.db)
        .contents(access.convention.id, user.id)
        .await?;

    Ok(Json(items.into_cart_dto()))
}

/// Put a pass in the user's cart.
///
/// The pass is priced at its nominal price less the user's active coupons.
///
/// # Returns
/// - `200 OK` - The reserved pass
/// - `400 Bad Request` - Malformed body
/// - `401 Unauthorized` - Not logged in or unknown convention
/// - `404 Not Found` - Pass is not sold by this convention
#[utoipa::path(
    post,
    path = "/api/cart/passes",
    tag = CART_TAG,
    params(
        ("Convention" = String, Header, description = "Convention API key")
    ),
    request_body = ReservePassDto,
    responses(
        (status = 200, description = "Pass reserved", body = UserPassDto),
        (status = 400, description = "Malformed body", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 404, description = "Pass not found", body = ErrorDto)
    ),
)]
pub async fn reserve_pass(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    input: Input,
) -> Result<impl IntoResponse, AppError> {
    let access = ConventionGuard::new(&state.db).require(&headers).await?;
    let user = AuthGuard::new(&state.db, &session)
        .require(&headers)
        .await?;
    let payload: ReservePassDto = input.deserialize()?;

    let pass = CartService::new(&state.db)
        .add_pass(
            access.convention.id,
            CreateUserPassParams {
                user_id: user.id,
                pass_id: payload.pass_id,
                name: payload.name,
                price: None,
            },
        )
        .await?;

    Ok(Json(pass.into_dto()))
}

/// Book a timeslot with one of the user's passes.
///
/// # Returns
/// - `200 OK` - The reserved ticket
/// - `400 Bad Request` - Malformed body, or the pass does not belong to the user or
///   cannot cover the timeslot
/// - `401 Unauthorized` - Not logged in or unknown convention
/// - `404 Not Found` - Timeslot is not part of this convention
#[utoipa::path(
    post,
    path = "/api/cart/tickets",
    tag = CART_TAG,
    params(
        ("Convention" = String, Header, description = "Convention API key")
    ),
    request_body = ReserveTicketDto,
    responses(
        (status = 200, description = "Ticket reserved", body = TicketDto),
        (status = 400, description = "Malformed body or pass unavailable", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 404, description = "Timeslot not found", body = ErrorDto)
    ),
)]
pub async fn reserve_ticket(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    input: Input,
) -> Result<impl IntoResponse, AppError> {
    let access = ConventionGuard::new(&state.db).require(&headers).await?;
    let user = AuthGuard::new(&state.db, &session)
        .require(&headers)
        .await?;
    let payload: ReserveTicketDto = input.deserialize()?;

    let ticket = CartService::new(&state.db)
        .add_ticket(
            access.convention.id,
            CreateTicketParams {
                user_id: user.id,
                timeslot_id: payload.timeslot_id,
                user_pass_id: Some(payload.user_pass_id),
                price: 0.0,
            },
        )
        .await?;

    Ok(Json(ticket.into_dto()))
}
