//! Sales desk endpoints.
//!
//! Staff act on any visitor's items within their convention: selling at the desk,
//! authorizing cash payments, cancelling and refunding.

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::{ErrorDto, StatusDto},
        sale::{
            CancelItemDto, CancelSaleDto, DeskPassDto, DeskTicketDto, RefundItemDto, SaleDto,
            TicketDto, UserPassDto,
        },
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, ConventionGuard},
        model::{
            convention::ConventionAccess, pass::CreateUserPassParams,
            ticket::CreateTicketParams, user::User,
        },
        service::{cart::CartService, pass::PassService, sale::SaleService, ticket::TicketService},
        state::AppState,
        util::input::Input,
    },
};

/// Tag for grouping sales desk endpoints in OpenAPI documentation
pub static DESK_TAG: &str = "desk";

async fn staff(
    state: &AppState,
    session: &Session,
    headers: &HeaderMap,
) -> Result<(ConventionAccess, Option<User>), AppError> {
    let user = AuthGuard::new(&state.db, session).user(headers).await?;
    let access = ConventionGuard::new(&state.db)
        .require_staff(headers, user.as_ref())
        .await?;

    Ok((access, user))
}

/// Sell a pass to a visitor at the desk.
///
/// # Access Control
/// - Convention authorized with its API secret, or a convention manager
///
/// # Returns
/// - `200 OK` - The reserved pass
/// - `404 Not Found` - Unknown visitor, or pass not sold by this convention
#[utoipa::path(
    post,
    path = "/api/desk/passes",
    tag = DESK_TAG,
    params(
        ("Convention" = String, Header, description = "Convention API key"),
        ("Convention-Authorization" = Option<String>, Header, description = "Convention API secret")
    ),
    request_body = DeskPassDto,
    responses(
        (status = 200, description = "Pass reserved", body = UserPassDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not a convention manager", body = ErrorDto),
        (status = 404, description = "Visitor or pass not found", body = ErrorDto)
    ),
)]
pub async fn sell_pass(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    input: Input,
) -> Result<impl IntoResponse, AppError> {
    let (access, _) = staff(&state, &session, &headers).await?;
    let payload: DeskPassDto = input.deserialize()?;

    let cart = CartService::new(&state.db);
    let customer = cart.customer(&payload.user).await?;
    let pass = cart
        .add_pass(
            access.convention.id,
            CreateUserPassParams {
                user_id: customer.id,
                pass_id: payload.pass_id,
                name: payload.name,
                price: payload.price,
            },
        )
        .await?;

    Ok(Json(pass.into_dto()))
}

/// Sell a ticket to a visitor at the desk.
///
/// # Returns
/// - `200 OK` - The reserved ticket
/// - `400 Bad Request` - Pass cannot cover the timeslot
/// - `404 Not Found` - Unknown visitor, or timeslot not part of this convention
#[utoipa::path(
    post,
    path = "/api/desk/tickets",
    tag = DESK_TAG,
    params(
        ("Convention" = String, Header, description = "Convention API key"),
        ("Convention-Authorization" = Option<String>, Header, description = "Convention API secret")
    ),
    request_body = DeskTicketDto,
    responses(
        (status = 200, description = "Ticket reserved", body = TicketDto),
        (status = 400, description = "Pass unavailable", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not a convention manager", body = ErrorDto),
        (status = 404, description = "Visitor or timeslot not found", body = ErrorDto)
    ),
)]
pub async fn sell_ticket(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    input: Input,
) -> Result<impl IntoResponse, AppError> {
    let (access, _) = staff(&state, &session, &headers).await?;
    let payload: DeskTicketDto = input.deserialize()?;

    let cart = CartService::new(&state.db);
    let customer = cart.customer(&payload.user).await?;
    let ticket = cart
        .add_ticket(
            access.convention.id,
            CreateTicketParams {
                user_id: customer.id,
                timeslot_id: payload.timeslot_id,
                user_pass_id: payload.user_pass_id,
                price: payload.price,
            },
        )
        .await?;

    Ok(Json(ticket.into_dto()))
}

/// Mark a pass as paid.
#[utoipa::path(
    post,
    path = "/api/passes/{id}/authorize",
    tag = DESK_TAG,
    params(("id" = i32, Path, description = "User pass ID")),
    responses(
        (status = 200, description = "Pass authorized", body = UserPassDto),
        (status = 400, description = "Invalid transition", body = ErrorDto),
        (status = 404, description = "Pass not found", body = ErrorDto)
    ),
)]
pub async fn authorize_pass(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let (access, _) = staff(&state, &session, &headers).await?;
    let passes = PassService::new(&state.db);
    passes.require_in_convention(access.convention.id, id).await?;

    Ok(Json(passes.authorize(id).await?.into_dto()))
}

/// Cancel a pass together with its tickets.
#[utoipa::path(
    post,
    path = "/api/passes/{id}/cancel",
    tag = DESK_TAG,
    params(("id" = i32, Path, description = "User pass ID")),
    request_body = CancelItemDto,
    responses(
        (status = 200, description = "Pass cancelled", body = UserPassDto),
        (status = 400, description = "Invalid transition", body = ErrorDto),
        (status = 404, description = "Pass not found", body = ErrorDto)
    ),
)]
pub async fn cancel_pass(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Path(id): Path<i32>,
    input: Input,
) -> Result<impl IntoResponse, AppError> {
    let (access, _) = staff(&state, &session, &headers).await?;
    let payload: CancelItemDto = input.deserialize()?;
    let passes = PassService::new(&state.db);
    passes.require_in_convention(access.convention.id, id).await?;

    Ok(Json(passes.cancel(id, payload.reason).await?.into_dto()))
}

/// Refund a paid pass as a coupon of its nominal price.
#[utoipa::path(
    post,
    path = "/api/passes/{id}/refund",
    tag = DESK_TAG,
    params(("id" = i32, Path, description = "User pass ID")),
    request_body = RefundItemDto,
    responses(
        (status = 200, description = "Pass refunded", body = UserPassDto),
        (status = 400, description = "Invalid transition", body = ErrorDto),
        (status = 404, description = "Pass or coupon type not found", body = ErrorDto)
    ),
)]
pub async fn refund_pass(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Path(id): Path<i32>,
    input: Input,
) -> Result<impl IntoResponse, AppError> {
    let (access, _) = staff(&state, &session, &headers).await?;
    let payload: RefundItemDto = input.deserialize()?;
    let passes = PassService::new(&state.db);
    passes.require_in_convention(access.convention.id, id).await?;

    let pass = passes
        .refund(id, payload.coupon_type_id, payload.reason)
        .await?;

    Ok(Json(pass.into_dto()))
}

/// Delete a pass and its tickets.
#[utoipa::path(
    delete,
    path = "/api/passes/{id}",
    tag = DESK_TAG,
    params(("id" = i32, Path, description = "User pass ID")),
    responses(
        (status = 200, description = "Pass deleted", body = StatusDto),
        (status = 400, description = "Pass has authorized tickets", body = ErrorDto),
        (status = 404, description = "Pass not found", body = ErrorDto)
    ),
)]
pub async fn delete_pass(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let (access, _) = staff(&state, &session, &headers).await?;
    let passes = PassService::new(&state.db);
    passes.require_in_convention(access.convention.id, id).await?;
    passes.delete(id).await?;

    Ok(Json(StatusDto::ok()))
}

#[utoipa::path(
    post,
    path = "/api/tickets/{id}/authorize",
    tag = DESK_TAG,
    params(("id" = i32, Path, description = "Ticket ID")),
    responses(
        (status = 200, description = "Ticket authorized", body = TicketDto),
        (status = 400, description = "Invalid transition", body = ErrorDto),
        (status = 404, description = "Ticket not found", body = ErrorDto)
    ),
)]
pub async fn authorize_ticket(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let (access, _) = staff(&state, &session, &headers).await?;
    let tickets = TicketService::new(&state.db);
    tickets.require_in_convention(access.convention.id, id).await?;

    Ok(Json(tickets.authorize(id).await?.into_dto()))
}

#[utoipa::path(
    post,
    path = "/api/tickets/{id}/cancel",
    tag = DESK_TAG,
    params(("id" = i32, Path, description = "Ticket ID")),
    request_body = CancelItemDto,
    responses(
        (status = 200, description = "Ticket cancelled", body = TicketDto),
        (status = 400, description = "Invalid transition", body = ErrorDto),
        (status = 404, description = "Ticket not found", body = ErrorDto)
    ),
)]
pub async fn cancel_ticket(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Path(id): Path<i32>,
    input: Input,
) -> Result<impl IntoResponse, AppError> {
    let (access, _) = staff(&state, &session, &headers).await?;
    let payload: CancelItemDto = input.deserialize()?;
    let tickets = TicketService::new(&state.db);
    tickets.require_in_convention(access.convention.id, id).await?;

    Ok(Json(tickets.cancel(id, payload.reason).await?.into_dto()))
}

/// Refund a paid ticket as a coupon of its price.
#[utoipa::path(
    post,
    path = "/api/tickets/{id}/refund",
    tag = DESK_TAG,
    params(("id" = i32, Path, description = "Ticket ID")),
    request_body = RefundItemDto,
    responses(
        (status = 200, description = "Ticket refunded", body = TicketDto),
        (status = 400, description = "Invalid transition", body = ErrorDto),
        (status = 404, description = "Ticket or coupon type not found", body = ErrorDto)
    ),
)]
pub async fn refund_ticket(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Path(id): Path<i32>,
    input: Input,
) -> Result<impl IntoResponse, AppError> {
    let (access, _) = staff(&state, &session, &headers).await?;
    let payload: RefundItemDto = input.deserialize()?;
    let tickets = TicketService::new(&state.db);
    tickets.require_in_convention(access.convention.id, id).await?;

    let ticket = tickets
        .refund(id, payload.coupon_type_id, payload.reason)
        .await?;

    Ok(Json(ticket.into_dto()))
}

/// Cancel a sale and every item it covers.
///
/// Records a cancellation sale pointing at the original, with the calling manager as
/// cashier.
///
/// # Returns
/// - `200 OK` - The cancellation sale
/// - `400 Bad Request` - An item of the sale cannot be cancelled; nothing changed
/// - `404 Not Found` - Sale not found in this convention
#[utoipa::path(
    post,
    path = "/api/sales/{id}/cancel",
    tag = DESK_TAG,
    params(("id" = i32, Path, description = "Sale ID")),
    request_body = CancelSaleDto,
    responses(
        (status = 200, description = "Cancellation sale", body = SaleDto),
        (status = 400, description = "Invalid transition", body = ErrorDto),
        (status = 404, description = "Sale not found", body = ErrorDto)
    ),
)]
pub async fn cancel_sale(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Path(id): Path<i32>,
    input: Input,
) -> Result<impl IntoResponse, AppError> {
    let (access, user) = staff(&state, &session, &headers).await?;
    let payload: CancelSaleDto = input.deserialize()?;
    let sales = SaleService::new(&state.db);
    sales.require_in_convention(access.convention.id, id).await?;

    let cancellation = sales
        .cancel_sale(id, user.map(|u| u.id), payload.notes)
        .await?;

    Ok(Json(cancellation.into_dto(0.0)))
}
