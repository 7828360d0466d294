use axum::{extract::State, http::HeaderMap, response::IntoResponse, Json};
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        sale::{CheckoutDto, CheckoutResultDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, ConventionGuard},
        service::payment::PaymentService,
        state::AppState,
        util::input::Input,
    },
};

/// Tag for grouping sale endpoints in OpenAPI documentation
pub static SALE_TAG: &str = "sales";

/// Check out the user's shopping cart.
///
/// Creates a sale for the reserved tickets and passes in the cart, moves them to
/// processing and returns the payment gateway form to submit.
///
/// # Access Control
/// - Authenticated user, in the convention named by the `Convention` header
///
/// # Returns
/// - `200 OK` - The sale and its payment form
/// - `400 Bad Request` - Empty cart or malformed body
/// - `401 Unauthorized` - Not logged in or unknown convention
#[utoipa::path(
    post,
    path = "/api/checkout",
    tag = SALE_TAG,
    params(
        ("Convention" = String, Header, description = "Convention API key")
    ),
    request_body = CheckoutDto,
    responses(
        (status = 200, description = "Sale created", body = CheckoutResultDto),
        (status = 400, description = "Empty cart", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn checkout(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    input: Input,
) -> Result<impl IntoResponse, AppError> {
    let access = ConventionGuard::new(&state.db).require(&headers).await?;
    let user = AuthGuard::new(&state.db, &session)
        .require(&headers)
        .await?;
    let payload: CheckoutDto = input.deserialize()?;

    let checkout = PaymentService::new(&state.db, state.payment.as_ref())
        .checkout(
            &user,
            &access.convention,
            &payload.ok_url,
            &payload.fail_url,
        )
        .await?;

    Ok(Json(CheckoutResultDto {
        sale: checkout.sale.into_dto(checkout.total),
        form: checkout.form.into_dto(),
    }))
}
