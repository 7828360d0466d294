use axum::{extract::State, response::IntoResponse, Json};

use crate::{
    model::api::{ErrorDto, StatusDto},
    server::{
        controller::checkout::SALE_TAG, error::AppError, service::payment::PaymentService,
        state::AppState, util::input::Input,
    },
};

/// Pelepay payment callback.
///
/// The gateway redirects the buyer here, or posts the fields, with `sale` and `status`
/// plus its own response fields.
///
/// # Returns
/// - `200 OK` - Callback applied
/// - `400 Bad Request` - Unknown status or invalid input
/// - `404 Not Found` - Sale does not exist
#[utoipa::path(
    post,
    path = "/api/payment/pelepay/callback",
    tag = SALE_TAG,
    params(
        ("sale" = String, Query, description = "Sale id"),
        ("status" = String, Query, description = "success, fail or cancel")
    ),
    responses(
        (status = 200, description = "Callback applied", body = StatusDto),
        (status = 400, description = "Invalid callback", body = ErrorDto),
        (status = 404, description = "Sale not found", body = ErrorDto)
    ),
)]
pub async fn pelepay_callback(
    State(state): State<AppState>,
    input: Input,
) -> Result<impl IntoResponse, AppError> {
    PaymentService::new(&state.db, state.payment.as_ref())
        .handle_callback(&input)
        .await?;

    Ok(Json(StatusDto::ok()))
}
