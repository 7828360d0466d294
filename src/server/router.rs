use axum::{routing::get, Router};
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{
    controller::{auth, cart, checkout, desk, payment, record},
    payment::pelepay,
    state::AppState,
};

#[derive(OpenApi)]
#[openapi(
    info(title = "Controll API", description = "Convention management backend"),
    tags(
        (name = "auth", description = "Login providers and auth tokens"),
        (name = "records", description = "Per-user records"),
        (name = "cart", description = "The visitor's shopping cart"),
        (name = "desk", description = "Sales desk operations for convention staff"),
        (name = "sales", description = "Checkout and payment callbacks")
    )
)]
struct ApiDoc;

pub fn router() -> Router<AppState> {
    let (router, api) = OpenApiRouter::<AppState>::with_openapi(ApiDoc::openapi())
        .routes(routes!(auth::list_providers))
        .routes(routes!(auth::start))
        .routes(routes!(auth::callback))
        .routes(routes!(auth::verify))
        .routes(routes!(auth::logout))
        .routes(routes!(record::list_descriptors, record::create_record))
        .routes(routes!(
            record::get_record,
            record::update_record,
            record::delete_record
        ))
        .routes(routes!(cart::get_cart))
        .routes(routes!(cart::reserve_pass))
        .routes(routes!(cart::reserve_ticket))
        .routes(routes!(checkout::checkout))
        .routes(routes!(desk::sell_pass))
        .routes(routes!(desk::sell_ticket))
        .routes(routes!(desk::delete_pass))
        .routes(routes!(desk::authorize_pass))
        .routes(routes!(desk::cancel_pass))
        .routes(routes!(desk::refund_pass))
        .routes(routes!(desk::authorize_ticket))
        .routes(routes!(desk::cancel_ticket))
        .routes(routes!(desk::refund_ticket))
        .routes(routes!(desk::cancel_sale))
        .routes(routes!(payment::pelepay_callback))
        .split_for_parts();

    router
        // Gateways redirect the buyer back with a GET as well.
        .route(pelepay::CALLBACK_PATH, get(payment::pelepay_callback))
        .merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api))
}
