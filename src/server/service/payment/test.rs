use serde_json::{json, Value};

use crate::server::{
    data::{sale::SaleRepository, ticket::TicketRepository},
    error::{payment::PaymentError, sale::SaleError, AppError},
    model::{convention::Convention, status::SaleItemStatus, user::User},
    payment::pelepay::Pelepay,
    service::payment::PaymentService,
    util::input::Input,
};
use sea_orm::DatabaseConnection;
use test_utils::{builder::TestBuilder, factory};

fn pelepay() -> Pelepay {
    Pelepay::new(
        "shop@example.com".to_string(),
        "https://pay.example.com/page".to_string(),
        "https://con.example.com",
    )
}

fn callback(fields: Value) -> Input {
    Input::from_map(fields.as_object().cloned().unwrap_or_default())
}

/// Checks out a cart holding a single ticket priced 40.
///
/// # Returns
/// - `Ok((sale_id, ticket_id))`
async fn checkout_ticket(
    db: &DatabaseConnection,
    processor: &Pelepay,
) -> Result<(i32, i32), AppError> {
    let user = factory::user::create_user(db).await?;
    let convention = factory::convention::create_convention(db).await?;
    let (_event, timeslot) =
        factory::helpers::create_event_with_timeslot(db, convention.id, 24).await?;
    let ticket = factory::ticket::TicketFactory::new(db, user.id, convention.id, timeslot.id)
        .price(40.0)
        .build()
        .await?;

    let checkout = PaymentService::new(db, processor)
        .checkout(
            &User::from_entity(user),
            &Convention::from_entity(convention),
            "https://con.example.com/ok",
            "https://con.example.com/fail",
        )
        .await?;

    Ok((checkout.sale.id, ticket.id))
}

async fn ticket_status(db: &DatabaseConnection, id: i32) -> Result<SaleItemStatus, AppError> {
    Ok(TicketRepository::new(db).find_by_id(id).await?.unwrap().status)
}

/// Tests that checkout builds the form, stores the return URLs and starts processing.
///
/// Expected: Ok(Checkout) for 40 with the ticket processing
#[tokio::test]
async fn checkout_starts_processing() -> Result<(), AppError> {
    let test = TestBuilder::new().with_sales_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let processor = pelepay();

    let user = factory::user::create_user(db).await?;
    let convention = factory::convention::create_convention(db).await?;
    let (_event, timeslot) =
        factory::helpers::create_event_with_timeslot(db, convention.id, 24).await?;
    let ticket = factory::ticket::TicketFactory::new(db, user.id, convention.id, timeslot.id)
        .price(40.0)
        .build()
        .await?;

    let checkout = PaymentService::new(db, &processor)
        .checkout(
            &User::from_entity(user),
            &Convention::from_entity(convention),
            "https://con.example.com/ok",
            "https://con.example.com/fail",
        )
        .await?;

    assert_eq!(checkout.total, 40.0);
    assert_eq!(checkout.form.fields["amount"], "40");
    assert_eq!(checkout.form.fields["orderid"], checkout.sale.id.to_string());
    assert_eq!(
        checkout.sale.processor_data["ok"],
        json!("https://con.example.com/ok")
    );
    assert_eq!(ticket_status(db, ticket.id).await?, SaleItemStatus::Processing);

    Ok(())
}

/// Tests checking out an empty cart.
///
/// Expected: Err(EmptyCart)
#[tokio::test]
async fn checkout_requires_items() -> Result<(), AppError> {
    let test = TestBuilder::new().with_sales_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let processor = pelepay();

    let user = factory::user::create_user(db).await?;
    let convention = factory::convention::create_convention(db).await?;

    let result = PaymentService::new(db, &processor)
        .checkout(
            &User::from_entity(user),
            &Convention::from_entity(convention),
            "ok",
            "fail",
        )
        .await;

    assert!(matches!(result, Err(AppError::SaleErr(SaleError::EmptyCart))));

    Ok(())
}

/// Tests a successful payment callback.
///
/// The gateway response is stored next to the data written at checkout.
///
/// Expected: Ok(Sale) with the transaction id, merged processor data and the ticket
/// authorized
#[tokio::test]
async fn success_callback_authorizes_sale() -> Result<(), AppError> {
    let test = TestBuilder::new().with_sales_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let processor = pelepay();
    let (sale_id, ticket_id) = checkout_ticket(db, &processor).await?;

    let sale = PaymentService::new(db, &processor)
        .handle_callback(&callback(json!({
            "sale": sale_id.to_string(),
            "status": "success",
            "Response": "000",
            "ConfirmationCode": "ABC123",
            "index": "77",
            "amount": "40",
        })))
        .await?;

    assert_eq!(sale.transaction_id.as_deref(), Some("77:ABC123"));
    assert_eq!(
        sale.processor_data["fail"],
        json!("https://con.example.com/fail")
    );
    assert_eq!(
        sale.processor_data["pelepay-response"]["confirmation-code"],
        json!("ABC123")
    );
    assert_eq!(ticket_status(db, ticket_id).await?, SaleItemStatus::Authorized);

    Ok(())
}

/// Tests a failed payment callback.
///
/// Expected: Ok(Sale) with the gateway response as cancellation notes, ticket back to
/// reserved
#[tokio::test]
async fn fail_callback_releases_items() -> Result<(), AppError> {
    let test = TestBuilder::new().with_sales_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let processor = pelepay();
    let (sale_id, ticket_id) = checkout_ticket(db, &processor).await?;

    PaymentService::new(db, &processor)
        .handle_callback(&callback(json!({
            "sale": sale_id.to_string(),
            "status": "fail",
            "Response": "033",
        })))
        .await?;

    let sale = SaleRepository::new(db).find_by_id(sale_id).await?.unwrap();
    assert_eq!(sale.cancellation_notes.as_deref(), Some("033"));
    assert_eq!(ticket_status(db, ticket_id).await?, SaleItemStatus::Reserved);

    Ok(())
}

/// Tests a successful payment reported after the same sale already failed.
///
/// The failed payment put the ticket back in the cart, so the sale has nothing left to
/// authorize.
///
/// Expected: Err(NoItemsToAuthorize), the success transaction id not recorded, ticket still
/// reserved
#[tokio::test]
async fn success_after_fail_is_rejected() -> Result<(), AppError> {
    let test = TestBuilder::new().with_sales_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let processor = pelepay();
    let (sale_id, ticket_id) = checkout_ticket(db, &processor).await?;
    let service = PaymentService::new(db, &processor);

    service
        .handle_callback(&callback(json!({
            "sale": sale_id.to_string(),
            "status": "fail",
            "Response": "033",
        })))
        .await?;

    let result = service
        .handle_callback(&callback(json!({
            "sale": sale_id.to_string(),
            "status": "success",
            "Response": "000",
            "ConfirmationCode": "PAID",
            "index": "9",
        })))
        .await;

    assert!(matches!(
        result,
        Err(AppError::PaymentErr(PaymentError::NoItemsToAuthorize(id))) if id == sale_id
    ));

    let sale = SaleRepository::new(db).find_by_id(sale_id).await?.unwrap();
    assert_ne!(sale.transaction_id.as_deref(), Some("9:PAID"));
    assert_eq!(ticket_status(db, ticket_id).await?, SaleItemStatus::Reserved);

    Ok(())
}

/// Tests that an unknown callback status is rejected without touching the sale.
///
/// Expected: Err(UnknownStatus), processor data and item status unchanged
#[tokio::test]
async fn rejects_unknown_status() -> Result<(), AppError> {
    let test = TestBuilder::new().with_sales_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let processor = pelepay();
    let (sale_id, ticket_id) = checkout_ticket(db, &processor).await?;

    let before = SaleRepository::new(db).find_by_id(sale_id).await?.unwrap();

    let result = PaymentService::new(db, &processor)
        .handle_callback(&callback(json!({
            "sale": sale_id.to_string(),
            "status": "b2b",
            "ConfirmationCode": "ABC123",
        })))
        .await;

    assert!(matches!(
        result,
        Err(AppError::PaymentErr(PaymentError::UnknownStatus(status))) if status == "b2b"
    ));

    let after = SaleRepository::new(db).find_by_id(sale_id).await?.unwrap();
    assert_eq!(after, before);
    assert_eq!(ticket_status(db, ticket_id).await?, SaleItemStatus::Processing);

    Ok(())
}

/// Tests callbacks for sales that do not exist.
///
/// Expected: Err(SaleNotFound) for an unknown and a non-numeric id
#[tokio::test]
async fn rejects_unknown_sale() -> Result<(), AppError> {
    let test = TestBuilder::new().with_sales_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let processor = pelepay();
    let service = PaymentService::new(db, &processor);

    for sale in ["404", "abc"] {
        let result = service
            .handle_callback(&callback(json!({"sale": sale, "status": "success"})))
            .await;

        assert!(matches!(
            result,
            Err(AppError::PaymentErr(PaymentError::SaleNotFound(id))) if id == sale
        ));
    }

    Ok(())
}
