use sea_orm::DbErr;

use crate::server::{
    data::coupon::CouponRepository,
    error::{sale::SaleError, AppError},
    model::{status::SaleItemStatus, ticket::CreateTicketParams},
    service::ticket::TicketService,
};
use test_utils::{builder::TestBuilder, factory};

/// Tests reserving an individually paid ticket.
///
/// Expected: Ok(Ticket) reserved at the given price and in the shopping cart
#[tokio::test]
async fn reserves_ticket_into_cart() -> Result<(), AppError> {
    let test = TestBuilder::new().with_sales_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;
    let convention = factory::convention::create_convention(db).await?;
    let (_event, timeslot) =
        factory::helpers::create_event_with_timeslot(db, convention.id, 24).await?;

    let service = TicketService::new(db);
    let ticket = service
        .reserve(CreateTicketParams {
            user_id: user.id,
            timeslot_id: timeslot.id,
            user_pass_id: None,
            price: 35.0,
        })
        .await?;

    assert_eq!(ticket.status, SaleItemStatus::Reserved);
    assert_eq!(ticket.price, 35.0);
    assert_eq!(ticket.convention_id, convention.id);

    let cart = service.shopping_cart(convention.id, user.id).await?;
    assert_eq!(cart.tickets, vec![ticket]);
    assert!(cart.passes.is_empty());

    Ok(())
}

/// Tests booking through an authorized pass.
///
/// Expected: Ok(Ticket) authorized right away, free, and not in the cart
#[tokio::test]
async fn books_through_authorized_pass() -> Result<(), AppError> {
    let test = TestBuilder::new().with_sales_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;
    let convention = factory::convention::create_convention(db).await?;
    let pass = factory::pass::create_pass(db, convention.id).await?;
    let user_pass = factory::pass::UserPassFactory::new(db, user.id, pass.id)
        .status("authorized")
        .build()
        .await?;
    let (_event, timeslot) =
        factory::helpers::create_event_with_timeslot(db, convention.id, 24).await?;

    let service = TicketService::new(db);
    let ticket = service
        .reserve(CreateTicketParams {
            user_id: user.id,
            timeslot_id: timeslot.id,
            user_pass_id: Some(user_pass.id),
            price: 35.0,
        })
        .await?;

    assert_eq!(ticket.status, SaleItemStatus::Authorized);
    assert_eq!(ticket.price, 0.0);
    assert_eq!(ticket.user_pass_id, Some(user_pass.id));
    assert!(service
        .shopping_cart(convention.id, user.id)
        .await?
        .tickets
        .is_empty());

    Ok(())
}

/// Tests booking through a pass owned by someone else.
///
/// Expected: Err(PassUnavailable)
#[tokio::test]
async fn rejects_foreign_pass() -> Result<(), AppError> {
    let test = TestBuilder::new().with_sales_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_owner, convention, _pass, user_pass) =
        factory::helpers::create_user_pass_with_dependencies(db).await?;
    let intruder = factory::user::create_user(db).await?;
    let (_event, timeslot) =
        factory::helpers::create_event_with_timeslot(db, convention.id, 24).await?;

    let result = TicketService::new(db)
        .reserve(CreateTicketParams {
            user_id: intruder.id,
            timeslot_id: timeslot.id,
            user_pass_id: Some(user_pass.id),
            price: 0.0,
        })
        .await;

    assert!(matches!(
        result,
        Err(AppError::SaleErr(SaleError::PassUnavailable { pass_id, timeslot_id }))
            if pass_id == user_pass.id && timeslot_id == timeslot.id
    ));

    Ok(())
}

/// Tests booking through a pass that already holds an overlapping ticket.
///
/// Expected: Err(PassUnavailable) and no new ticket
#[tokio::test]
async fn rejects_overlapping_booking() -> Result<(), AppError> {
    let test = TestBuilder::new().with_sales_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (user, convention, _pass, user_pass) =
        factory::helpers::create_user_pass_with_dependencies(db).await?;
    let (_event, booked) =
        factory::helpers::create_event_with_timeslot(db, convention.id, 24).await?;
    let (_event, clashing) =
        factory::helpers::create_event_with_timeslot(db, convention.id, 25).await?;

    let service = TicketService::new(db);
    service
        .reserve(CreateTicketParams {
            user_id: user.id,
            timeslot_id: booked.id,
            user_pass_id: Some(user_pass.id),
            price: 0.0,
        })
        .await?;

    let result = service
        .reserve(CreateTicketParams {
            user_id: user.id,
            timeslot_id: clashing.id,
            user_pass_id: Some(user_pass.id),
            price: 0.0,
        })
        .await;

    assert!(matches!(
        result,
        Err(AppError::SaleErr(SaleError::PassUnavailable { .. }))
    ));

    Ok(())
}

/// Tests reserving a ticket for a timeslot that does not exist.
///
/// Expected: Err(NotFound)
#[tokio::test]
async fn fails_for_unknown_timeslot() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_sales_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;

    let result = TicketService::new(db)
        .reserve(CreateTicketParams {
            user_id: user.id,
            timeslot_id: 404,
            user_pass_id: None,
            price: 10.0,
        })
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}

/// Tests refunding a paid ticket.
///
/// Expected: Ok(Ticket) refunded and a coupon worth the ticket price
#[tokio::test]
async fn refund_issues_coupon() -> Result<(), AppError> {
    let test = TestBuilder::new().with_sales_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;
    let convention = factory::convention::create_convention(db).await?;
    let (_event, timeslot) =
        factory::helpers::create_event_with_timeslot(db, convention.id, 24).await?;
    let ticket = factory::ticket::TicketFactory::new(db, user.id, convention.id, timeslot.id)
        .price(25.0)
        .status("authorized")
        .build()
        .await?;
    let coupon_type = factory::coupon::create_coupon_type(db, convention.id, 0.0).await?;

    let refunded = TicketService::new(db)
        .refund(ticket.id, coupon_type.id, "Slot cancelled".to_string())
        .await?;

    assert_eq!(refunded.status, SaleItemStatus::Refunded);
    assert_eq!(refunded.cancel_reason.as_deref(), Some("Slot cancelled"));

    let coupons = CouponRepository::new(db)
        .unused_for_user(convention.id, user.id)
        .await?;
    assert_eq!(coupons.len(), 1);
    assert_eq!(coupons[0].value, 25.0);

    Ok(())
}

/// Tests that a cancelled ticket cannot be authorized.
///
/// Expected: Err(InvalidTransition)
#[tokio::test]
async fn cancelled_ticket_stays_cancelled() -> Result<(), AppError> {
    let test = TestBuilder::new().with_sales_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;
    let convention = factory::convention::create_convention(db).await?;
    let (_event, timeslot) =
        factory::helpers::create_event_with_timeslot(db, convention.id, 24).await?;
    let ticket = factory::ticket::create_ticket(db, user.id, convention.id, timeslot.id).await?;

    let service = TicketService::new(db);
    service.cancel(ticket.id, "No show".to_string()).await?;
    let result = service.authorize(ticket.id).await;

    assert!(matches!(
        result,
        Err(AppError::SaleErr(SaleError::InvalidTransition { .. }))
    ));

    Ok(())
}
