use super::*;

/// Tests that cancelling a pass cancels every ticket booked through it.
///
/// Verifies that already cancelled tickets are left as they are and the reason is
/// recorded on the pass and on the tickets that changed.
///
/// Expected: Ok(UserPass) cancelled, all tickets cancelled
#[tokio::test]
async fn cancel_cascades_to_tickets() -> Result<(), AppError> {
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

    for status in ["reserved", "authorized", "cancelled"] {
        factory::ticket::TicketFactory::new(db, user.id, convention.id, timeslot.id)
            .user_pass(Some(user_pass.id))
            .status(status)
            .build()
            .await?;
    }

    let cancelled = PassService::new(db)
        .cancel(user_pass.id, "Visitor asked".to_string())
        .await?;

    assert_eq!(cancelled.status, SaleItemStatus::Cancelled);
    assert_eq!(cancelled.cancel_reason.as_deref(), Some("Visitor asked"));

    let tickets = TicketRepository::new(db).by_user_pass(user_pass.id).await?;
    assert_eq!(tickets.len(), 3);
    assert!(tickets
        .iter()
        .all(|t| t.status == SaleItemStatus::Cancelled));
    assert_eq!(tickets[0].cancel_reason.as_deref(), Some("Visitor asked"));

    Ok(())
}

/// Tests that a refunded ticket aborts a pass cancellation as a whole.
///
/// The pass and the ticket before the refunded one would change first; the abort must
/// roll both back.
///
/// Expected: Err(InvalidTransition) and no status changed
#[tokio::test]
async fn cancel_aborts_on_refunded_ticket() -> Result<(), AppError> {
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

    let reserved = factory::ticket::TicketFactory::new(db, user.id, convention.id, timeslot.id)
        .user_pass(Some(user_pass.id))
        .build()
        .await?;
    let refunded = factory::ticket::TicketFactory::new(db, user.id, convention.id, timeslot.id)
        .user_pass(Some(user_pass.id))
        .status("refunded")
        .build()
        .await?;

    let service = PassService::new(db);
    let result = service.cancel(user_pass.id, "Oops".to_string()).await;

    assert!(matches!(
        result,
        Err(AppError::SaleErr(SaleError::InvalidTransition {
            kind: "ticket",
            id,
            status: SaleItemStatus::Refunded,
            action: SaleAction::Cancel,
        })) if id == refunded.id
    ));

    let pass_after = service.find_by_id(user_pass.id).await?.unwrap();
    assert_eq!(pass_after.status, SaleItemStatus::Authorized);
    assert!(pass_after.cancel_reason.is_none());

    let ticket_after = TicketRepository::new(db)
        .find_by_id(reserved.id)
        .await?
        .unwrap();
    assert_eq!(ticket_after.status, SaleItemStatus::Reserved);

    Ok(())
}

/// Tests that authorizing a pass authorizes its valid tickets only.
///
/// Expected: Ok(UserPass) authorized, reserved ticket authorized, cancelled ticket kept
#[tokio::test]
async fn authorize_cascades_to_valid_tickets() -> Result<(), AppError> {
    let test = TestBuilder::new().with_sales_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (user, convention, _pass, user_pass) =
        factory::helpers::create_user_pass_with_dependencies(db).await?;
    let (_event, timeslot) =
        factory::helpers::create_event_with_timeslot(db, convention.id, 24).await?;

    let reserved = factory::ticket::TicketFactory::new(db, user.id, convention.id, timeslot.id)
        .user_pass(Some(user_pass.id))
        .build()
        .await?;
    let cancelled = factory::ticket::TicketFactory::new(db, user.id, convention.id, timeslot.id)
        .user_pass(Some(user_pass.id))
        .status("cancelled")
        .build()
        .await?;

    let authorized = PassService::new(db).authorize(user_pass.id).await?;
    assert_eq!(authorized.status, SaleItemStatus::Authorized);

    let repo = TicketRepository::new(db);
    assert_eq!(
        repo.find_by_id(reserved.id).await?.unwrap().status,
        SaleItemStatus::Authorized
    );
    assert_eq!(
        repo.find_by_id(cancelled.id).await?.unwrap().status,
        SaleItemStatus::Cancelled
    );

    Ok(())
}

/// Tests that authorizing an already authorized pass changes nothing.
///
/// Expected: Ok(UserPass) still authorized
#[tokio::test]
async fn repeated_authorize_is_noop() -> Result<(), AppError> {
    let test = TestBuilder::new().with_sales_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_user, _convention, _pass, user_pass) =
        factory::helpers::create_user_pass_with_dependencies(db).await?;

    let service = PassService::new(db);
    service.authorize(user_pass.id).await?;
    let again = service.authorize(user_pass.id).await?;

    assert_eq!(again.status, SaleItemStatus::Authorized);

    Ok(())
}
