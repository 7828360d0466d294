use super::*;

/// Tests refunding an authorized pass.
///
/// The pass was bought for less than its nominal price; the coupon is worth the nominal
/// price.
///
/// Expected: Ok(UserPass) refunded, a coupon of 100 issued, tickets cancelled
#[tokio::test]
async fn issues_coupon_and_cancels_tickets() -> Result<(), AppError> {
    let test = TestBuilder::new().with_sales_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;
    let convention = factory::convention::create_convention(db).await?;
    let pass = factory::pass::create_pass_with_price(db, convention.id, 100.0).await?;
    let user_pass = factory::pass::UserPassFactory::new(db, user.id, pass.id)
        .price(60.0)
        .status("authorized")
        .build()
        .await?;
    let coupon_type = factory::coupon::create_coupon_type(db, convention.id, 0.0).await?;
    let (_event, timeslot) =
        factory::helpers::create_event_with_timeslot(db, convention.id, 24).await?;
    let ticket = factory::ticket::TicketFactory::new(db, user.id, convention.id, timeslot.id)
        .user_pass(Some(user_pass.id))
        .status("authorized")
        .build()
        .await?;

    let refunded = PassService::new(db)
        .refund(user_pass.id, coupon_type.id, "Event moved".to_string())
        .await?;

    assert_eq!(refunded.status, SaleItemStatus::Refunded);

    let coupons = CouponRepository::new(db)
        .unused_for_user(convention.id, user.id)
        .await?;
    assert_eq!(coupons.len(), 1);
    assert_eq!(coupons[0].value, 100.0);
    assert_eq!(coupons[0].coupon_type_id, coupon_type.id);

    let ticket = TicketRepository::new(db)
        .find_by_id(ticket.id)
        .await?
        .unwrap();
    assert_eq!(ticket.status, SaleItemStatus::Cancelled);

    Ok(())
}

/// Tests that only authorized passes can be refunded.
///
/// Expected: Err(InvalidTransition) and no coupon issued
#[tokio::test]
async fn rejects_reserved_pass() -> Result<(), AppError> {
    let test = TestBuilder::new().with_sales_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (user, convention, _pass, user_pass) =
        factory::helpers::create_user_pass_with_dependencies(db).await?;
    let coupon_type = factory::coupon::create_coupon_type(db, convention.id, 0.0).await?;

    let result = PassService::new(db)
        .refund(user_pass.id, coupon_type.id, "Changed mind".to_string())
        .await;

    assert!(matches!(
        result,
        Err(AppError::SaleErr(SaleError::InvalidTransition { .. }))
    ));
    assert!(CouponRepository::new(db)
        .unused_for_user(convention.id, user.id)
        .await?
        .is_empty());

    Ok(())
}

/// Tests refunding with a coupon type that does not exist.
///
/// Expected: Err(NotFound) and the pass still authorized
#[tokio::test]
async fn requires_coupon_type() -> Result<(), AppError> {
    let test = TestBuilder::new().with_sales_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;
    let convention = factory::convention::create_convention(db).await?;
    let pass = factory::pass::create_pass(db, convention.id).await?;
    let user_pass = factory::pass::UserPassFactory::new(db, user.id, pass.id)
        .status("authorized")
        .build()
        .await?;

    let service = PassService::new(db);
    let result = service
        .refund(user_pass.id, 404, "Event moved".to_string())
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
    assert_eq!(
        service.find_by_id(user_pass.id).await?.unwrap().status,
        SaleItemStatus::Authorized
    );

    Ok(())
}
