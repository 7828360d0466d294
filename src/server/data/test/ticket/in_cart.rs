use super::*;

/// Tests that the cart only holds reserved, individually paid tickets without a sale.
///
/// Verifies that tickets booked through a pass, tickets attached to a sale, tickets in
/// another status and other users' tickets are left out.
///
/// Expected: Ok(vec) with only the plain reserved ticket
#[tokio::test]
async fn returns_only_unsold_reserved_tickets() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_sales_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (user, convention, _pass, user_pass) =
        factory::helpers::create_user_pass_with_dependencies(db).await?;
    let other = factory::user::create_user(db).await?;
    let (_event, timeslot) =
        factory::helpers::create_event_with_timeslot(db, convention.id, 24).await?;
    let sale = factory::sale::create_sale(db, convention.id, user.id).await?;

    let in_cart = factory::ticket::create_ticket(db, user.id, convention.id, timeslot.id).await?;
    factory::ticket::TicketFactory::new(db, user.id, convention.id, timeslot.id)
        .user_pass(Some(user_pass.id))
        .build()
        .await?;
    factory::ticket::TicketFactory::new(db, user.id, convention.id, timeslot.id)
        .sale(Some(sale.id))
        .build()
        .await?;
    factory::ticket::TicketFactory::new(db, user.id, convention.id, timeslot.id)
        .status("cancelled")
        .build()
        .await?;
    factory::ticket::create_ticket(db, other.id, convention.id, timeslot.id).await?;

    let cart = TicketRepository::new(db)
        .in_cart(convention.id, user.id)
        .await?;

    assert_eq!(cart.len(), 1);
    assert_eq!(cart[0].id, in_cart.id);

    Ok(())
}

/// Tests the cart of a user with no tickets.
///
/// Expected: Ok(empty vec)
#[tokio::test]
async fn returns_empty_cart() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_sales_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;
    let convention = factory::convention::create_convention(db).await?;

    let cart = TicketRepository::new(db)
        .in_cart(convention.id, user.id)
        .await?;

    assert!(cart.is_empty());

    Ok(())
}
