use super::*;

/// Tests attaching tickets to a sale and releasing them again.
///
/// Verifies that `set_sale` only touches the listed tickets and that `release_sale`
/// returns every ticket of the sale to the cart.
///
/// Expected: Ok with the sale set, then cleared
#[tokio::test]
async fn attaches_and_releases_sale() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_sales_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;
    let convention = factory::convention::create_convention(db).await?;
    let (_event, timeslot) =
        factory::helpers::create_event_with_timeslot(db, convention.id, 24).await?;
    let sale = factory::sale::create_sale(db, convention.id, user.id).await?;

    let repo = TicketRepository::new(db);
    let first = repo
        .create(
            convention.id,
            CreateTicketParams {
                user_id: user.id,
                timeslot_id: timeslot.id,
                user_pass_id: None,
                price: 20.0,
            },
            SaleItemStatus::Reserved,
        )
        .await?;
    let second = factory::ticket::create_ticket(db, user.id, convention.id, timeslot.id).await?;

    let updated = repo.set_sale(vec![first.id], sale.id).await?;
    assert_eq!(updated, 1);

    let attached = repo.by_sale(sale.id).await?;
    assert_eq!(attached.len(), 1);
    assert_eq!(attached[0].id, first.id);
    assert_eq!(attached[0].price, 20.0);
    assert!(repo.find_by_id(second.id).await?.unwrap().sale_id.is_none());

    let released = repo.release_sale(sale.id).await?;
    assert_eq!(released, 1);
    assert!(repo.by_sale(sale.id).await?.is_empty());
    assert!(repo.find_by_id(first.id).await?.unwrap().sale_id.is_none());

    Ok(())
}

/// Tests that attaching an empty id list touches nothing.
///
/// Expected: Ok(0)
#[tokio::test]
async fn set_sale_with_no_ids_is_noop() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_sales_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;
    let convention = factory::convention::create_convention(db).await?;
    let sale = factory::sale::create_sale(db, convention.id, user.id).await?;

    let updated = TicketRepository::new(db).set_sale(vec![], sale.id).await?;

    assert_eq!(updated, 0);

    Ok(())
}
