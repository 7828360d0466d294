use super::*;

/// Tests listing a user's passes with and without the valid status filter.
///
/// Verifies that passes from another convention never show up and that `valid_only`
/// drops cancelled and refunded passes.
///
/// Expected: Ok(vec) of three passes, then of the reserved and authorized ones
#[tokio::test]
async fn filters_by_convention_and_status() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_sales_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;
    let convention = factory::convention::create_convention(db).await?;
    let elsewhere = factory::convention::create_convention(db).await?;
    let pass = factory::pass::create_pass(db, convention.id).await?;
    let other_pass = factory::pass::create_pass(db, elsewhere.id).await?;

    let reserved = factory::pass::create_user_pass(db, user.id, pass.id).await?;
    let authorized = factory::pass::UserPassFactory::new(db, user.id, pass.id)
        .status("authorized")
        .build()
        .await?;
    factory::pass::UserPassFactory::new(db, user.id, pass.id)
        .status("refunded")
        .build()
        .await?;
    factory::pass::create_user_pass(db, user.id, other_pass.id).await?;

    let repo = UserPassRepository::new(db);

    let all = repo.by_convention_user(convention.id, user.id, false).await?;
    assert_eq!(all.len(), 3);

    let valid = repo.by_convention_user(convention.id, user.id, true).await?;
    let ids: Vec<_> = valid.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![reserved.id, authorized.id]);
    assert_eq!(valid[1].status, SaleItemStatus::Authorized);

    Ok(())
}
