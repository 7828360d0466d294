use super::*;

/// Tests that consumed coupons and coupons of other conventions are not offered.
///
/// Expected: Ok(vec) with the remaining coupons, oldest first
#[tokio::test]
async fn returns_unconsumed_coupons_oldest_first() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_sales_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (user, convention, _pass, user_pass) =
        factory::helpers::create_user_pass_with_dependencies(db).await?;
    let elsewhere = factory::convention::create_convention(db).await?;
    let coupon_type = factory::coupon::create_coupon_type(db, convention.id, 30.0).await?;
    let foreign_type = factory::coupon::create_coupon_type(db, elsewhere.id, 30.0).await?;

    let first = factory::coupon::create_coupon(db, &coupon_type, user.id).await?;
    let consumed = factory::coupon::create_coupon(db, &coupon_type, user.id).await?;
    let last = factory::coupon::create_coupon(db, &coupon_type, user.id).await?;
    factory::coupon::create_coupon(db, &foreign_type, user.id).await?;

    let repo = CouponRepository::new(db);
    let linked = repo.consume(consumed.id, user_pass.id).await?;
    assert_eq!(linked.user_pass_id, Some(user_pass.id));

    let unused = repo.unused_for_user(convention.id, user.id).await?;
    let ids: Vec<_> = unused.iter().map(|c| c.id).collect();

    assert_eq!(ids, vec![first.id, last.id]);

    Ok(())
}

/// Tests issuing a coupon with a value different from its type's.
///
/// Expected: Ok(coupon) carrying the given value and the type's convention
#[tokio::test]
async fn creates_coupon_with_custom_value() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_sales_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;
    let convention = factory::convention::create_convention(db).await?;
    let coupon_type = factory::coupon::create_coupon_type(db, convention.id, 10.0).await?;

    let repo = CouponRepository::new(db);
    let coupon = repo.create(&coupon_type, user.id, 75.0).await?;

    assert_eq!(coupon.value, 75.0);
    assert_eq!(coupon.convention_id, convention.id);
    assert!(coupon.user_pass_id.is_none());
    assert_eq!(repo.find_type(coupon_type.id).await?, Some(coupon_type));

    Ok(())
}
