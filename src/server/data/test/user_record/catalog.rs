use super::*;

/// Tests listing the distinct descriptors of a convention.
///
/// Expected: Ok(vec) sorted, without duplicates or other conventions' descriptors
#[tokio::test]
async fn lists_distinct_descriptors() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_record_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let alice = factory::user::create_user(db).await?;
    let bob = factory::user::create_user(db).await?;
    let convention = factory::convention::create_convention(db).await?;
    let elsewhere = factory::convention::create_convention(db).await?;

    factory::user_record::create_user_record(db, convention.id, alice.id, "profile").await?;
    factory::user_record::create_user_record(db, convention.id, bob.id, "profile").await?;
    factory::user_record::create_user_record(db, convention.id, bob.id, "avatar").await?;
    factory::user_record::create_user_record(db, elsewhere.id, bob.id, "schedule").await?;

    let descriptors = UserRecordRepository::new(db)
        .list_descriptors(convention.id)
        .await?;

    assert_eq!(descriptors, vec!["avatar".to_string(), "profile".to_string()]);

    Ok(())
}

/// Tests collecting every user's value for one descriptor.
///
/// Expected: Ok(vec) pairing each record with its owner's email
#[tokio::test]
async fn collects_values_with_owner_email() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_record_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let alice = factory::user::UserFactory::new(db)
        .email("alice@example.com")
        .build()
        .await?;
    let bob = factory::user::UserFactory::new(db)
        .email("bob@example.com")
        .build()
        .await?;
    let convention = factory::convention::create_convention(db).await?;

    factory::user_record::UserRecordFactory::new(db, convention.id, alice.id, "shirt")
        .data("M")
        .build()
        .await?;
    factory::user_record::UserRecordFactory::new(db, convention.id, bob.id, "shirt")
        .data("XL")
        .build()
        .await?;
    factory::user_record::create_user_record(db, convention.id, bob.id, "profile").await?;

    let values = UserRecordRepository::new(db)
        .all_by_descriptor(convention.id, "shirt")
        .await?;

    let pairs: Vec<_> = values
        .iter()
        .map(|v| (v.user_email.as_str(), v.record.data.as_str()))
        .collect();
    assert_eq!(
        pairs,
        vec![("alice@example.com", "M"), ("bob@example.com", "XL")]
    );

    Ok(())
}
