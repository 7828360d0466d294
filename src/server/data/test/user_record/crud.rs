use super::*;

/// Tests creating, reading, updating and deleting a record.
///
/// Verifies that an update without an ACL keeps the stored one.
///
/// Expected: Ok at every step and no record after deletion
#[tokio::test]
async fn manages_record_lifecycle() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_record_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;
    let convention = factory::convention::create_convention(db).await?;
    let repo = UserRecordRepository::new(db);

    let created = repo
        .create(CreateRecordParams {
            convention_id: convention.id,
            user_id: user.id,
            descriptor: "badge".to_string(),
            content_type: "text/plain".to_string(),
            data: "Captain".to_string(),
            acl: RecordAcl::Public,
        })
        .await?;
    assert_eq!(created.acl, RecordAcl::Public);

    let found = repo.find(convention.id, user.id, "badge").await?;
    assert_eq!(found.as_ref().map(|r| r.id), Some(created.id));

    let updated = repo
        .update(
            created.id,
            UpdateRecordParams {
                content_type: "application/json".to_string(),
                data: r#"{"title":"Admiral"}"#.to_string(),
                acl: None,
            },
        )
        .await?;
    assert_eq!(updated.data, r#"{"title":"Admiral"}"#);
    assert_eq!(updated.content_type, "application/json");
    assert_eq!(updated.acl, RecordAcl::Public);

    repo.delete(created.id).await?;
    assert!(repo.find(convention.id, user.id, "badge").await?.is_none());

    Ok(())
}

/// Tests that lookup is scoped to the convention.
///
/// Expected: Ok(None) for the same user and descriptor in another convention
#[tokio::test]
async fn find_is_scoped_to_convention() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_record_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;
    let convention = factory::convention::create_convention(db).await?;
    let elsewhere = factory::convention::create_convention(db).await?;
    factory::user_record::create_user_record(db, convention.id, user.id, "profile").await?;

    let found = UserRecordRepository::new(db)
        .find(elsewhere.id, user.id, "profile")
        .await?;

    assert!(found.is_none());

    Ok(())
}
