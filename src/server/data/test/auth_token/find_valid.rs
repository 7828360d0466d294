use super::*;

/// Tests that only unexpired tokens are found.
///
/// Expected: Some for the live token, None for the expired and unknown ones
#[tokio::test]
async fn ignores_expired_tokens() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;
    let repo = AuthTokenRepository::new(db);
    let now = Utc::now();

    repo.create("live".to_string(), user.id, now + Duration::days(30))
        .await?;
    repo.create("expired".to_string(), user.id, now - Duration::seconds(1))
        .await?;

    let live = repo.find_valid("live", now).await?;
    assert_eq!(live.map(|t| t.user_id), Some(user.id));
    assert!(repo.find_valid("expired", now).await?.is_none());
    assert!(repo.find_valid("unknown", now).await?.is_none());

    Ok(())
}

/// Tests revoking every token of a user.
///
/// Expected: Ok(2) and no token of that user left, other users untouched
#[tokio::test]
async fn deletes_tokens_of_user() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;
    let other = factory::user::create_user(db).await?;
    let repo = AuthTokenRepository::new(db);
    let expires = Utc::now() + Duration::days(1);

    repo.create("a".to_string(), user.id, expires).await?;
    repo.create("b".to_string(), user.id, expires).await?;
    repo.create("c".to_string(), other.id, expires).await?;

    let deleted = repo.delete_for_user(user.id).await?;

    assert_eq!(deleted, 2);
    assert!(repo.find_valid("a", Utc::now()).await?.is_none());
    assert!(repo.find_valid("c", Utc::now()).await?.is_some());

    Ok(())
}
