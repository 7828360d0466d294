use super::*;

/// Tests resolving the user stored in the session.
///
/// Expected: Ok(Some(User)) matching the session's user id
#[tokio::test]
async fn resolves_session_user() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_auth_tables()
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let user = factory::user::create_user(db).await?;
    AuthSession::new(session).set_user_id(user.id).await?;

    let resolved = AuthGuard::new(db, session).user(&HeaderMap::new()).await?;

    assert_eq!(resolved.map(|u| u.id), Some(user.id));

    Ok(())
}

/// Tests that a bearer token takes precedence over the session.
///
/// Expected: Ok(Some(User)) owning the token, not the session user
#[tokio::test]
async fn bearer_token_overrides_session() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_auth_tables()
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let session_user = factory::user::create_user(db).await?;
    let token_user = factory::user::create_user(db).await?;
    AuthSession::new(session).set_user_id(session_user.id).await?;
    AuthTokenRepository::new(db)
        .create(
            "bearer-token".to_string(),
            token_user.id,
            Utc::now() + Duration::days(1),
        )
        .await?;

    let resolved = AuthGuard::new(db, session)
        .user(&headers(&[("Authorization", "Bearer bearer-token")]))
        .await?;

    assert_eq!(resolved.map(|u| u.id), Some(token_user.id));

    Ok(())
}

/// Tests that an expired bearer token resolves to no user.
///
/// Expected: Ok(None) and Err(UserNotInSession) from require
#[tokio::test]
async fn expired_token_is_anonymous() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_auth_tables()
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let user = factory::user::create_user(db).await?;
    AuthTokenRepository::new(db)
        .create(
            "stale-token".to_string(),
            user.id,
            Utc::now() - Duration::minutes(1),
        )
        .await?;

    let request = headers(&[("Authorization", "Bearer stale-token")]);
    let guard = AuthGuard::new(db, session);

    assert!(guard.user(&request).await?.is_none());
    assert!(matches!(
        guard.require(&request).await,
        Err(AppError::AuthErr(AuthError::UserNotInSession))
    ));

    Ok(())
}

/// Tests a session pointing at a user that no longer exists.
///
/// Expected: Err(UserNotInDatabase)
#[tokio::test]
async fn fails_for_deleted_session_user() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_auth_tables()
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    AuthSession::new(session).set_user_id(999).await?;

    let result = AuthGuard::new(db, session).user(&HeaderMap::new()).await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::UserNotInDatabase(999)))
    ));

    Ok(())
}

/// Tests a session whose user id no longer parses.
///
/// Expected: Err(AppError::InternalErr(CorruptSessionValue))
#[tokio::test]
async fn fails_for_corrupt_session_user_id() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_auth_tables()
        .build()
        .await
        .unwrap();
    let (_, session) = test.db_and_session().await.unwrap();

    session
        .insert("auth:user", "not-a-number".to_string())
        .await?;

    let result = AuthSession::new(session).get_user_id().await;

    assert!(matches!(
        result,
        Err(AppError::InternalErr(
            InternalError::CorruptSessionValue { .. }
        ))
    ));

    Ok(())
}
