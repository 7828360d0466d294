use super::*;

/// Tests resolving a convention with the matching secret.
///
/// Expected: Ok(ConventionAccess) with authorized set
#[tokio::test]
async fn authorizes_matching_secret() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_convention_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let convention = factory::convention::ConventionFactory::new(db)
        .api_key("con-key")
        .api_secret("con-secret")
        .build()
        .await?;

    let access = ConventionGuard::new(db)
        .require(&headers(&[
            ("Convention", "con-key"),
            ("Convention-Authorization", "con-secret"),
        ]))
        .await?;

    assert_eq!(access.convention.id, convention.id);
    assert!(access.authorized);

    Ok(())
}

/// Tests a known convention key presented with a wrong or missing secret.
///
/// Expected: Ok(ConventionAccess) with authorized unset in both cases
#[tokio::test]
async fn wrong_secret_is_not_authorized() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_convention_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::convention::ConventionFactory::new(db)
        .api_key("con-key")
        .api_secret("con-secret")
        .build()
        .await?;

    let guard = ConventionGuard::new(db);
    let wrong = guard
        .require(&headers(&[
            ("Convention", "con-key"),
            ("Convention-Authorization", "guess"),
        ]))
        .await?;
    let missing = guard.require(&headers(&[("Convention", "con-key")])).await?;

    assert!(!wrong.authorized);
    assert!(!missing.authorized);

    Ok(())
}

/// Tests requests without a convention header or with an unknown key.
///
/// Expected: Err(InvalidConvention)
#[tokio::test]
async fn rejects_missing_or_unknown_convention() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_convention_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guard = ConventionGuard::new(db);

    assert!(matches!(
        guard.require(&HeaderMap::new()).await,
        Err(AppError::AuthErr(AuthError::InvalidConvention))
    ));
    assert!(matches!(
        guard.require(&headers(&[("Convention", "nope")])).await,
        Err(AppError::AuthErr(AuthError::InvalidConvention))
    ));

    Ok(())
}

/// Tests manager detection for managers, other users and anonymous callers.
///
/// Expected: true only for the assigned manager
#[tokio::test]
async fn detects_convention_managers() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_convention_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let convention = factory::convention::ConventionFactory::new(db)
        .api_key("con-key")
        .build()
        .await?;
    let manager = factory::user::create_user(db).await?;
    let visitor = factory::user::create_user(db).await?;
    factory::convention::add_manager(db, convention.id, manager.id).await?;

    let guard = ConventionGuard::new(db);
    let access = guard.require(&headers(&[("Convention", "con-key")])).await?;

    let manager = crate::server::model::user::User::from_entity(manager);
    let visitor = crate::server::model::user::User::from_entity(visitor);

    assert!(guard.is_manager(&access.convention, Some(&manager)).await?);
    assert!(!guard.is_manager(&access.convention, Some(&visitor)).await?);
    assert!(!guard.is_manager(&access.convention, None).await?);

    Ok(())
}

/// Tests secrets that only share a prefix with the stored one.
///
/// Expected: Ok(ConventionAccess) with authorized unset for a truncated and an extended
/// secret
#[tokio::test]
async fn partial_secret_is_not_authorized() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_convention_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::convention::ConventionFactory::new(db)
        .api_key("con-key")
        .api_secret("con-secret")
        .build()
        .await?;

    let guard = ConventionGuard::new(db);
    for secret in ["con-secre", "con-secret-2"] {
        let access = guard
            .require(&headers(&[
                ("Convention", "con-key"),
                ("Convention-Authorization", secret),
            ]))
            .await?;

        assert!(!access.authorized);
    }

    Ok(())
}

/// Tests who may use the sales desk.
///
/// Expected: the authorized convention and a manager pass; a visitor is denied and an
/// anonymous caller is unauthenticated
#[tokio::test]
async fn staff_requires_secret_or_manager() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_convention_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let convention = factory::convention::ConventionFactory::new(db)
        .api_key("con-key")
        .api_secret("con-secret")
        .build()
        .await?;
    let manager = factory::user::create_user(db).await?;
    let visitor = factory::user::create_user(db).await?;
    factory::convention::add_manager(db, convention.id, manager.id).await?;
    let manager = crate::server::model::user::User::from_entity(manager);
    let visitor = crate::server::model::user::User::from_entity(visitor);

    let guard = ConventionGuard::new(db);
    let authorized = headers(&[
        ("Convention", "con-key"),
        ("Convention-Authorization", "con-secret"),
    ]);
    let public = headers(&[("Convention", "con-key")]);

    assert!(guard.require_staff(&authorized, None).await?.authorized);
    assert_eq!(
        guard
            .require_staff(&public, Some(&manager))
            .await?
            .convention
            .id,
        convention.id
    );
    assert!(matches!(
        guard.require_staff(&public, Some(&visitor)).await,
        Err(AppError::AuthErr(AuthError::AccessDenied(_)))
    ));
    assert!(matches!(
        guard.require_staff(&public, None).await,
        Err(AppError::AuthErr(AuthError::UserNotInSession))
    ));

    Ok(())
}
