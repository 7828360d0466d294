use super::*;

/// Tests creating a user on first login.
///
/// Expected: Ok(User) findable by email
#[tokio::test]
async fn creates_new_user() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let user = repo
        .upsert(UpsertUserParams {
            email: "visitor@example.com".to_string(),
            name: "Visitor".to_string(),
        })
        .await?;

    let found = repo.find_by_email("visitor@example.com").await?;

    assert_eq!(found.map(|u| u.id), Some(user.id));

    Ok(())
}

/// Tests that logging in again refreshes the name of the existing user.
///
/// Expected: Ok(User) with the same id and the new name
#[tokio::test]
async fn updates_name_of_existing_user() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let first = repo
        .upsert(UpsertUserParams {
            email: "visitor@example.com".to_string(),
            name: "Visitor".to_string(),
        })
        .await?;
    let second = repo
        .upsert(UpsertUserParams {
            email: "visitor@example.com".to_string(),
            name: "Renamed Visitor".to_string(),
        })
        .await?;

    assert_eq!(first.id, second.id);
    assert_eq!(second.name, "Renamed Visitor");

    Ok(())
}
