use super::*;

/// Tests storing an uploaded file and an external reference for an event.
///
/// Verifies that the content type round trips into the matching source kind.
///
/// Expected: Ok(vec) with both media in insertion order
#[tokio::test]
async fn stores_uploaded_and_external_media() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_convention_tables()
        .with_table(entity::prelude::Event)
        .with_table(entity::prelude::Medium)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;
    let convention = factory::convention::create_convention(db).await?;
    let event = factory::event::create_event(db, convention.id).await?;
    let repo = MediumRepository::new(db);

    let poster = repo
        .create(CreateMediumParams {
            event_id: event.id,
            user_id: Some(user.id),
            title: "Poster".to_string(),
            filename: Some("poster.png".to_string()),
            source: MediumSource::Stored("image/png".to_string()),
            url: None,
            thumbnail_url: None,
        })
        .await?;
    let trailer = repo
        .create(CreateMediumParams {
            event_id: event.id,
            user_id: None,
            title: "Trailer".to_string(),
            filename: None,
            source: MediumSource::External("youtube".to_string()),
            url: Some("https://www.youtube.com/watch?v=abc".to_string()),
            thumbnail_url: Some("https://img.youtube.com/vi/abc/0.jpg".to_string()),
        })
        .await?;

    let media = repo.by_event(event.id).await?;

    assert_eq!(media, vec![poster, trailer]);
    assert!(!media[0].source.is_external());
    assert_eq!(media[1].source, MediumSource::External("youtube".to_string()));

    Ok(())
}
