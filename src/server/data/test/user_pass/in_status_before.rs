use super::*;

/// Tests finding passes left reserved or processing before a cutoff.
///
/// Expected: Ok(vec) with each pass only in the query for its own status
#[tokio::test]
async fn finds_stale_passes_by_status() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_sales_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (user, _convention, pass, reserved) =
        factory::helpers::create_user_pass_with_dependencies(db).await?;
    let processing = factory::pass::UserPassFactory::new(db, user.id, pass.id)
        .status("processing")
        .build()
        .await?;

    let repo = UserPassRepository::new(db);
    let later = Utc::now() + Duration::minutes(5);

    let stale_reserved = repo.reserved_before(later).await?;
    assert_eq!(stale_reserved.len(), 1);
    assert_eq!(stale_reserved[0].id, reserved.id);

    let stale_processing = repo.processing_before(later).await?;
    assert_eq!(stale_processing.len(), 1);
    assert_eq!(stale_processing[0].id, processing.id);

    let earlier = Utc::now() - Duration::hours(1);
    assert!(repo.reserved_before(earlier).await?.is_empty());

    Ok(())
}
