use super::*;

/// Tests that only valid tickets of the pass contribute intervals.
///
/// Expected: Ok(vec) with the reserved ticket's timeslot only
#[tokio::test]
async fn skips_cancelled_tickets() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_sales_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (user, convention, _pass, user_pass) =
        factory::helpers::create_user_pass_with_dependencies(db).await?;
    let (_event, morning) =
        factory::helpers::create_event_with_timeslot(db, convention.id, 24).await?;
    let (_event, evening) =
        factory::helpers::create_event_with_timeslot(db, convention.id, 30).await?;

    factory::ticket::TicketFactory::new(db, user.id, convention.id, morning.id)
        .user_pass(Some(user_pass.id))
        .build()
        .await?;
    factory::ticket::TicketFactory::new(db, user.id, convention.id, evening.id)
        .user_pass(Some(user_pass.id))
        .status("cancelled")
        .build()
        .await?;

    let intervals = TicketRepository::new(db)
        .valid_intervals_by_user_pass(user_pass.id)
        .await?;

    assert_eq!(intervals.len(), 1);
    assert_eq!(intervals[0].start, morning.start_time);
    assert_eq!(intervals[0].end, morning.end_time);

    Ok(())
}
