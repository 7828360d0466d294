//! Shared helper utilities for factory methods.
//!
//! Provides unique id generation and convenience methods creating entities together with
//! their dependencies.

use chrono::{Duration, Utc};
use sea_orm::{DatabaseConnection, DbErr};

/// Counter for generating unique values in tests.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Creates a reserved user pass along with its owner, convention and pass definition.
///
/// # Returns
/// - `Ok((user, convention, pass, user_pass))` - Tuple of all created entities
/// - `Err(DbErr)` - Database error during creation
pub async fn create_user_pass_with_dependencies(
    db: &DatabaseConnection,
) -> Result<
    (
        entity::user::Model,
        entity::convention::Model,
        entity::pass::Model,
        entity::user_pass::Model,
    ),
    DbErr,
> {
    let user = crate::factory::user::create_user(db).await?;
    let convention = crate::factory::convention::create_convention(db).await?;
    let pass = crate::factory::pass::create_pass(db, convention.id).await?;
    let user_pass = crate::factory::pass::create_user_pass(db, user.id, pass.id).await?;

    Ok((user, convention, pass, user_pass))
}

/// Creates an event in the convention with a single two hour timeslot starting `offset`
/// hours from now.
///
/// # Returns
/// - `Ok((event, timeslot))` - The created event and timeslot
/// - `Err(DbErr)` - Database error during creation
pub async fn create_event_with_timeslot(
    db: &DatabaseConnection,
    convention_id: i32,
    offset: i64,
) -> Result<(entity::event::Model, entity::timeslot::Model), DbErr> {
    let event = crate::factory::event::create_event(db, convention_id).await?;
    let start = Utc::now() + Duration::hours(offset);
    let timeslot = crate::factory::event::TimeslotFactory::new(db, event.id)
        .start_time(start)
        .end_time(start + Duration::hours(2))
        .build()
        .await?;

    Ok((event, timeslot))
}
