//! Event and timeslot factories.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Duration, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Creates an event titled `"Event {id}"` in the convention.
pub async fn create_event(
    db: &DatabaseConnection,
    convention_id: i32,
) -> Result<entity::event::Model, DbErr> {
    entity::event::ActiveModel {
        convention_id: ActiveValue::Set(convention_id),
        title: ActiveValue::Set(format!("Event {}", next_id())),
        ..Default::default()
    }
    .insert(db)
    .await
}

/// Factory for creating test timeslots.
pub struct TimeslotFactory<'a> {
    db: &'a DatabaseConnection,
    event_id: i32,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
}

impl<'a> TimeslotFactory<'a> {
    /// Creates a new TimeslotFactory.
    ///
    /// Defaults to a two hour slot starting one day from now.
    pub fn new(db: &'a DatabaseConnection, event_id: i32) -> Self {
        let start_time = Utc::now() + Duration::days(1);
        Self {
            db,
            event_id,
            start_time,
            end_time: start_time + Duration::hours(2),
        }
    }

    pub fn start_time(mut self, start_time: DateTime<Utc>) -> Self {
        self.start_time = start_time;
        self
    }

    pub fn end_time(mut self, end_time: DateTime<Utc>) -> Self {
        self.end_time = end_time;
        self
    }

    /// Builds and inserts the timeslot entity into the database.
    pub async fn build(self) -> Result<entity::timeslot::Model, DbErr> {
        entity::timeslot::ActiveModel {
            event_id: ActiveValue::Set(self.event_id),
            start_time: ActiveValue::Set(self.start_time),
            end_time: ActiveValue::Set(self.end_time),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a timeslot with default times for the event.
pub async fn create_timeslot(
    db: &DatabaseConnection,
    event_id: i32,
) -> Result<entity::timeslot::Model, DbErr> {
    TimeslotFactory::new(db, event_id).build().await
}
