use sea_orm::{ConnectionTrait, DbErr, EntityTrait};

use crate::server::model::ticket::Interval;

pub struct TimeslotRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> TimeslotRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Finds a timeslot with the convention its event belongs to.
    ///
    /// # Returns
    /// - `Ok(Some((interval, convention_id)))` - Timeslot found
    /// - `Ok(None)` - No timeslot with that id, or its event is gone
    pub async fn find_with_convention(&self, id: i32) -> Result<Option<(Interval, i32)>, DbErr> {
        let row = entity::prelude::Timeslot::find_by_id(id)
            .find_also_related(entity::prelude::Event)
            .one(self.db)
            .await?;

        Ok(row.and_then(|(timeslot, event)| {
            event.map(|event| (Interval::from_timeslot(&timeslot), event.convention_id))
        }))
    }
}
