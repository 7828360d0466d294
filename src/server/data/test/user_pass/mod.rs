use chrono::{Duration, Utc};
use sea_orm::DbErr;

use crate::server::{data::pass::UserPassRepository, model::status::SaleItemStatus};
use test_utils::{builder::TestBuilder, factory};

mod by_convention_user;
mod in_status_before;
