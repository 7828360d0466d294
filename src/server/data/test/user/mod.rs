use sea_orm::DbErr;

use crate::server::{data::user::UserRepository, model::user::UpsertUserParams};
use test_utils::builder::TestBuilder;

mod upsert;
