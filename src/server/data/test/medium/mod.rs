use sea_orm::DbErr;

use crate::server::{
    data::medium::MediumRepository,
    model::medium::{CreateMediumParams, MediumSource},
};
use test_utils::{builder::TestBuilder, factory};

mod create;
