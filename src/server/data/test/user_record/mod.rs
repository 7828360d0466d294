use sea_orm::DbErr;

use crate::server::{
    data::user_record::UserRecordRepository,
    model::record::{CreateRecordParams, RecordAcl, UpdateRecordParams},
};
use test_utils::{builder::TestBuilder, factory};

mod catalog;
mod crud;
