use chrono::{Duration, Utc};
use sea_orm::DbErr;

use crate::server::data::auth_token::AuthTokenRepository;
use test_utils::{builder::TestBuilder, factory};

mod find_valid;
