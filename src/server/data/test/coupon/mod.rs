use sea_orm::DbErr;

use crate::server::data::coupon::CouponRepository;
use test_utils::{builder::TestBuilder, factory};

mod unused_for_user;
