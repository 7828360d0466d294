use sea_orm::DbErr;

use crate::server::{
    data::{coupon::CouponRepository, ticket::TicketRepository},
    error::{sale::SaleError, AppError},
    model::{
        pass::CreateUserPassParams,
        status::{SaleAction, SaleItemStatus},
    },
    service::pass::PassService,
};
use test_utils::{builder::TestBuilder, factory};

mod cascade;
mod refund;
