use crate::server::{
    data::ticket::TicketRepository,
    model::{status::SaleItemStatus, ticket::CreateTicketParams},
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod in_cart;
mod sale_assignment;
mod valid_intervals_by_user_pass;
