//! SeaORM entity models for the convention backend.
//!
//! One module per table. Status columns are stored as plain strings and parsed into
//! domain enums at the repository boundary.

pub mod prelude;

pub mod auth_token;
pub mod convention;
pub mod convention_manager;
pub mod coupon;
pub mod coupon_type;
pub mod event;
pub mod medium;
pub mod pass;
pub mod sale;
pub mod ticket;
pub mod timeslot;
pub mod user;
pub mod user_pass;
pub mod user_record;
