//! Database repository layer for all domain entities.
//!
//! Repositories use SeaORM entity models internally and return domain models to keep the
//! data layer separate from business logic. Repositories touched by the sale lifecycle are
//! generic over `ConnectionTrait` so services can run them inside a transaction.

pub mod auth_token;
pub mod convention;
pub mod coupon;
pub mod medium;
pub mod pass;
pub mod sale;
pub mod ticket;
pub mod timeslot;
pub mod user;
pub mod user_record;

#[cfg(test)]
mod test;
