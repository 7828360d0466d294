//! Service layer for business logic and orchestration.
//!
//! Services sit between the controllers and the repositories. They implement the business
//! rules, coordinate repository calls and own transaction boundaries: every public
//! operation that changes more than one row runs inside a single database transaction.
//!
//! The sale item services (`pass`, `ticket`, `sale`) are generic over the connection. Their
//! public operations open a transaction on `C: TransactionTrait`; the crate-internal
//! building blocks run on whatever connection they are given, so one service can call into
//! another inside the caller's transaction.

pub mod auth;
pub mod cart;
pub mod pass;
pub mod payment;
pub mod sale;
pub mod ticket;
pub mod user_record;
