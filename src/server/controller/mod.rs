//! HTTP request handlers.
//!
//! Controllers extract the request input, run the guards, call a service and convert the
//! result into a DTO. They carry no business rules of their own.

pub mod auth;
pub mod cart;
pub mod checkout;
pub mod desk;
pub mod payment;
pub mod record;
