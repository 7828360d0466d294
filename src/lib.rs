//! Convention management backend: sales and payments, per-user records, login providers
//! and media.

pub mod model;
pub mod server;
