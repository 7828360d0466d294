//! Factory methods for creating test data.
//!
//! Each entity has its own factory module with a `Factory` struct for customization and a
//! `create_*` convenience function for quick default creation. Factories take the ids of
//! the rows they reference; use `helpers` to create a whole dependency chain at once.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let user = factory::user::create_user(&db).await?;
//! let convention = factory::convention::create_convention(&db).await?;
//!
//! let (user, convention, pass, user_pass) =
//!     factory::helpers::create_user_pass_with_dependencies(&db).await?;
//! ```
//!
//! # Customization
//!
//! ```rust,ignore
//! let ticket = factory::ticket::TicketFactory::new(&db, user.id, convention.id, timeslot.id)
//!     .user_pass(Some(user_pass.id))
//!     .status("authorized")
//!     .build()
//!     .await?;
//! ```

pub mod convention;
pub mod coupon;
pub mod event;
pub mod helpers;
pub mod pass;
pub mod sale;
pub mod ticket;
pub mod user;
pub mod user_record;

// Re-export commonly used factory functions for concise usage
pub use convention::{add_manager, create_convention};
pub use coupon::{create_coupon, create_coupon_type};
pub use event::{create_event, create_timeslot};
pub use pass::{create_pass, create_user_pass};
pub use sale::create_sale;
pub use ticket::create_ticket;
pub use user::create_user;
pub use user_record::create_user_record;
