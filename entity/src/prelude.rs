pub use super::auth_token::Entity as AuthToken;
pub use super::convention::Entity as Convention;
pub use super::convention_manager::Entity as ConventionManager;
pub use super::coupon::Entity as Coupon;
pub use super::coupon_type::Entity as CouponType;
pub use super::event::Entity as Event;
pub use super::medium::Entity as Medium;
pub use super::pass::Entity as Pass;
pub use super::sale::Entity as Sale;
pub use super::ticket::Entity as Ticket;
pub use super::timeslot::Entity as Timeslot;
pub use super::user::Entity as User;
pub use super::user_pass::Entity as UserPass;
pub use super::user_record::Entity as UserRecord;
