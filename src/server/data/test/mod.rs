mod auth_token;
mod coupon;
mod medium;
mod ticket;
mod user;
mod user_pass;
mod user_record;
