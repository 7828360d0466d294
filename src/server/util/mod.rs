//! Small helpers shared by controllers and middleware.

pub mod input;
