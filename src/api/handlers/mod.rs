// src/api/handlers/mod.rs
mod health;
mod points;
mod submit;

pub use health::{health_check, method_not_allowed, not_found};
pub use points::get_points;
pub use submit::submit;
