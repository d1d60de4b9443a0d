//! Domain layer - Core business entities.

mod user;

pub use user::{validate_birth_date, User, UserFilter, UserPatch, UserRef};
