//! Application services layer - Use cases and business logic.
//!
//! Services sit between the HTTP handlers and the storage engine and
//! expose trait seams for dependency inversion.

mod user_service;

pub use user_service::{UserManager, UserService};
