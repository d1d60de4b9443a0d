//! Flatfile Users - a REST CRUD service backed by a single-file store
//!
//! User records (first name, second name, birth date) are persisted to
//! one normalized JSON file: a main record table linking into three
//! deduplicating attribute dictionaries, each table with a free-id
//! recycling allocator. No database involved.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Core business entities
//! - **store**: The normalized single-file storage engine
//! - **services**: Application use cases over the store
//! - **api**: HTTP handlers, extractors, and routes
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Create the storage file up front
//! cargo run -- init --storage users.json
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod services;
pub mod store;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{User, UserFilter, UserPatch, UserRef};
pub use errors::{AppError, AppResult};
pub use store::RecordStore;
