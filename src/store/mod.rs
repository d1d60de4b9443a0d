//! Storage engine - Normalized single-file persistence.
//!
//! Users are split across a main record table and three deduplicating
//! attribute dictionaries, each with a free-id recycling pool. The whole
//! document lives in memory and is rewritten to one JSON file after every
//! mutation. Single-threaded, synchronous; callers serialize access.

pub mod dictionary;
pub mod document;
pub mod id_pool;
pub mod record_store;
pub mod records;

pub use document::{Attribute, DictEntry, RecordEntry, StoreDocument};
pub use id_pool::IdPool;
pub use record_store::RecordStore;
