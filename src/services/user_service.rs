//! User service - Handles user-related business logic.
//!
//! The storage engine is synchronous and single-writer; the service wraps
//! it in a mutex so concurrent HTTP requests are serialized onto it.

use std::path::PathBuf;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::{User, UserFilter, UserPatch};
use crate::errors::{AppError, AppResult};
use crate::store::RecordStore;

/// User service trait for dependency injection
#[async_trait]
pub trait UserService: Send + Sync {
    /// Store a new user and return its record id
    async fn create_user(&self, user: User) -> AppResult<u32>;

    /// Ids of users matching the filter (all users for an empty filter)
    async fn list_users(&self, filter: UserFilter) -> AppResult<Vec<u32>>;

    /// Full user behind a record id
    async fn get_user(&self, id: u32) -> AppResult<User>;

    /// Partially update a user and return its new state
    async fn update_user(&self, id: u32, patch: UserPatch) -> AppResult<User>;

    /// Delete a user
    async fn delete_user(&self, id: u32) -> AppResult<()>;
}

/// Concrete implementation of UserService over the file-backed store
pub struct UserManager {
    store: Mutex<RecordStore>,
}

impl UserManager {
    /// Wrap an already opened store
    pub fn new(store: RecordStore) -> Self {
        Self {
            store: Mutex::new(store),
        }
    }

    /// Open (or bootstrap) the store at `path`
    pub fn open(path: impl Into<PathBuf>) -> AppResult<Self> {
        Ok(Self::new(RecordStore::open(path)?))
    }

    fn store(&self) -> AppResult<std::sync::MutexGuard<'_, RecordStore>> {
        self.store
            .lock()
            .map_err(|_| AppError::internal("store mutex poisoned"))
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn create_user(&self, user: User) -> AppResult<u32> {
        self.store()?.create(&user)
    }

    async fn list_users(&self, filter: UserFilter) -> AppResult<Vec<u32>> {
        self.store()?.ids_matching(&filter)
    }

    async fn get_user(&self, id: u32) -> AppResult<User> {
        self.store()?.get(id)
    }

    async fn update_user(&self, id: u32, patch: UserPatch) -> AppResult<User> {
        self.store()?.update(id, &patch)
    }

    async fn delete_user(&self, id: u32) -> AppResult<()> {
        self.store()?.delete(id)
    }
}
