//! Application state - Dependency injection container.

use std::sync::Arc;

use crate::config::Config;
use crate::errors::AppResult;
use crate::services::{UserManager, UserService};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// User service
    pub user_service: Arc<dyn UserService>,
}

impl AppState {
    /// Create application state from configuration, opening (or
    /// bootstrapping) the storage file.
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let manager = UserManager::open(config.storage_path.clone())?;
        Ok(Self {
            user_service: Arc::new(manager),
        })
    }

    /// Create application state with a manually injected service
    pub fn new(user_service: Arc<dyn UserService>) -> Self {
        Self { user_service }
    }
}
