//! Application-wide constants
//!
//! Centralized location for magic values to improve maintainability.

// =============================================================================
// Server Configuration
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 3000;

// =============================================================================
// Storage
// =============================================================================

/// Default storage file path (for development)
pub const DEFAULT_STORAGE_PATH: &str = "users.json";

// =============================================================================
// Validation
// =============================================================================

/// Expected birth-date format, chrono strftime syntax
pub const BIRTH_DATE_FORMAT: &str = "%Y-%m-%d";
