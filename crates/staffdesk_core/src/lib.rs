//! Core client-state logic for StaffDesk.
//! This crate is the single source of truth for store invariants.

pub mod logging;
pub mod model;
pub mod storage;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::employee::{Employee, EmployeeDraft, EmployeePatch};
pub use model::theme::{ResolvedTheme, ThemeMode};
pub use model::user::{UserProfile, UserProfilePatch};
pub use storage::kv::{JsonStore, KeyValueStorage, SqliteKeyValueStorage};
pub use storage::{open_store, open_store_in_memory, StorageError, StorageResult};
pub use store::records::{RecordStore, RECORDS_KEY};
pub use store::session::{SessionError, SessionStore, PROFILE_KEY, SESSION_KEY};
pub use store::theme::{
    DarkModeIndicator, HostThemeSignal, SubscriptionHandle, SystemThemeSignal,
    ThemeChangeListener, ThemePreferenceStore, THEME_MODE_KEY,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
