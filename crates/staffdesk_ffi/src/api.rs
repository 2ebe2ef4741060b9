//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level store operations to Dart via FRB.
//! - Keep error semantics simple for UI integration: envelope responses,
//!   never a panic across the boundary.
//!
//! # Invariants
//! - Each call opens the configured database and hydrates the stores it
//!   needs; hydration is round-trip idempotent, so observable state matches
//!   a long-lived store.
//! - The host owns the platform dark-preference hook and passes its current
//!   value in wherever theme resolution is needed.

use rusqlite::Connection;
use staffdesk_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, open_store,
    ping as ping_inner, DarkModeIndicator, Employee, EmployeeDraft, EmployeePatch,
    HostThemeSignal, RecordStore, SessionStore, SqliteKeyValueStorage, SystemThemeSignal,
    ThemeMode, ThemePreferenceStore, UserProfile, UserProfilePatch,
};
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::OnceLock;

const STORE_DB_FILE_NAME: &str = "staffdesk.sqlite3";
static STORE_DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on
///   failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Configures the application storage directory once per process.
///
/// The state database lives in a fixed file inside this directory.
///
/// # FFI contract
/// - Idempotent for the same directory; conflicting reconfiguration returns
///   an error message.
/// - Never panics; returns empty string on success.
#[flutter_rust_bridge::frb(sync)]
pub fn configure_storage_dir(dir: String) -> String {
    let trimmed = dir.trim();
    if trimmed.is_empty() {
        return "storage dir cannot be empty".to_string();
    }
    let path = PathBuf::from(trimmed);
    if !path.is_absolute() {
        return format!("storage dir must be an absolute path, got `{trimmed}`");
    }

    let db_path = path.join(STORE_DB_FILE_NAME);
    let active = STORE_DB_PATH.get_or_init(|| db_path.clone());
    if active != &db_path {
        return format!(
            "storage already configured at `{}`; refusing to switch to `{}`",
            active.display(),
            db_path.display()
        );
    }

    log::info!(
        "event=storage_configure module=ffi status=ok path={}",
        active.display()
    );
    String::new()
}

fn open_configured() -> Result<Connection, String> {
    let Some(path) = STORE_DB_PATH.get() else {
        return Err("storage not configured; call configure_storage_dir first".to_string());
    };
    open_store(path).map_err(|err| err.to_string())
}

/// Signed-in user projection for UI display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionView {
    pub username: String,
    pub full_name: String,
    pub email: String,
}

impl SessionView {
    fn from_profile(profile: &UserProfile) -> Self {
        Self {
            username: profile.username.clone(),
            full_name: profile.full_name.clone(),
            email: profile.email.clone(),
        }
    }
}

/// Response envelope for session operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthResponse {
    /// Whether the operation succeeded.
    pub ok: bool,
    /// Signed-in user after the operation, if any.
    pub session: Option<SessionView>,
    /// Human-readable message for diagnostics/UI.
    pub message: String,
}

impl AuthResponse {
    fn success(session: Option<SessionView>, message: impl Into<String>) -> Self {
        Self {
            ok: true,
            session,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            session: None,
            message: message.into(),
        }
    }
}

/// Signs in against the static account.
#[flutter_rust_bridge::frb(sync)]
pub fn login(username: String, password: String) -> AuthResponse {
    let conn = match open_configured() {
        Ok(conn) => conn,
        Err(message) => return AuthResponse::failure(message),
    };
    let mut store = match SessionStore::open(SqliteKeyValueStorage::new(&conn)) {
        Ok(store) => store,
        Err(err) => return AuthResponse::failure(err.to_string()),
    };

    match store.login(&username, &password) {
        Ok(()) => AuthResponse::success(
            store.session().map(SessionView::from_profile),
            "signed in",
        ),
        Err(err) => AuthResponse::failure(err.user_message()),
    }
}

/// Signs out; only the session key is removed, the profile survives.
#[flutter_rust_bridge::frb(sync)]
pub fn logout() -> AuthResponse {
    let conn = match open_configured() {
        Ok(conn) => conn,
        Err(message) => return AuthResponse::failure(message),
    };
    let mut store = match SessionStore::open(SqliteKeyValueStorage::new(&conn)) {
        Ok(store) => store,
        Err(err) => return AuthResponse::failure(err.to_string()),
    };

    match store.logout() {
        Ok(()) => AuthResponse::success(None, "signed out"),
        Err(err) => AuthResponse::failure(err.to_string()),
    }
}

/// Returns the hydrated session state; `session` is absent when logged out.
#[flutter_rust_bridge::frb(sync)]
pub fn current_session() -> AuthResponse {
    let conn = match open_configured() {
        Ok(conn) => conn,
        Err(message) => return AuthResponse::failure(message),
    };

    match SessionStore::open(SqliteKeyValueStorage::new(&conn)) {
        Ok(store) => AuthResponse::success(
            store.session().map(SessionView::from_profile),
            "session hydrated",
        ),
        Err(err) => AuthResponse::failure(err.to_string()),
    }
}

/// Merges the provided profile fields into the active session.
///
/// A call with no active session succeeds with an unchanged, absent session.
#[flutter_rust_bridge::frb(sync)]
pub fn update_profile(
    username: Option<String>,
    full_name: Option<String>,
    email: Option<String>,
) -> AuthResponse {
    let conn = match open_configured() {
        Ok(conn) => conn,
        Err(message) => return AuthResponse::failure(message),
    };
    let mut store = match SessionStore::open(SqliteKeyValueStorage::new(&conn)) {
        Ok(store) => store,
        Err(err) => return AuthResponse::failure(err.to_string()),
    };

    let patch = UserProfilePatch {
        username,
        full_name,
        email,
    };
    match store.update_profile(&patch) {
        Ok(true) => AuthResponse::success(
            store.session().map(SessionView::from_profile),
            "profile updated",
        ),
        Ok(false) => AuthResponse::success(None, "no active session"),
        Err(err) => AuthResponse::failure(err.to_string()),
    }
}

/// Employee record projection for UI display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeView {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: String,
    pub join_date: String,
}

impl EmployeeView {
    fn from_record(record: &Employee) -> Self {
        Self {
            id: record.id,
            name: record.name.clone(),
            email: record.email.clone(),
            role: record.role.clone(),
            join_date: record.join_date.clone(),
        }
    }
}

/// Response envelope for record listing and search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeListResponse {
    pub ok: bool,
    pub items: Vec<EmployeeView>,
    pub message: String,
}

impl EmployeeListResponse {
    fn success(items: Vec<EmployeeView>) -> Self {
        Self {
            ok: true,
            items,
            message: String::new(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            items: Vec::new(),
            message: message.into(),
        }
    }
}

/// Response envelope for record mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordActionResponse {
    pub ok: bool,
    /// Id of the affected record, when one exists.
    pub id: Option<i64>,
    pub message: String,
}

impl RecordActionResponse {
    fn success(id: Option<i64>, message: impl Into<String>) -> Self {
        Self {
            ok: true,
            id,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            id: None,
            message: message.into(),
        }
    }
}

fn open_record_store(
    conn: &Connection,
) -> Result<RecordStore<SqliteKeyValueStorage<'_>>, String> {
    RecordStore::open(SqliteKeyValueStorage::new(conn)).map_err(|err| err.to_string())
}

/// Lists the full record collection in insertion order.
#[flutter_rust_bridge::frb(sync)]
pub fn list_employees() -> EmployeeListResponse {
    let conn = match open_configured() {
        Ok(conn) => conn,
        Err(message) => return EmployeeListResponse::failure(message),
    };

    match open_record_store(&conn) {
        Ok(store) => EmployeeListResponse::success(
            store.records().iter().map(EmployeeView::from_record).collect(),
        ),
        Err(message) => EmployeeListResponse::failure(message),
    }
}

/// Case-insensitive substring search over name, email and role.
#[flutter_rust_bridge::frb(sync)]
pub fn search_employees(term: String) -> EmployeeListResponse {
    let conn = match open_configured() {
        Ok(conn) => conn,
        Err(message) => return EmployeeListResponse::failure(message),
    };

    match open_record_store(&conn) {
        Ok(store) => EmployeeListResponse::success(
            store
                .filtered(&term)
                .into_iter()
                .map(EmployeeView::from_record)
                .collect(),
        ),
        Err(message) => EmployeeListResponse::failure(message),
    }
}

/// Looks up one record by the textual id delivered by route parameters.
#[flutter_rust_bridge::frb(sync)]
pub fn get_employee(id_text: String) -> EmployeeListResponse {
    let conn = match open_configured() {
        Ok(conn) => conn,
        Err(message) => return EmployeeListResponse::failure(message),
    };

    match open_record_store(&conn) {
        Ok(store) => match store.get_by_id_text(&id_text) {
            Some(record) => {
                EmployeeListResponse::success(vec![EmployeeView::from_record(record)])
            }
            None => EmployeeListResponse::success(Vec::new()),
        },
        Err(message) => EmployeeListResponse::failure(message),
    }
}

/// Creates one record; the store allocates its id.
#[flutter_rust_bridge::frb(sync)]
pub fn create_employee(
    name: String,
    email: String,
    role: String,
    join_date: String,
) -> RecordActionResponse {
    let conn = match open_configured() {
        Ok(conn) => conn,
        Err(message) => return RecordActionResponse::failure(message),
    };
    let mut store = match open_record_store(&conn) {
        Ok(store) => store,
        Err(message) => return RecordActionResponse::failure(message),
    };

    match store.add(EmployeeDraft {
        name,
        email,
        role,
        join_date,
    }) {
        Ok(record) => RecordActionResponse::success(Some(record.id), "record created"),
        Err(err) => RecordActionResponse::failure(err.to_string()),
    }
}

/// Merges the provided fields into the record with the given id.
///
/// An unknown id succeeds with `id = None` ("not found" is a sentinel,
/// not an error).
#[flutter_rust_bridge::frb(sync)]
pub fn update_employee(
    id: i64,
    name: Option<String>,
    email: Option<String>,
    role: Option<String>,
    join_date: Option<String>,
) -> RecordActionResponse {
    let conn = match open_configured() {
        Ok(conn) => conn,
        Err(message) => return RecordActionResponse::failure(message),
    };
    let mut store = match open_record_store(&conn) {
        Ok(store) => store,
        Err(message) => return RecordActionResponse::failure(message),
    };

    let patch = EmployeePatch {
        name,
        email,
        role,
        join_date,
    };
    match store.update(id, &patch) {
        Ok(Some(record)) => RecordActionResponse::success(Some(record.id), "record updated"),
        Ok(None) => RecordActionResponse::success(None, "record not found"),
        Err(err) => RecordActionResponse::failure(err.to_string()),
    }
}

/// Deletes the record with the given id. An unknown id is a no-op.
#[flutter_rust_bridge::frb(sync)]
pub fn delete_employee(id: i64) -> RecordActionResponse {
    let conn = match open_configured() {
        Ok(conn) => conn,
        Err(message) => return RecordActionResponse::failure(message),
    };
    let mut store = match open_record_store(&conn) {
        Ok(store) => store,
        Err(message) => return RecordActionResponse::failure(message),
    };

    match store.delete(id) {
        Ok(true) => RecordActionResponse::success(Some(id), "record deleted"),
        Ok(false) => RecordActionResponse::success(None, "record not found"),
        Err(err) => RecordActionResponse::failure(err.to_string()),
    }
}

/// Theme state projection for the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeSnapshotResponse {
    pub ok: bool,
    /// Selected mode: `light | dark | system`.
    pub mode: String,
    /// Concrete theme: `light | dark`.
    pub resolved_theme: String,
    pub is_dark: bool,
    pub message: String,
}

impl ThemeSnapshotResponse {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            mode: String::new(),
            resolved_theme: String::new(),
            is_dark: false,
            message: message.into(),
        }
    }
}

fn theme_snapshot_from(
    store: &ThemePreferenceStore<SqliteKeyValueStorage<'_>>,
) -> ThemeSnapshotResponse {
    ThemeSnapshotResponse {
        ok: true,
        mode: store.mode().as_str().to_string(),
        resolved_theme: store.resolved().as_str().to_string(),
        is_dark: store.is_dark(),
        message: String::new(),
    }
}

fn open_theme_store(
    conn: &Connection,
    os_prefers_dark: bool,
) -> Result<ThemePreferenceStore<SqliteKeyValueStorage<'_>>, String> {
    let signal = Rc::new(HostThemeSignal::new(os_prefers_dark)) as Rc<dyn SystemThemeSignal>;
    ThemePreferenceStore::open(
        SqliteKeyValueStorage::new(conn),
        signal,
        DarkModeIndicator::new(),
    )
    .map_err(|err| err.to_string())
}

/// Returns the persisted mode resolved against the host's current OS dark
/// preference. The host owns the platform media-query hook.
#[flutter_rust_bridge::frb(sync)]
pub fn theme_snapshot(os_prefers_dark: bool) -> ThemeSnapshotResponse {
    let conn = match open_configured() {
        Ok(conn) => conn,
        Err(message) => return ThemeSnapshotResponse::failure(message),
    };

    match open_theme_store(&conn, os_prefers_dark) {
        Ok(store) => theme_snapshot_from(&store),
        Err(message) => ThemeSnapshotResponse::failure(message),
    }
}

/// Selects and persists a theme mode given by its stable string id.
///
/// An unknown mode string is a caller error and fails loudly in the
/// response envelope.
#[flutter_rust_bridge::frb(sync)]
pub fn set_theme_mode(mode: String, os_prefers_dark: bool) -> ThemeSnapshotResponse {
    let Some(mode) = ThemeMode::parse(&mode) else {
        return ThemeSnapshotResponse::failure(format!(
            "unsupported theme mode `{mode}`; expected light|dark|system"
        ));
    };

    let conn = match open_configured() {
        Ok(conn) => conn,
        Err(message) => return ThemeSnapshotResponse::failure(message),
    };
    let store = match open_theme_store(&conn, os_prefers_dark) {
        Ok(store) => store,
        Err(message) => return ThemeSnapshotResponse::failure(message),
    };

    match store.set_mode(mode) {
        Ok(()) => theme_snapshot_from(&store),
        Err(err) => ThemeSnapshotResponse::failure(err.to_string()),
    }
}
