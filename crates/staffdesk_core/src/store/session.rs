//! Authentication session store.
//!
//! # Responsibility
//! - Track the signed-in user (or absence thereof) across restarts.
//! - Keep the session and profile storage keys synchronized on mutation.
//!
//! # Invariants
//! - `is_authenticated` is true exactly when a session is present.
//! - The profile key outlives logout; the session key exists only while
//!   logged in. Edited profile data is restored on the next login.

use crate::model::user::{UserProfile, UserProfilePatch};
use crate::storage::kv::{JsonStore, KeyValueStorage};
use crate::storage::{StorageError, StorageResult};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage key for the active session. Removed on logout.
pub const SESSION_KEY: &str = "auth_session";
/// Storage key for the durable profile. Never removed.
pub const PROFILE_KEY: &str = "user_profile";

// The single static account this client knows about.
const VALID_USERNAME: &str = "admin";
const VALID_PASSWORD: &str = "admin123";

const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid username or password.";

/// Session operation failure.
#[derive(Debug)]
pub enum SessionError {
    /// Credentials did not match the static account. Carries a user-facing
    /// message; there is no lockout or rate limiting.
    InvalidCredentials,
    /// Fatal persistence failure.
    Storage(StorageError),
}

impl SessionError {
    /// User-facing message suitable for direct display.
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidCredentials => INVALID_CREDENTIALS_MESSAGE.to_string(),
            Self::Storage(err) => err.to_string(),
        }
    }
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCredentials => write!(f, "{INVALID_CREDENTIALS_MESSAGE}"),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidCredentials => None,
            Self::Storage(err) => Some(err),
        }
    }
}

impl From<StorageError> for SessionError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

/// Long-lived authentication state store.
pub struct SessionStore<S: KeyValueStorage> {
    kv: JsonStore<S>,
    session: Option<UserProfile>,
}

impl<S: KeyValueStorage> SessionStore<S> {
    /// Constructs the store and hydrates the session from storage.
    ///
    /// A corrupt session value is cleared by the adapter and hydrates as
    /// "logged out".
    pub fn open(storage: S) -> StorageResult<Self> {
        let kv = JsonStore::new(storage);
        let session = kv.read::<UserProfile>(SESSION_KEY)?;
        info!(
            "event=session_hydrate module=session status=ok authenticated={}",
            session.is_some()
        );

        Ok(Self { kv, session })
    }

    /// Whether a user is currently signed in.
    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    /// The signed-in user, if any.
    pub fn session(&self) -> Option<&UserProfile> {
        self.session.as_ref()
    }

    /// Signs in against the static account.
    ///
    /// On success the session is restored from the saved profile when one
    /// exists, so profile edits survive a logout/login cycle; otherwise the
    /// default account profile is created and persisted. Both outcomes end
    /// with the session key rewritten.
    ///
    /// # Errors
    /// - `SessionError::InvalidCredentials` on any credential mismatch.
    /// - `SessionError::Storage` on fatal persistence failure.
    pub fn login(&mut self, username: &str, password: &str) -> Result<(), SessionError> {
        if username != VALID_USERNAME || password != VALID_PASSWORD {
            warn!("event=login module=session status=rejected");
            return Err(SessionError::InvalidCredentials);
        }

        let profile = match self.kv.read::<UserProfile>(PROFILE_KEY)? {
            Some(saved) => saved,
            None => {
                let created = UserProfile::default_account();
                self.kv.write(PROFILE_KEY, &created)?;
                created
            }
        };

        self.kv.write(SESSION_KEY, &profile)?;
        self.session = Some(profile);
        info!("event=login module=session status=ok");

        Ok(())
    }

    /// Clears the in-memory session and removes only the session key.
    pub fn logout(&mut self) -> StorageResult<()> {
        self.session = None;
        self.kv.remove(SESSION_KEY)?;
        info!("event=logout module=session status=ok");

        Ok(())
    }

    /// Merges a partial profile update into the active session and rewrites
    /// both the session and profile keys.
    ///
    /// Returns `false` without touching storage when no session is active.
    pub fn update_profile(&mut self, patch: &UserProfilePatch) -> StorageResult<bool> {
        let Some(session) = self.session.as_mut() else {
            return Ok(false);
        };

        session.apply_patch(patch);
        self.kv.write(SESSION_KEY, session)?;
        self.kv.write(PROFILE_KEY, session)?;
        info!("event=profile_update module=session status=ok");

        Ok(true)
    }

    /// Applies a field-level edit to the active session and re-persists the
    /// full session object to the session key.
    ///
    /// This is the explicit rendition of watch-on-mutation durability: every
    /// nested field change flows through here and ends in a synchronous
    /// write. Returns `false` without touching storage when no session is
    /// active.
    pub fn edit_session(
        &mut self,
        edit: impl FnOnce(&mut UserProfile),
    ) -> StorageResult<bool> {
        let Some(session) = self.session.as_mut() else {
            return Ok(false);
        };

        edit(session);
        self.kv.write(SESSION_KEY, session)?;

        Ok(true)
    }
}
