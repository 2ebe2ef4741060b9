//! User profile model shared by session and profile storage keys.

use serde::{Deserialize, Serialize};

/// Durable account record for the signed-in user.
///
/// The same shape is written under both the session key (present only while
/// logged in) and the profile key (survives logout).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Account identity. A single static account exists; no uniqueness
    /// machinery beyond that.
    pub username: String,
    pub full_name: String,
    pub email: String,
}

impl UserProfile {
    /// Returns the built-in account profile used when no saved profile exists.
    pub fn default_account() -> Self {
        Self {
            username: "admin".to_string(),
            full_name: "Administrator".to_string(),
            email: "admin@staffdesk.com".to_string(),
        }
    }

    /// Applies a shallow patch in place. Fields left `None` are untouched.
    pub fn apply_patch(&mut self, patch: &UserProfilePatch) {
        if let Some(username) = &patch.username {
            self.username = username.clone();
        }
        if let Some(full_name) = &patch.full_name {
            self.full_name = full_name.clone();
        }
        if let Some(email) = &patch.email {
            self.email = email.clone();
        }
    }
}

/// Partial profile update. Mirrors the editable profile form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserProfilePatch {
    pub username: Option<String>,
    pub full_name: Option<String>,
    pub email: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::{UserProfile, UserProfilePatch};

    #[test]
    fn apply_patch_merges_only_present_fields() {
        let mut profile = UserProfile::default_account();
        profile.apply_patch(&UserProfilePatch {
            full_name: Some("Ada Lovelace".to_string()),
            ..UserProfilePatch::default()
        });

        assert_eq!(profile.full_name, "Ada Lovelace");
        assert_eq!(profile.username, "admin");
        assert_eq!(profile.email, "admin@staffdesk.com");
    }

    #[test]
    fn apply_patch_with_all_fields_replaces_everything() {
        let mut profile = UserProfile::default_account();
        profile.apply_patch(&UserProfilePatch {
            username: Some("root".to_string()),
            full_name: Some("Root User".to_string()),
            email: Some("root@staffdesk.com".to_string()),
        });

        assert_eq!(
            profile,
            UserProfile {
                username: "root".to_string(),
                full_name: "Root User".to_string(),
                email: "root@staffdesk.com".to_string(),
            }
        );
    }
}
