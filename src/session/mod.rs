//! Mock authentication and the current-user session.
//!
//! There is no real identity provider: a single demo account is accepted,
//! and registration creates a local profile. The logged-in profile is kept
//! under the `user` storage key, which is what session-existence checks read.
//! Workouts are only reachable through an authenticated [`Session`], and the
//! [`WorkoutStore`] it hands out borrows the session so it cannot outlive a
//! logout.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::FitError;
use crate::storage::{KeyValueStore, USER_KEY};
use crate::workouts::WorkoutStore;

const DEMO_EMAIL: &str = "demo@example.com";
const DEMO_PASSWORD: &str = "password";
const DEMO_AVATAR: &str = "/avatars/demo-user.png";

/// The logged-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Stable user id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Avatar image path or URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl UserProfile {
    fn demo() -> Self {
        Self {
            id: "user-123".to_string(),
            name: "Demo User".to_string(),
            email: DEMO_EMAIL.to_string(),
            avatar: Some(DEMO_AVATAR.to_string()),
        }
    }
}

/// Partial profile update; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfilePatch {
    /// New display name.
    pub name: Option<String>,
    /// New email.
    pub email: Option<String>,
    /// New avatar.
    pub avatar: Option<String>,
}

/// A login session over a storage backend.
pub struct Session<S: KeyValueStore> {
    storage: S,
    user: Option<UserProfile>,
}

impl<S: KeyValueStore> Session<S> {
    /// Resume whatever session is persisted in `storage`.
    ///
    /// A stored profile that cannot be read counts as logged out.
    #[must_use]
    pub fn resume(storage: S) -> Self {
        let user = match storage.get(USER_KEY) {
            Ok(Some(raw)) => serde_json::from_str::<UserProfile>(&raw)
                .map_err(|e| tracing::warn!(error = %e, "ignoring unreadable stored profile"))
                .ok(),
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(error = %e, "could not read stored profile");
                None
            }
        };

        Self { storage, user }
    }

    /// The logged-in profile, if any.
    #[must_use]
    pub const fn current(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    /// Whether someone is logged in.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Log in with the demo credentials.
    ///
    /// # Errors
    ///
    /// Returns `FitError::Auth` for any other email/password pair.
    pub fn login(&mut self, email: &str, password: &str) -> Result<&UserProfile, FitError> {
        if !email.trim().eq_ignore_ascii_case(DEMO_EMAIL) || password != DEMO_PASSWORD {
            tracing::info!(email, "login refused");
            return Err(FitError::Auth("Invalid email or password".to_string()));
        }

        tracing::info!(email, "logged in");
        self.set_user(UserProfile::demo())
    }

    /// Create a local profile and log in as it.
    ///
    /// # Errors
    ///
    /// Returns `FitError::InvalidInput` for blank fields and `FitError::Auth`
    /// when the email belongs to the demo account.
    pub fn register(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
        now: DateTime<Utc>,
    ) -> Result<&UserProfile, FitError> {
        let (name, email) = (name.trim(), email.trim());
        if name.is_empty() || email.is_empty() || password.is_empty() {
            return Err(FitError::InvalidInput(
                "Name, email and password are required".to_string(),
            ));
        }
        if !email.contains('@') {
            return Err(FitError::InvalidInput(format!("'{email}' is not an email address")));
        }
        if email.eq_ignore_ascii_case(DEMO_EMAIL) {
            return Err(FitError::Auth("User with this email already exists".to_string()));
        }

        let profile = UserProfile {
            id: format!("user-{}", now.timestamp_millis()),
            name: name.to_string(),
            email: email.to_string(),
            avatar: None,
        };
        tracing::info!(id = %profile.id, "registered user");
        self.set_user(profile)
    }

    /// End the session and forget the stored profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored profile cannot be removed.
    pub fn logout(&mut self) -> Result<(), FitError> {
        self.user = None;
        self.storage.remove(USER_KEY)?;
        tracing::info!("logged out");
        Ok(())
    }

    /// Merge `patch` into the current profile.
    ///
    /// # Errors
    ///
    /// Returns `FitError::NotAuthenticated` when nobody is logged in.
    pub fn update_profile(&mut self, patch: &ProfilePatch) -> Result<&UserProfile, FitError> {
        let mut profile = self.user.clone().ok_or(FitError::NotAuthenticated)?;

        if let Some(name) = &patch.name {
            profile.name.clone_from(name);
        }
        if let Some(email) = &patch.email {
            profile.email.clone_from(email);
        }
        if let Some(avatar) = &patch.avatar {
            profile.avatar = Some(avatar.clone());
        }

        self.set_user(profile)
    }

    /// Open the logged-in user's workouts.
    ///
    /// # Errors
    ///
    /// Returns `FitError::NotAuthenticated` when nobody is logged in.
    pub fn workouts(
        &mut self,
        now: DateTime<Utc>,
        seed: bool,
    ) -> Result<WorkoutStore<&mut S>, FitError> {
        if self.user.is_none() {
            return Err(FitError::NotAuthenticated);
        }
        Ok(WorkoutStore::open_with(&mut self.storage, now, seed))
    }

    /// Give back the storage backend.
    pub fn into_storage(self) -> S {
        self.storage
    }

    fn set_user(&mut self, profile: UserProfile) -> Result<&UserProfile, FitError> {
        let json = serde_json::to_string(&profile)?;
        self.storage.set(USER_KEY, &json)?;
        Ok(self.user.insert(profile))
    }
}
