//! Local demo-mode authentication.
//!
//! No real security (out of scope): credentials are validated for shape,
//! a network round-trip is simulated with a cooperative async delay, and
//! the session lives in the entity store's kv table. All store mutations
//! stay synchronous; suspension happens only at the explicit sleep.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AuthError;
use crate::storage::Database;
use crate::user::UserProfile;

const KEY_UID: &str = "session.uid";
const KEY_EMAIL: &str = "session.email";
const KEY_NAME: &str = "session.name";

const MIN_PASSWORD_LEN: usize = 6;
const SIMULATED_DELAY: Duration = Duration::from_millis(1500);

/// The signed-in identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    pub email: String,
    pub display_name: String,
}

/// Local authentication manager.
pub struct AuthManager {
    db: Database,
    delay: Duration,
}

impl AuthManager {
    pub fn new(db: Database) -> Self {
        Self {
            db,
            delay: SIMULATED_DELAY,
        }
    }

    /// Manager without the simulated network delay (for tests).
    pub fn with_delay(db: Database, delay: Duration) -> Self {
        Self { db, delay }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Sign in with email and password.
    ///
    /// Demo mode accepts any well-formed credentials; the display name is
    /// derived from the email local part.
    ///
    /// # Errors
    /// Returns `InvalidCredentials` for empty fields, or a storage error.
    pub async fn sign_in(&mut self, email: &str, password: &str) -> Result<AuthUser, AuthError> {
        if email.is_empty() || password.is_empty() {
            return Err(AuthError::InvalidCredentials);
        }

        tokio::time::sleep(self.delay).await;

        let display_name = email.split('@').next().unwrap_or("User").to_string();
        let user = AuthUser {
            id: Uuid::new_v4().to_string(),
            email: email.to_string(),
            display_name,
        };
        self.store_session(&user)?;
        Ok(user)
    }

    /// Create an account and sign in.
    ///
    /// # Errors
    /// Returns `InvalidCredentials` for empty fields, `WeakPassword` for
    /// passwords under 6 characters, or a storage error.
    pub async fn sign_up(
        &mut self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<AuthUser, AuthError> {
        if email.is_empty() || password.is_empty() {
            return Err(AuthError::InvalidCredentials);
        }
        if password.len() < MIN_PASSWORD_LEN {
            return Err(AuthError::WeakPassword);
        }

        tokio::time::sleep(self.delay).await;

        let user = AuthUser {
            id: Uuid::new_v4().to_string(),
            email: email.to_string(),
            display_name: display_name.to_string(),
        };
        self.store_session(&user)?;

        let mut profile = UserProfile::new(display_name, email);
        profile.id = user.id.clone();
        self.db.upsert_user(&profile)?;

        Ok(user)
    }

    /// End the current session.
    ///
    /// # Errors
    /// Returns a storage error if the session cannot be cleared.
    pub fn sign_out(&mut self) -> Result<(), AuthError> {
        self.db.kv_delete(KEY_UID)?;
        self.db.kv_delete(KEY_EMAIL)?;
        self.db.kv_delete(KEY_NAME)?;
        Ok(())
    }

    /// The active session, if any.
    pub fn current_user(&self) -> Result<Option<AuthUser>, AuthError> {
        let uid = match self.db.kv_get(KEY_UID)? {
            Some(uid) if !uid.is_empty() => uid,
            _ => return Ok(None),
        };
        let email = self.db.kv_get(KEY_EMAIL)?.unwrap_or_default();
        let display_name = self.db.kv_get(KEY_NAME)?.unwrap_or_default();
        Ok(Some(AuthUser {
            id: uid,
            email,
            display_name,
        }))
    }

    fn store_session(&self, user: &AuthUser) -> Result<(), AuthError> {
        self.db.kv_set(KEY_UID, &user.id)?;
        self.db.kv_set(KEY_EMAIL, &user.email)?;
        self.db.kv_set(KEY_NAME, &user.display_name)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> AuthManager {
        AuthManager::with_delay(Database::open_memory().unwrap(), Duration::ZERO)
    }

    #[tokio::test]
    async fn sign_in_rejects_empty_credentials() {
        let mut auth = manager();
        assert!(matches!(
            auth.sign_in("", "secret1").await,
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            auth.sign_in("a@b.com", "").await,
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn sign_up_rejects_weak_password() {
        let mut auth = manager();
        assert!(matches!(
            auth.sign_up("a@b.com", "short", "Alex").await,
            Err(AuthError::WeakPassword)
        ));
    }

    #[tokio::test]
    async fn sign_in_derives_display_name_and_stores_session() {
        let mut auth = manager();
        let user = auth.sign_in("alex@example.com", "secret1").await.unwrap();
        assert_eq!(user.display_name, "alex");

        let current = auth.current_user().unwrap().unwrap();
        assert_eq!(current.id, user.id);
        assert_eq!(current.email, "alex@example.com");
    }

    #[tokio::test]
    async fn sign_up_creates_profile_row() {
        let mut auth = manager();
        let user = auth.sign_up("alex@example.com", "secret1", "Alex").await.unwrap();
        let profile = auth.database().get_user(&user.id).unwrap().unwrap();
        assert_eq!(profile.user_name, "Alex");
    }

    #[tokio::test]
    async fn sign_out_clears_session() {
        let mut auth = manager();
        auth.sign_in("alex@example.com", "secret1").await.unwrap();
        auth.sign_out().unwrap();
        assert!(auth.current_user().unwrap().is_none());
    }
}
