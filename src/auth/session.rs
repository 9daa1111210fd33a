use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::User;

/// Storage key (file name) for the bearer token.
/// Fixed as part of the storage contract so upgrades do not orphan sessions.
const TOKEN_KEY: &str = "authToken";

/// Storage key (file name) for the serialized user profile.
const USER_KEY: &str = "user";

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Errore di archiviazione locale: {0}")]
    Io(#[from] std::io::Error),

    #[error("Errore di serializzazione dei dati di sessione: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// An authenticated session: bearer token plus the user it belongs to.
/// The two always travel together; absence of a session is `Option::None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: User,
}

/// Durable store for the authenticated session.
///
/// The token and user profile are persisted under fixed keys (one file per
/// key) in the store's directory and are always written and cleared as a
/// pair. Malformed or partial stored state is self-healing: `get` drops the
/// corrupted values and reports no session rather than failing.
///
/// The store does no locking. Overlapping `set`/`clear` calls from distinct
/// logical flows (a fresh login racing an expiry-triggered clear) are
/// last-writer-wins; callers drive the store from a single task.
#[derive(Debug, Clone)]
pub struct SessionStore {
    dir: PathBuf,
}

impl SessionStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Read the current session from storage.
    ///
    /// Returns `None` when no session is stored. A stored value that cannot
    /// be used (empty token, unparsable user JSON, or one key present
    /// without the other) is removed and treated as no session.
    pub fn get(&self) -> Result<Option<Session>, StorageError> {
        let token = self.read_key(TOKEN_KEY)?;
        let user_json = self.read_key(USER_KEY)?;

        let (token, user_json) = match (token, user_json) {
            (Some(t), Some(u)) => (t, u),
            (None, None) => return Ok(None),
            _ => {
                warn!("Partial session in storage, dropping it");
                self.clear()?;
                return Ok(None);
            }
        };

        if token.trim().is_empty() {
            warn!("Empty token in storage, dropping session");
            self.clear()?;
            return Ok(None);
        }

        let user: User = match serde_json::from_str(&user_json) {
            Ok(user) => user,
            Err(e) => {
                warn!(error = %e, "Malformed user profile in storage, dropping session");
                self.clear()?;
                return Ok(None);
            }
        };

        Ok(Some(Session { token, user }))
    }

    /// Persist a new session. Both values are written before this returns;
    /// the user profile goes first so a reader that finds a token always
    /// finds a profile next to it.
    pub fn set(&self, token: &str, user: &User) -> Result<(), StorageError> {
        std::fs::create_dir_all(&self.dir)?;
        let user_json = serde_json::to_string(user)?;
        std::fs::write(self.dir.join(USER_KEY), user_json)?;
        std::fs::write(self.dir.join(TOKEN_KEY), token)?;
        debug!(user_id = user.id, "Session stored");
        Ok(())
    }

    /// Remove the stored session. Idempotent: clearing an already-empty
    /// store is a no-op.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.remove_key(TOKEN_KEY)?;
        self.remove_key(USER_KEY)?;
        Ok(())
    }

    /// True iff both a token and a user profile are currently stored.
    pub fn is_authenticated(&self) -> Result<bool, StorageError> {
        Ok(self.get()?.is_some())
    }

    /// Bearer token of the current session, if any.
    pub fn token(&self) -> Result<Option<String>, StorageError> {
        Ok(self.get()?.map(|s| s.token))
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }

    fn read_key(&self, key: &str) -> Result<Option<String>, StorageError> {
        match std::fs::read_to_string(self.key_path(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn remove_key(&self, key: &str) -> Result<(), StorageError> {
        match std::fs::remove_file(self.key_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_user() -> User {
        User {
            id: 1,
            first_name: "Anna".to_string(),
            last_name: "Verdi".to_string(),
            email: "a@v.com".to_string(),
        }
    }

    #[test]
    fn test_set_then_get_roundtrip() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let store = SessionStore::new(dir.path().to_path_buf());

        let user = test_user();
        store.set("tok-123", &user).expect("Failed to store session");

        let session = store
            .get()
            .expect("Failed to read session")
            .expect("No session stored");
        assert_eq!(session.token, "tok-123");
        assert_eq!(session.user, user);
        assert!(store.is_authenticated().unwrap());
    }

    #[test]
    fn test_empty_store_is_unauthenticated() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let store = SessionStore::new(dir.path().to_path_buf());

        assert!(store.get().expect("Failed to read session").is_none());
        assert!(!store.is_authenticated().unwrap());
    }

    #[test]
    fn test_clear_is_idempotent() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let store = SessionStore::new(dir.path().to_path_buf());

        store.set("tok", &test_user()).expect("Failed to store session");
        store.clear().expect("Failed to clear session");
        assert!(store.get().expect("Failed to read session").is_none());

        // Clearing an already-empty store is not an error
        store.clear().expect("Second clear failed");
        assert!(!store.is_authenticated().unwrap());
    }

    #[test]
    fn test_malformed_user_self_heals() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let store = SessionStore::new(dir.path().to_path_buf());

        std::fs::write(dir.path().join(TOKEN_KEY), "tok").unwrap();
        std::fs::write(dir.path().join(USER_KEY), "{not json").unwrap();

        assert!(store
            .get()
            .expect("get must not fail on malformed data")
            .is_none());

        // Both keys must be gone afterwards
        assert!(!dir.path().join(TOKEN_KEY).exists());
        assert!(!dir.path().join(USER_KEY).exists());
    }

    #[test]
    fn test_partial_state_treated_as_absent() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let store = SessionStore::new(dir.path().to_path_buf());

        // Token without a user profile
        std::fs::write(dir.path().join(TOKEN_KEY), "orphan-token").unwrap();

        assert!(store
            .get()
            .expect("get must not fail on partial data")
            .is_none());
        assert!(!dir.path().join(TOKEN_KEY).exists());
    }

    #[test]
    fn test_empty_token_treated_as_absent() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let store = SessionStore::new(dir.path().to_path_buf());

        std::fs::write(dir.path().join(TOKEN_KEY), "  ").unwrap();
        std::fs::write(
            dir.path().join(USER_KEY),
            serde_json::to_string(&test_user()).unwrap(),
        )
        .unwrap();

        assert!(store
            .get()
            .expect("get must not fail on empty token")
            .is_none());
    }

    #[test]
    fn test_set_overwrites_previous_session() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let store = SessionStore::new(dir.path().to_path_buf());

        store.set("first", &test_user()).unwrap();
        let other = User {
            id: 2,
            first_name: "Mario".to_string(),
            last_name: "Rossi".to_string(),
            email: "m@r.com".to_string(),
        };
        store.set("second", &other).unwrap();

        let session = store.get().unwrap().expect("No session stored");
        assert_eq!(session.token, "second");
        assert_eq!(session.user.id, 2);
    }
}
