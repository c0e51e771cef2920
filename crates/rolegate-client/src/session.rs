//! File-backed session storage.
//!
//! The original console kept `{token, user}` in browser localStorage; here
//! the same snapshot lives in a JSON file whose path comes from
//! configuration. The store is the `ActorSource` collaborator of the
//! authorization core: no file (or a cleared one) means unauthenticated.

use crate::types::User;
use rolegate_rbac::{Actor, ActorSource};
use rolegate_types::SessionToken;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// A signed-in session: the bearer token and the user it belongs to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub token: SessionToken,
    pub user: User,
}

impl Session {
    /// The actor snapshot for authorization decisions.
    pub fn actor(&self) -> Actor {
        Actor::new(self.user.id.clone(), self.user.user_type)
    }
}

/// Error type for session storage.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to access session file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("session file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Loads, saves and clears the session file.
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the current session; `None` when signed out.
    pub fn load(&self) -> Result<Option<Session>, SessionError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(SessionError::Io {
                    path: self.path.clone(),
                    source: err,
                });
            }
        };

        let session = serde_json::from_str(&raw)?;
        Ok(Some(session))
    }

    /// Persists a freshly signed-in session.
    pub fn save(&self, session: &Session) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| SessionError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let raw = serde_json::to_string_pretty(session)?;
        fs::write(&self.path, raw).map_err(|source| SessionError::Io {
            path: self.path.clone(),
            source,
        })?;

        debug!(path = %self.path.display(), user = %session.user.id, "session saved");
        Ok(())
    }

    /// Removes the session file, signing the user out locally.
    pub fn clear(&self) -> Result<(), SessionError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!(path = %self.path.display(), "session cleared");
                Ok(())
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(SessionError::Io {
                path: self.path.clone(),
                source: err,
            }),
        }
    }
}

impl ActorSource for SessionStore {
    /// An unreadable or corrupt session counts as signed out; the gate
    /// then refuses with `NotAuthenticated` rather than crashing the
    /// command.
    fn current_actor(&self) -> Option<Actor> {
        self.load().ok().flatten().map(|session| session.actor())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rolegate_rbac::Role;
    use rolegate_types::UserId;
    use tempfile::tempdir;

    fn sample_session() -> Session {
        Session {
            token: SessionToken::new("tok-123"),
            user: User {
                id: UserId::new("u-9"),
                username: "ops".to_string(),
                email: "ops@example.com".to_string(),
                first_name: None,
                last_name: None,
                user_type: Role::Admin,
                active: true,
                created_at: None,
            },
        }
    }

    #[test]
    fn save_load_round_trip() {
        let dir = tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("session.json"));

        assert!(store.load().unwrap().is_none());

        store.save(&sample_session()).unwrap();
        let loaded = store.load().unwrap().expect("session present");
        assert_eq!(loaded.token.expose(), "tok-123");
        assert_eq!(loaded.user.user_type, Role::Admin);
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("nested/dir/session.json"));
        store.save(&sample_session()).unwrap();
        assert!(store.path().exists());
    }

    #[test]
    fn clear_is_idempotent() {
        let dir = tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("session.json"));

        store.save(&sample_session()).unwrap();
        store.clear().unwrap();
        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn actor_snapshot_reflects_the_stored_user() {
        let session = sample_session();
        let actor = session.actor();
        assert_eq!(actor.id, UserId::new("u-9"));
        assert_eq!(actor.role, Role::Admin);
    }

    #[test]
    fn corrupt_session_reads_as_signed_out_via_actor_source() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{not json").unwrap();

        let store = SessionStore::new(&path);
        assert!(store.load().is_err());
        assert!(store.current_actor().is_none());
    }
}
