//! The session of record: who is logged in, in memory and on disk.
//!
//! There is exactly one durable copy (a JSON file under the config
//! directory) and one in-memory copy, both owned here. Login and logout
//! keep the two consistent: the durable write happens first and a failure
//! leaves memory untouched, so no caller ever observes them disagreeing.

use anyhow::Result;
use directories::ProjectDirs;
use shared::{Identity, Role};
use std::path::PathBuf;
use thiserror::Error;

const SESSION_FILE: &str = "session.json";

#[derive(Debug, Error)]
pub enum SessionError {
    /// A protected capability was used without an authenticated session.
    /// This is a programming error in the caller, not a user-facing state;
    /// the route guard should have redirected before getting here.
    #[error("no authenticated session; run 'huddle login' first")]
    NotAuthenticated,
}

/// Durable storage for the persisted identity.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new() -> Result<Self> {
        let proj_dirs = ProjectDirs::from("com", "huddle", "huddle")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        let dir = proj_dirs.config_dir();
        std::fs::create_dir_all(dir)?;
        Ok(Self {
            path: dir.join(SESSION_FILE),
        })
    }

    /// Store rooted at an explicit directory. Used by tests; the default
    /// store lives in the platform config directory.
    pub fn at_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            path: dir.into().join(SESSION_FILE),
        }
    }

    /// Read the persisted identity, if any. A malformed file is treated as
    /// absent (logged, never fatal): the user simply has to log in again.
    pub fn load(&self) -> Option<Identity> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!("Failed to read session file {:?}: {}", self.path, e);
                return None;
            }
        };
        match serde_json::from_str(&content) {
            Ok(identity) => Some(identity),
            Err(e) => {
                tracing::warn!("Discarding malformed session file {:?}: {}", self.path, e);
                None
            }
        }
    }

    /// Persist the identity atomically: write a temp file, then rename
    /// over the session file.
    pub fn save(&self, identity: &Identity) -> Result<()> {
        let content = serde_json::to_string_pretty(identity)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, content)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// Remove the persisted identity. Already-absent is fine.
    pub fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Process-wide source of truth for "who is logged in".
///
/// Owned by the application root and passed by reference; views read it
/// through the accessors and never mutate identity state directly.
#[derive(Debug)]
pub struct Session {
    identity: Option<Identity>,
    store: SessionStore,
}

impl Session {
    /// Load the session at startup from the durable store. No network
    /// call validates the persisted identity; a stale identity surfaces
    /// as backend errors on the first real request.
    pub fn restore(store: SessionStore) -> Self {
        let identity = store.load();
        if let Some(identity) = &identity {
            tracing::debug!("Restored session for {}", identity.email);
        }
        Self { identity, store }
    }

    /// Record a successful backend authentication. Credentials have
    /// already been validated by the caller; this only stores the result,
    /// durably first and in memory second.
    pub fn login(&mut self, identity: Identity) -> Result<()> {
        self.store.save(&identity)?;
        self.identity = Some(identity);
        Ok(())
    }

    /// Clear the session. Idempotent.
    pub fn logout(&mut self) -> Result<()> {
        self.store.clear()?;
        self.identity = None;
        Ok(())
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    pub fn current_identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    /// The fail-loud accessor for code paths that must not run without an
    /// authenticated session.
    pub fn require_identity(&self) -> Result<&Identity, SessionError> {
        self.identity.as_ref().ok_or(SessionError::NotAuthenticated)
    }

    /// Capability check for the admin views' mutation controls.
    pub fn can_manage(&self) -> bool {
        self.identity.as_ref().is_some_and(Identity::can_manage)
    }

    pub fn has_role(&self, allowed: &[Role]) -> bool {
        self.identity
            .as_ref()
            .is_some_and(|i| allowed.contains(&i.role))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(email: &str) -> Identity {
        Identity {
            user_id: "u-1".to_string(),
            name: "Test User".to_string(),
            email: email.to_string(),
            role: Role::Admin,
        }
    }

    #[test]
    fn test_login_then_restore_keeps_identity() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::at_dir(dir.path());

        let mut session = Session::restore(store.clone());
        assert!(!session.is_authenticated());
        session.login(identity("a@b.com")).unwrap();

        // Simulated reload: a fresh session restored from the same store.
        let reloaded = Session::restore(store);
        assert!(reloaded.is_authenticated());
        assert_eq!(reloaded.current_identity().unwrap().email, "a@b.com");
    }

    #[test]
    fn test_logout_then_restore_is_unauthenticated() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::at_dir(dir.path());

        let mut session = Session::restore(store.clone());
        session.login(identity("a@b.com")).unwrap();
        session.logout().unwrap();
        assert!(!session.is_authenticated());

        let reloaded = Session::restore(store);
        assert!(!reloaded.is_authenticated());
    }

    #[test]
    fn test_logout_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = Session::restore(SessionStore::at_dir(dir.path()));
        session.logout().unwrap();
        session.logout().unwrap();
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_malformed_session_file_restores_empty() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(SESSION_FILE), "not json").unwrap();

        let session = Session::restore(SessionStore::at_dir(dir.path()));
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_require_identity_fails_loudly_when_logged_out() {
        let dir = tempfile::tempdir().unwrap();
        let session = Session::restore(SessionStore::at_dir(dir.path()));
        assert!(matches!(
            session.require_identity(),
            Err(SessionError::NotAuthenticated)
        ));
    }

    #[test]
    fn test_capability_predicate_follows_role() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = Session::restore(SessionStore::at_dir(dir.path()));

        let mut member = identity("m@b.com");
        member.role = Role::Member;
        session.login(member).unwrap();
        assert!(!session.can_manage());

        session.login(identity("a@b.com")).unwrap();
        assert!(session.can_manage());
        assert!(session.has_role(&[Role::Admin]));
        assert!(!session.has_role(&[Role::Member]));
    }
}
