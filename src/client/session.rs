use std::fs;
use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The signed-in user, as handed out by signup and login.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    pub token: String,
    pub user_id: Uuid,
    pub name: String,
}

/// Durable session storage, one JSON file standing in for the browser's
/// localStorage. Lifecycle is explicit: `load` on startup, `save` after
/// signup/login, `clear` on logout.
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The persisted session, if any. A missing or unreadable file just
    /// means the user has to log in again.
    pub fn load(&self) -> Option<Session> {
        let raw = fs::read_to_string(&self.path).ok()?;
        serde_json::from_str(&raw).ok()
    }

    pub fn save(&self, session: &Session) -> io::Result<()> {
        let raw = serde_json::to_string(session).map_err(io::Error::other)?;
        fs::write(&self.path, raw)
    }

    /// Logout. The token stays valid until it expires (the server keeps no
    /// revocation list); discarding it is the whole logout.
    pub fn clear(&self) -> io::Result<()> {
        match fs::remove_file(&self.path) {
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session {
            token: "header.payload.signature".into(),
            user_id: Uuid::new_v4(),
            name: "Ada Lovelace".into(),
        }
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("session.json"));

        let s = session();
        store.save(&s).unwrap();
        assert_eq!(store.load(), Some(s));
    }

    #[test]
    fn load_without_a_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("session.json"));
        assert_eq!(store.load(), None);
    }

    #[test]
    fn clear_discards_the_session_and_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("session.json"));

        store.save(&session()).unwrap();
        store.clear().unwrap();
        assert_eq!(store.load(), None);
        store.clear().unwrap();
    }

    #[test]
    fn corrupt_file_reads_as_no_session() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "not json").unwrap();
        assert_eq!(SessionStore::new(path).load(), None);
    }
}
