//! Persistence of the active session across restarts.

use crate::session::Session;
use nftm_common::{errors::FsPathError, fs};
use parking_lot::Mutex;
use std::{fmt, path::PathBuf};

/// Where the holder keeps the active session between runs.
pub trait SessionStore: fmt::Debug + Send + Sync {
    /// Returns the persisted session; empty if nothing was persisted.
    fn load(&self) -> Result<Session, FsPathError>;

    /// Persists `session`, replacing whatever was stored.
    fn save(&self, session: &Session) -> Result<(), FsPathError>;

    /// Removes the persisted session.
    fn clear(&self) -> Result<(), FsPathError>;
}

/// Keeps the session in a JSON file, `~/.nftm/session.json` by default.
#[derive(Clone, Debug)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Session, FsPathError> {
        match fs::read_json_file(&self.path) {
            Ok(session) => Ok(session),
            Err(err) if err.is_not_found() => Ok(Session::default()),
            Err(err) => Err(err),
        }
    }

    fn save(&self, session: &Session) -> Result<(), FsPathError> {
        if !session.is_connected() {
            return self.clear();
        }
        fs::write_json_file(&self.path, session)
    }

    fn clear(&self) -> Result<(), FsPathError> {
        fs::remove_file_if_exists(&self.path)
    }
}

/// Keeps the session in memory only.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    session: Mutex<Session>,
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Session, FsPathError> {
        Ok(*self.session.lock())
    }

    fn save(&self, session: &Session) -> Result<(), FsPathError> {
        *self.session.lock() = *session;
        Ok(())
    }

    fn clear(&self) -> Result<(), FsPathError> {
        *self.session.lock() = Session::default();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_store_lifecycle() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("nested/session.json"));

        assert_eq!(store.load().unwrap(), Session::default());

        store.save(&Session::test()).unwrap();
        assert!(store.path().exists());
        assert_eq!(store.load().unwrap(), Session::test());

        store.save(&Session::default()).unwrap();
        assert!(!store.path().exists());

        store.save(&Session::test()).unwrap();
        store.clear().unwrap();
        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), Session::default());
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "not json").unwrap();
        let err = FileSessionStore::new(path).load().unwrap_err();
        assert!(matches!(err, FsPathError::ReadJson { .. }), "{err}");
    }
}
