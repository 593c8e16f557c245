use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use eventra_core::session::{Session, TokenStore};
use eventra_shared::models::Role;
use tracing::{error, info};

use crate::StoreError;

/// Session persisted as a small JSON document, the on-disk counterpart of
/// browser local storage.
///
/// Reads are served from memory; every mutation is written through.
pub struct FileTokenStore {
    path: PathBuf,
    session: Mutex<Session>,
}

impl FileTokenStore {
    /// Opens the store; a missing file is an empty session.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let session = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).map_err(|source| StoreError::Format {
                path: path.display().to_string(),
                source,
            })?,
            Err(e) if e.kind() == ErrorKind::NotFound => Session::default(),
            Err(source) => {
                return Err(StoreError::Io {
                    path: path.display().to_string(),
                    source,
                })
            }
        };
        info!(path = %path.display(), authenticated = session.is_authenticated(), "Token store opened");
        Ok(Self {
            path,
            session: Mutex::new(session),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn session(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn persist(&self, session: &Session) -> Result<(), StoreError> {
        let io_err = |source| StoreError::Io {
            path: self.path.display().to_string(),
            source,
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let raw = serde_json::to_string_pretty(session).map_err(|source| StoreError::Format {
            path: self.path.display().to_string(),
            source,
        })?;
        fs::write(&self.path, raw).map_err(io_err)
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self) -> Session {
        self.session().clone()
    }

    fn set(&self, access_token: &str, refresh_token: Option<&str>, role: Option<Role>) {
        let mut session = self.session();
        session.apply(access_token, refresh_token, role);
        if let Err(e) = self.persist(&session) {
            error!(error = %e, "Failed to persist session");
        }
    }

    fn clear(&self) {
        let mut session = self.session();
        *session = Session::default();
        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => error!(path = %self.path.display(), error = %e, "Failed to remove session file"),
        }
    }
}
