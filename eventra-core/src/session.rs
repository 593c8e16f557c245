use eventra_shared::models::Role;
use eventra_shared::Masked;
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, MutexGuard, PoisonError};

pub const ACCESS_TOKEN_KEY: &str = "access_token";
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";
pub const ROLE_KEY: &str = "role";

/// Credentials that survive page loads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<Masked<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<Masked<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_ref().map(|t| t.expose().as_str())
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_ref().map(|t| t.expose().as_str())
    }

    /// Applies `TokenStore::set` semantics: absent refresh token or role keep
    /// their previous value.
    pub fn apply(&mut self, access_token: &str, refresh_token: Option<&str>, role: Option<Role>) {
        self.access_token = Some(Masked::from(access_token));
        if let Some(refresh) = refresh_token {
            self.refresh_token = Some(Masked::from(refresh));
        }
        if let Some(role) = role {
            self.role = Some(role);
        }
    }
}

/// Persistent home of the [`Session`].
///
/// Operations are synchronous and infallible from the caller's side; token
/// contents are never validated.
pub trait TokenStore: Send + Sync {
    fn get(&self) -> Session;

    fn set(&self, access_token: &str, refresh_token: Option<&str>, role: Option<Role>);

    /// Drops all three keys.
    fn clear(&self);
}

/// Process-local store.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    session: Mutex<Session>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: Session) -> Self {
        Self {
            session: Mutex::new(session),
        }
    }

    fn session(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Session {
        self.session().clone()
    }

    fn set(&self, access_token: &str, refresh_token: Option<&str>, role: Option<Role>) {
        self.session().apply(access_token, refresh_token, role);
    }

    fn clear(&self) {
        let mut session = self.session();
        session.access_token = None;
        session.refresh_token = None;
        session.role = None;
    }
}
