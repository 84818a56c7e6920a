use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use uuid::Uuid;

use crate::errors::CoreError;

/// Trait abstraction for resolving a session token to an owner identity.
///
/// Signature verification and session issuance happen outside this crate;
/// every request-facing operation starts by calling `authenticate` and
/// fails fast with [`CoreError::Unauthorized`] before touching any cache
/// or repository.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Resolve a session token to the authenticated owner's id.
    async fn authenticate(&self, session_token: &str) -> Result<Uuid, CoreError>;
}

/// Token-table identity provider: a plain map from session token to
/// owner id, filled by whoever issues sessions.
///
/// Suitable for tests and single-process embedding.
#[derive(Default)]
pub struct MemorySessionStore {
    sessions: Mutex<HashMap<String, Uuid>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a session token for an owner, replacing any previous
    /// session under the same token.
    pub fn issue(&self, token: impl Into<String>, owner_id: Uuid) {
        let mut sessions = self.sessions.lock().unwrap_or_else(|e| e.into_inner());
        sessions.insert(token.into(), owner_id);
    }

    /// Remove a session token. Unknown tokens are ignored.
    pub fn revoke(&self, token: &str) {
        let mut sessions = self.sessions.lock().unwrap_or_else(|e| e.into_inner());
        sessions.remove(token);
    }
}

#[async_trait]
impl IdentityProvider for MemorySessionStore {
    async fn authenticate(&self, session_token: &str) -> Result<Uuid, CoreError> {
        let sessions = self.sessions.lock().unwrap_or_else(|e| e.into_inner());
        sessions
            .get(session_token)
            .copied()
            .ok_or(CoreError::Unauthorized)
    }
}
