use std::sync::{PoisonError, RwLock};

/// Source of the bearer token attached to every request
pub trait SessionStore: Send + Sync {
    /// The current access token, or `None` when signed out
    fn access_token(&self) -> Option<String>;
}

/// A session with a fixed token, e.g. `ADMIN_API_TOKEN`
#[derive(Debug, Clone, Default)]
pub struct StaticSession(pub Option<String>);

impl SessionStore for StaticSession {
    fn access_token(&self) -> Option<String> {
        self.0.clone()
    }
}

/// A session whose token changes on sign-in and sign-out
#[derive(Debug, Default)]
pub struct MemorySession {
    token: RwLock<Option<String>>,
}

impl MemorySession {
    pub fn sign_in(&self, token: impl Into<String>) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = Some(token.into());
    }

    pub fn sign_out(&self) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

impl SessionStore for MemorySession {
    fn access_token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_session_tracks_sign_in_and_out() {
        let session = MemorySession::default();
        assert_eq!(session.access_token(), None);

        session.sign_in("token-1");
        assert_eq!(session.access_token().as_deref(), Some("token-1"));

        session.sign_out();
        assert_eq!(session.access_token(), None);
    }

    #[test]
    fn memory_session_recovers_from_poisoned_lock() {
        let session = std::sync::Arc::new(MemorySession::default());
        session.sign_in("token-1");

        let poisoner = session.clone();
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.token.write().unwrap();
            panic!("poison the session lock");
        })
        .join();
        assert!(session.token.is_poisoned());

        assert_eq!(session.access_token().as_deref(), Some("token-1"));
        session.sign_in("token-2");
        assert_eq!(session.access_token().as_deref(), Some("token-2"));
        session.sign_out();
        assert_eq!(session.access_token(), None);
    }
}
