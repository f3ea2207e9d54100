// SPDX-License-Identifier: MIT
// Copyright 2026 Alerta Contributors

//! Session store: exclusive owner of the authenticated state.
//!
//! The token and user record live under two fixed keys in the key-value
//! store and are written as a unit: a half-written pair is treated as no
//! session at all (fail closed, force re-login). Login/logout transitions
//! are published on a watch channel; consumers receive the store by
//! explicit dependency passing and subscribe to it.

use crate::error::{AppError, Result};
use crate::models::Session;
use crate::store::keys;
use crate::store::KeyValueStore;
use std::sync::Arc;
use tokio::sync::watch;

pub struct SessionStore {
    store: Arc<dyn KeyValueStore>,
    tx: watch::Sender<Option<Session>>,
}

impl SessionStore {
    /// Open the session store, restoring any persisted session.
    ///
    /// A token without a readable user record (or vice versa) is an
    /// inconsistent half-write from an earlier crash; both keys are
    /// cleared and the store starts logged out.
    pub fn open(store: Arc<dyn KeyValueStore>) -> Result<Self> {
        let initial = match Self::restore(store.as_ref()) {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!(error = %e, "Persisted session unreadable, clearing");
                clear_session_keys(store.as_ref());
                None
            }
        };

        let (tx, _) = watch::channel(initial);
        Ok(Self { store, tx })
    }

    fn restore(store: &dyn KeyValueStore) -> Result<Option<Session>> {
        let token = store.get(keys::AUTH_TOKEN)?;
        let user_json = store.get(keys::USER)?;

        match (token, user_json) {
            (Some(token), Some(user_json)) => {
                let user = serde_json::from_str(&user_json)
                    .map_err(|e| AppError::Storage(format!("corrupt user record: {}", e)))?;
                Ok(Some(Session { token, user }))
            }
            (None, None) => Ok(None),
            _ => Err(AppError::Storage(
                "session keys are inconsistent".to_string(),
            )),
        }
    }

    /// Subscribe to login/logout transitions.
    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.tx.subscribe()
    }

    /// Current session, if logged in.
    pub fn current(&self) -> Option<Session> {
        self.tx.borrow().clone()
    }

    /// Current bearer token, if logged in.
    pub fn token(&self) -> Option<String> {
        self.tx.borrow().as_ref().map(|s| s.token.clone())
    }

    /// Persist a fresh session and notify subscribers.
    ///
    /// Token and user record are written as a unit: if the second write
    /// fails, the first is rolled back and the error returned.
    pub fn login(&self, session: Session) -> Result<()> {
        let user_json = serde_json::to_string(&session.user)
            .map_err(|e| AppError::Storage(format!("serialize user: {}", e)))?;

        self.store.set(keys::AUTH_TOKEN, &session.token)?;
        if let Err(e) = self.store.set(keys::USER, &user_json) {
            clear_session_keys(self.store.as_ref());
            self.tx.send_replace(None);
            return Err(e);
        }

        tracing::info!(user_id = %session.user.id, "Session established");
        self.tx.send_replace(Some(session));
        Ok(())
    }

    /// Clear the session at the user's request.
    pub fn logout(&self) -> Result<()> {
        self.store.remove(keys::AUTH_TOKEN)?;
        self.store.remove(keys::USER)?;
        tracing::info!("Session cleared");
        self.tx.send_replace(None);
        Ok(())
    }

    /// Clear the session after the backend rejected our token (HTTP 401).
    ///
    /// Best-effort: storage failures are logged, the in-memory session is
    /// dropped regardless so no further authenticated call can reuse the
    /// rejected token.
    pub fn invalidate(&self) {
        tracing::warn!("Session invalidated by backend");
        clear_session_keys(self.store.as_ref());
        self.tx.send_replace(None);
    }
}

fn clear_session_keys(store: &dyn KeyValueStore) {
    if let Err(e) = store.remove(keys::AUTH_TOKEN) {
        tracing::warn!(error = %e, "Failed to clear auth token key");
    }
    if let Err(e) = store.remove(keys::USER) {
        tracing::warn!(error = %e, "Failed to clear user key");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;
    use crate::store::MemoryStore;

    fn test_user() -> User {
        User {
            id: "u1".to_string(),
            email: "ana@example.com".to_string(),
            phone: "60001234".to_string(),
            name: "Ana".to_string(),
            max_subscription_limit: 3,
            neighborhood_id: None,
            role: Some("user".to_string()),
        }
    }

    #[test]
    fn test_login_persists_both_keys() {
        let kv: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let store = SessionStore::open(kv.clone()).unwrap();

        store
            .login(Session {
                token: "tok-1".to_string(),
                user: test_user(),
            })
            .unwrap();

        assert_eq!(kv.get(keys::AUTH_TOKEN).unwrap().as_deref(), Some("tok-1"));
        assert!(kv.get(keys::USER).unwrap().is_some());
        assert_eq!(store.token().as_deref(), Some("tok-1"));
    }

    #[test]
    fn test_restore_fails_closed_on_corrupt_user() {
        let kv: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        kv.set(keys::AUTH_TOKEN, "tok-1").unwrap();
        kv.set(keys::USER, "{not json").unwrap();

        let store = SessionStore::open(kv.clone()).unwrap();

        assert!(store.current().is_none());
        assert_eq!(kv.get(keys::AUTH_TOKEN).unwrap(), None);
        assert_eq!(kv.get(keys::USER).unwrap(), None);
    }

    #[test]
    fn test_restore_fails_closed_on_missing_user() {
        let kv: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        kv.set(keys::AUTH_TOKEN, "tok-1").unwrap();

        let store = SessionStore::open(kv.clone()).unwrap();

        assert!(store.current().is_none());
        assert_eq!(kv.get(keys::AUTH_TOKEN).unwrap(), None);
    }

    #[test]
    fn test_invalidate_clears_and_notifies() {
        let kv: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let store = SessionStore::open(kv.clone()).unwrap();
        let mut rx = store.subscribe();

        store
            .login(Session {
                token: "tok-1".to_string(),
                user: test_user(),
            })
            .unwrap();
        assert!(rx.has_changed().unwrap());
        rx.borrow_and_update();

        store.invalidate();
        assert!(rx.has_changed().unwrap());
        assert!(rx.borrow_and_update().is_none());
        assert_eq!(kv.get(keys::AUTH_TOKEN).unwrap(), None);
        assert_eq!(kv.get(keys::USER).unwrap(), None);
    }
}
