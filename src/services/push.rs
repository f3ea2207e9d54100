// SPDX-License-Identifier: MIT
// Copyright 2026 Alerta Contributors

//! Push token lifecycle.
//!
//! Keeps the backend's record of this device's push token in step with the
//! platform-issued one while a session is active. The backend treats token
//! submissions as latest-write-wins, so concurrent submissions are not
//! serialized here.

use crate::error::Result;
use crate::models::Session;
use crate::store::{keys, KeyValueStore};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Handle onto the platform push-messaging service.
#[async_trait]
pub trait PushTokenSource: Send + Sync {
    /// The device token currently issued by the platform.
    async fn current_token(&self) -> Result<String>;
}

/// Fixed token source for the CLI and tests.
pub struct StaticTokenSource {
    token: String,
}

impl StaticTokenSource {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

#[async_trait]
impl PushTokenSource for StaticTokenSource {
    async fn current_token(&self) -> Result<String> {
        Ok(self.token.clone())
    }
}

/// The slice of the backend gateway the token manager needs.
#[async_trait]
pub trait PushTokenGateway: Send + Sync {
    /// Mirror the device token under the active session's credentials.
    async fn submit_push_token(&self, token: &str) -> Result<()>;
}

pub struct PushTokenManager {
    source: Arc<dyn PushTokenSource>,
    gateway: Arc<dyn PushTokenGateway>,
    store: Arc<dyn KeyValueStore>,
}

impl PushTokenManager {
    pub fn new(
        source: Arc<dyn PushTokenSource>,
        gateway: Arc<dyn PushTokenGateway>,
        store: Arc<dyn KeyValueStore>,
    ) -> Self {
        Self {
            source,
            gateway,
            store,
        }
    }

    /// Sync the token after a session becomes active.
    ///
    /// Fetches the platform token, persists it, and submits it to the
    /// backend. Submission is best-effort: a failure leaves the backend
    /// copy stale until the next rotation or login and is only logged.
    pub async fn on_session_start(&self) -> Result<()> {
        let token = self.source.current_token().await?;
        self.store.set(keys::PUSH_TOKEN, &token)?;

        if let Err(e) = self.gateway.submit_push_token(&token).await {
            tracing::warn!(
                error = %e,
                "Push token submission failed, backend copy stale until next rotation"
            );
        } else {
            tracing::info!("Push token submitted");
        }
        Ok(())
    }

    /// Handle a platform token rotation.
    ///
    /// Rotations can arrive at any time, including before any login in
    /// this process lifetime. The new token is always persisted; the
    /// submission needs a stored session token and fails
    /// `Unauthenticated` without one. No automatic retry — the next
    /// `on_session_start` will submit the persisted token.
    pub async fn on_token_rotated(&self, new_token: &str) -> Result<()> {
        tracing::info!("Push token rotated");
        self.store.set(keys::PUSH_TOKEN, new_token)?;
        self.gateway.submit_push_token(new_token).await
    }

    /// The locally persisted token, if any.
    pub fn persisted_token(&self) -> Result<Option<String>> {
        self.store.get(keys::PUSH_TOKEN)
    }

    /// Spawn a task that re-runs [`on_session_start`](Self::on_session_start)
    /// on every login transition. The task ends when the session store is
    /// dropped.
    pub fn watch_sessions(
        self: Arc<Self>,
        mut sessions: watch::Receiver<Option<Session>>,
    ) -> JoinHandle<()> {
        let manager = self;
        tokio::spawn(async move {
            while sessions.changed().await.is_ok() {
                let logged_in = sessions.borrow_and_update().is_some();
                if logged_in {
                    if let Err(e) = manager.on_session_start().await {
                        tracing::warn!(error = %e, "Push token sync failed after login");
                    }
                }
            }
        })
    }
}
