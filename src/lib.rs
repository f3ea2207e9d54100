// SPDX-License-Identifier: MIT
// Copyright 2026 Alerta Contributors

//! Alerta client core: panic alerts for a personal-safety app.
//!
//! This crate owns the session store, the panic-alert dispatcher, the push
//! token lifecycle and the authenticated backend gateway. Screens and
//! platform bindings sit on top of [`AppCore`] and the provider traits.

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod store;

use config::Config;
use error::Result;
use models::{LoginRequest, User};
use services::{
    AlertDispatcher, BackendGateway, LocationProvider, PushTokenManager, PushTokenSource,
};
use std::sync::Arc;
use store::{KeyValueStore, SessionStore};
use tokio::task::JoinHandle;

/// Wired-up client core.
///
/// Platform bindings supply the storage, location and push-token
/// implementations; everything else is constructed here.
pub struct AppCore {
    pub config: Config,
    pub session: Arc<SessionStore>,
    pub gateway: Arc<BackendGateway>,
    pub dispatcher: Arc<AlertDispatcher>,
    pub push: Arc<PushTokenManager>,
}

impl AppCore {
    pub fn new(
        config: Config,
        storage: Arc<dyn KeyValueStore>,
        location: Arc<dyn LocationProvider>,
        push_source: Arc<dyn PushTokenSource>,
    ) -> Result<Self> {
        let session = Arc::new(SessionStore::open(storage.clone())?);
        let gateway = Arc::new(BackendGateway::new(&config, session.clone())?);
        let dispatcher = Arc::new(AlertDispatcher::new(
            location,
            gateway.clone(),
            config.alert_cooldown,
            config.location_timeout,
        ));
        let push = Arc::new(PushTokenManager::new(
            push_source,
            gateway.clone(),
            storage,
        ));

        Ok(Self {
            config,
            session,
            gateway,
            dispatcher,
            push,
        })
    }

    /// Attach the push token lifecycle to session transitions.
    pub fn start(&self) -> JoinHandle<()> {
        self.push.clone().watch_sessions(self.session.subscribe())
    }

    /// Authenticate and persist the resulting session.
    pub async fn login(&self, email: &str, password: &str) -> Result<User> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let session = self.gateway.login(&request).await?;
        let user = session.user.clone();
        self.session.login(session)?;
        Ok(user)
    }

    /// Clear the persisted session.
    pub fn logout(&self) -> Result<()> {
        self.session.logout()
    }
}
