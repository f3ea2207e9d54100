// SPDX-License-Identifier: MIT
// Copyright 2026 Alerta Contributors

//! Backend gateway: authenticated HTTP client for the Alerta API.
//!
//! Handles:
//! - Auth endpoints (login, register, password reset)
//! - Panic alert and push token submission
//! - Contacts, entities, neighborhoods, media packages
//! - The global 401 contract: any authenticated call the backend rejects
//!   with 401 clears the persisted session before the error is surfaced

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::{
    AlertRequest, Contact, Coordinates, Entity, EntityPetitionRequest, LoginRequest,
    LoginResponse, MediaKind, MediaPackage, Neighborhood, NewContactRequest, RegisterRequest,
    Session, UpdatePasswordRequest, UpdateUserRequest, User,
};
use crate::services::dispatch::AlertGateway;
use crate::services::push::PushTokenGateway;
use crate::store::SessionStore;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Authenticated HTTP client for the Alerta backend.
pub struct BackendGateway {
    http: reqwest::Client,
    base_url: String,
    session: Arc<SessionStore>,
}

impl BackendGateway {
    /// Create a gateway with the shared client-level timeout.
    pub fn new(config: &Config, session: Arc<SessionStore>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()
            .map_err(|e| AppError::Internal(anyhow::anyhow!("HTTP client init failed: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.api_base_url.clone(),
            session,
        })
    }

    // ─── Auth ────────────────────────────────────────────────────────────

    /// `POST /auth/login`. Returns the fresh session; persisting it is the
    /// caller's job (via `SessionStore::login`).
    pub async fn login(&self, request: &LoginRequest) -> Result<Session> {
        validator::Validate::validate(request)?;

        let response = self
            .http
            .post(self.url("/auth/login"))
            .json(request)
            .send()
            .await
            .map_err(AppError::from)?;

        let login: LoginResponse = parse_json(self.check_public(response).await?).await?;
        Ok(Session {
            token: login.token,
            user: login.user,
        })
    }

    /// `POST /users/register`.
    pub async fn register(&self, request: &RegisterRequest) -> Result<User> {
        validator::Validate::validate(request)?;

        let response = self
            .http
            .post(self.url("/users/register"))
            .json(request)
            .send()
            .await
            .map_err(AppError::from)?;

        let body: RegisterResponse = parse_json(self.check_public(response).await?).await?;
        Ok(body.user)
    }

    /// `PUT /auth/update-password`.
    pub async fn update_password(&self, request: &UpdatePasswordRequest) -> Result<()> {
        validator::Validate::validate(request)?;
        self.authed_put("/auth/update-password", request).await?;
        Ok(())
    }

    /// `POST /auth/reset-password`.
    pub async fn reset_password(&self, email: &str) -> Result<()> {
        let response = self
            .http
            .post(self.url("/auth/reset-password"))
            .json(&EmailBody { email })
            .send()
            .await
            .map_err(AppError::from)?;
        self.check_public(response).await?;
        Ok(())
    }

    /// `POST /notify/petition-reset`.
    pub async fn petition_reset(&self, email: &str) -> Result<()> {
        let response = self
            .http
            .post(self.url("/notify/petition-reset"))
            .json(&EmailBody { email })
            .send()
            .await
            .map_err(AppError::from)?;
        self.check_public(response).await?;
        Ok(())
    }

    // ─── Panic & push token ──────────────────────────────────────────────

    /// `POST /panic/alerta`. Coordinates go out longitude first.
    pub async fn submit_alert(&self, coordinates: Coordinates) -> Result<()> {
        let body = AlertRequest { coordinates };
        self.authed_post("/panic/alerta", &body).await?;
        Ok(())
    }

    /// `POST /users/token`.
    pub async fn submit_push_token(&self, token: &str) -> Result<()> {
        self.authed_post("/users/token", &PushTokenBody { fcm_token: token })
            .await?;
        Ok(())
    }

    // ─── Users ───────────────────────────────────────────────────────────

    /// `GET /users/`, filtered to plain end users.
    pub async fn list_users(&self) -> Result<Vec<User>> {
        let response = self.authed_get("/users/").await?;
        let body: UsersResponse = parse_json(response).await?;
        Ok(body
            .users
            .into_iter()
            .filter(|u| u.role.as_deref() == Some("user"))
            .collect())
    }

    /// `GET /users/:id`.
    pub async fn get_user(&self, id: &str) -> Result<User> {
        let response = self.authed_get(&format!("/users/{}", id)).await?;
        parse_json(response).await
    }

    /// `PUT /users/:id`.
    pub async fn update_user(&self, id: &str, request: &UpdateUserRequest) -> Result<()> {
        validator::Validate::validate(request)?;
        self.authed_put(&format!("/users/{}", id), request).await?;
        Ok(())
    }

    // ─── Contacts ────────────────────────────────────────────────────────

    /// `GET /contacts/all-contacts`.
    pub async fn contacts(&self) -> Result<Vec<Contact>> {
        let response = self.authed_get("/contacts/all-contacts").await?;
        parse_json(response).await
    }

    /// `POST /contacts/register`.
    pub async fn register_contact(&self, request: &NewContactRequest) -> Result<()> {
        validator::Validate::validate(request)?;
        self.authed_post("/contacts/register", request).await?;
        Ok(())
    }

    // ─── Entities ────────────────────────────────────────────────────────

    /// `GET /entity/`.
    pub async fn entities(&self) -> Result<Vec<Entity>> {
        let response = self.authed_get("/entity/").await?;
        parse_json(response).await
    }

    /// `POST /entity/petition` for the logged-in user.
    pub async fn entity_petition(&self, entity_id: &str) -> Result<()> {
        let body = self.entity_body(entity_id)?;
        self.authed_post("/entity/petition", &body).await?;
        Ok(())
    }

    /// `POST /entity/unsubscribe` for the logged-in user.
    pub async fn entity_unsubscribe(&self, entity_id: &str) -> Result<()> {
        let body = self.entity_body(entity_id)?;
        self.authed_post("/entity/unsubscribe", &body).await?;
        Ok(())
    }

    fn entity_body(&self, entity_id: &str) -> Result<EntityPetitionRequest> {
        let session = self.session.current().ok_or(AppError::Unauthenticated)?;
        Ok(EntityPetitionRequest {
            entity_id: entity_id.to_string(),
            user_id: session.user.id,
        })
    }

    // ─── Neighborhoods & media ───────────────────────────────────────────

    /// `GET /neighborhood/all-neighborhood`. Public: the registration flow
    /// needs it before any session exists.
    pub async fn neighborhoods(&self) -> Result<Vec<Neighborhood>> {
        let response = self
            .http
            .get(self.url("/neighborhood/all-neighborhood"))
            .send()
            .await
            .map_err(AppError::from)?;
        parse_json(self.check_public(response).await?).await
    }

    /// `GET /media/packages/list`, filtered to active packages of `kind`.
    pub async fn media_packages(&self, kind: MediaKind) -> Result<Vec<MediaPackage>> {
        let response = self.authed_get("/media/packages/list").await?;
        let packages: Vec<MediaPackage> = parse_json(response).await?;
        Ok(packages.into_iter().filter(|p| p.matches(kind)).collect())
    }

    // ─── Request plumbing ────────────────────────────────────────────────

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Bearer token, or `Unauthenticated` before any request goes out.
    fn bearer_token(&self) -> Result<String> {
        self.session.token().ok_or(AppError::Unauthenticated)
    }

    async fn authed_get(&self, path: &str) -> Result<reqwest::Response> {
        let token = self.bearer_token()?;
        let response = self
            .http
            .get(self.url(path))
            .bearer_auth(token)
            .send()
            .await
            .map_err(AppError::from)?;
        self.check_authed(response).await
    }

    async fn authed_post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<reqwest::Response> {
        let token = self.bearer_token()?;
        let response = self
            .http
            .post(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .map_err(AppError::from)?;
        self.check_authed(response).await
    }

    async fn authed_put<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<reqwest::Response> {
        let token = self.bearer_token()?;
        let response = self
            .http
            .put(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .map_err(AppError::from)?;
        self.check_authed(response).await
    }

    /// Status check for unauthenticated endpoints. A 401 here is a
    /// rejected credential, not a session invalidation — there is no
    /// session yet.
    async fn check_public(&self, response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response.text().await.unwrap_or_default();
        if status.is_server_error() {
            return Err(AppError::Network(format!("HTTP {}: {}", status, message)));
        }
        Err(AppError::Api {
            status: status.as_u16(),
            message,
        })
    }

    /// Status check for authenticated endpoints. A 401 means our token was
    /// rejected: the persisted session is cleared before the error is
    /// surfaced, so later calls fail fast without hitting the network.
    async fn check_authed(&self, response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if status.as_u16() == 401 {
            self.session.invalidate();
            return Err(AppError::Unauthenticated);
        }

        let message = response.text().await.unwrap_or_default();
        if status.is_server_error() {
            return Err(AppError::Network(format!("HTTP {}: {}", status, message)));
        }
        Err(AppError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

async fn parse_json<T: for<'de> Deserialize<'de>>(response: reqwest::Response) -> Result<T> {
    response
        .json()
        .await
        .map_err(|e| AppError::Network(format!("malformed response body: {}", e)))
}

#[async_trait]
impl AlertGateway for BackendGateway {
    async fn submit_alert(&self, coordinates: Coordinates) -> Result<()> {
        BackendGateway::submit_alert(self, coordinates).await
    }
}

#[async_trait]
impl PushTokenGateway for BackendGateway {
    async fn submit_push_token(&self, token: &str) -> Result<()> {
        BackendGateway::submit_push_token(self, token).await
    }
}

/// Body of `POST /users/token`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PushTokenBody<'a> {
    fcm_token: &'a str,
}

#[derive(Serialize)]
struct EmailBody<'a> {
    email: &'a str,
}

/// Envelope of `GET /users/`.
#[derive(Deserialize)]
struct UsersResponse {
    users: Vec<User>,
}

/// Envelope of `POST /users/register`.
#[derive(Deserialize)]
struct RegisterResponse {
    user: User,
}
