//! User, session and auth payload models.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// User record as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub phone: String,
    pub name: String,
    /// How many safety entities this account may subscribe to
    pub max_subscription_limit: u32,
    /// Neighborhood group membership, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub neighborhood_id: Option<String>,
    /// Backend role; plain end users carry `"user"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// Authenticated state: opaque bearer token plus the user it belongs to.
///
/// Owned exclusively by the `SessionStore`; everything else only reads it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: User,
}

/// Body of `POST /auth/login`.
#[derive(Debug, Clone, Serialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Response of `POST /auth/login`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

/// Body of `POST /users/register`.
#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// National identity document number
    #[validate(length(min = 1))]
    pub ci: String,
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 6))]
    pub phone: String,
    #[validate(email)]
    pub email: String,
    /// Device push token, when already known at registration time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fcm_token: Option<String>,
}

/// Body of `PUT /auth/update-password`.
#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePasswordRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub current_password: String,
    #[validate(length(min = 6))]
    pub new_password: String,
}

/// Body of `PUT /users/:id`. All fields optional; only set fields are sent.
#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct UpdateUserRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1))]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(email)]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 6))]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}
