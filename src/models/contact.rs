//! Emergency contact models.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Emergency contact as returned by `GET /contacts/all-contacts`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: String,
    /// Display name chosen by the owner ("Mom", "Neighbor Luis", ...)
    pub alias: String,
    pub relationship: String,
    /// Id of the registered user this contact points at
    pub contact_user: String,
}

/// Body of `POST /contacts/register`.
#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewContactRequest {
    #[validate(length(min = 1))]
    pub alias: String,
    #[validate(length(min = 1))]
    pub relationship: String,
    #[validate(length(min = 1))]
    pub contact_user: String,
}
