//! Safety entity models (police, fire, ambulance).

use serde::{Deserialize, Serialize};

/// A subscribable safety entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    pub id: String,
    pub name: String,
    /// Entity category: "police", "fire", "ambulance", ...
    #[serde(rename = "type")]
    pub kind: String,
}

/// Body of `POST /entity/petition` and `POST /entity/unsubscribe`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityPetitionRequest {
    pub entity_id: String,
    pub user_id: String,
}
