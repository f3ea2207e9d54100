//! Neighborhood group model.

use serde::{Deserialize, Serialize};

/// A neighborhood group, joinable at registration or from the profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Neighborhood {
    pub id: String,
    pub name: String,
}
