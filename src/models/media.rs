//! Media package models.
//!
//! The backend serves one mixed list; clients filter by kind and only keep
//! active packages.

use serde::{Deserialize, Serialize};

/// Media package categories the app consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Avatar,
    Advertising,
    Neighborhood,
}

impl MediaKind {
    /// Wire value used in the package `type` field.
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Avatar => "avatar",
            MediaKind::Advertising => "advertising",
            MediaKind::Neighborhood => "neighborhood",
        }
    }
}

/// One entry of `GET /media/packages/list`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaPackage {
    pub id: String,
    pub url: String,
    #[serde(rename = "type")]
    pub kind: String,
    /// Inactive packages are hidden client-side
    pub status: bool,
}

impl MediaPackage {
    /// True when this package is active and of the requested kind.
    pub fn matches(&self, kind: MediaKind) -> bool {
        self.status && self.kind == kind.as_str()
    }
}
