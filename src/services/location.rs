// SPDX-License-Identifier: MIT
// Copyright 2026 Alerta Contributors

//! Location provider contract.
//!
//! Platform bindings implement [`LocationProvider`]; the core only depends
//! on the trait. A fix is single-shot at the highest available accuracy and
//! never retried internally — the user re-triggers instead.

use crate::error::AppError;
use crate::models::Coordinates;
use async_trait::async_trait;

/// Typed failure for a location fix attempt.
#[derive(Debug, thiserror::Error)]
pub enum LocationError {
    /// The user declined the foreground location permission.
    #[error("location permission denied")]
    PermissionDenied,
    /// No fix within the platform bound, or a hardware error.
    #[error("location unavailable: {0}")]
    Unavailable(String),
}

impl From<LocationError> for AppError {
    fn from(err: LocationError) -> Self {
        match err {
            LocationError::PermissionDenied => AppError::PermissionDenied,
            LocationError::Unavailable(reason) => AppError::LocationUnavailable(reason),
        }
    }
}

/// Produces the device's current coordinates, requesting the foreground
/// location permission first if it is not already granted.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    async fn current_coordinates(&self) -> Result<Coordinates, LocationError>;
}

/// Provider pinned to a fixed position. Used by the CLI (position from the
/// environment) and in tests.
pub struct FixedLocationProvider {
    coordinates: Coordinates,
}

impl FixedLocationProvider {
    pub fn new(coordinates: Coordinates) -> Self {
        Self { coordinates }
    }

    /// From decimal degrees as reported by a platform position API.
    pub fn from_position(latitude: f64, longitude: f64) -> Self {
        Self::new(Coordinates::from_position(latitude, longitude))
    }
}

#[async_trait]
impl LocationProvider for FixedLocationProvider {
    async fn current_coordinates(&self) -> Result<Coordinates, LocationError> {
        Ok(self.coordinates.clone())
    }
}
