// SPDX-License-Identifier: MIT
// Copyright 2026 Alerta Contributors

//! Panic alert payloads.

use serde::{Deserialize, Serialize};

/// Device position as string-encoded decimal degrees.
///
/// The backend expects a two-element array with LONGITUDE FIRST; this
/// ordering must survive all the way into the request body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coordinates {
    longitude: String,
    latitude: String,
}

impl Coordinates {
    /// Build from a platform position report (latitude, longitude in
    /// decimal degrees).
    pub fn from_position(latitude: f64, longitude: f64) -> Self {
        Self {
            longitude: format_degrees(longitude),
            latitude: format_degrees(latitude),
        }
    }

    /// Build from already string-encoded degrees, longitude first.
    pub fn new(longitude: impl Into<String>, latitude: impl Into<String>) -> Self {
        Self {
            longitude: longitude.into(),
            latitude: latitude.into(),
        }
    }

    pub fn longitude(&self) -> &str {
        &self.longitude
    }

    pub fn latitude(&self) -> &str {
        &self.latitude
    }
}

/// Whole degrees keep a trailing `.0` so the wire encoding is unambiguous
/// about being a decimal value.
fn format_degrees(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

impl Serialize for Coordinates {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        [self.longitude.as_str(), self.latitude.as_str()].serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Coordinates {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let [longitude, latitude] = <[String; 2]>::deserialize(deserializer)?;
        Ok(Self {
            longitude,
            latitude,
        })
    }
}

/// Body of `POST /panic/alerta`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertRequest {
    pub coordinates: Coordinates,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_longitude_precedes_latitude_on_the_wire() {
        let coordinates = Coordinates::from_position(10.0, -84.5);
        let json = serde_json::to_string(&coordinates).unwrap();
        assert_eq!(json, r#"["-84.5","10.0"]"#);
    }

    #[test]
    fn test_alert_request_body() {
        let request = AlertRequest {
            coordinates: Coordinates::from_position(9.0, -79.0),
        };
        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(json, r#"{"coordinates":["-79.0","9.0"]}"#);
    }

    #[test]
    fn test_fractional_degrees_keep_precision() {
        let coordinates = Coordinates::from_position(9.987654, -79.123456);
        assert_eq!(coordinates.latitude(), "9.987654");
        assert_eq!(coordinates.longitude(), "-79.123456");
    }
}
