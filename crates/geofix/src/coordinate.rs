//! Coordinate values pushed to devices.
//!
//! Latitude and longitude stay as the text the user supplied. Nothing in
//! geofix does arithmetic on them and the device tools take text arguments,
//! so range checking is left to the tools themselves.

use crate::result::{GeofixError, GeofixResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A (latitude, longitude) pair in decimal degrees, kept as text
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude, trimmed
    pub latitude: String,
    /// Longitude, trimmed
    pub longitude: String,
}

impl Coordinate {
    /// Build a coordinate from two components.
    ///
    /// Both components are trimmed and must be non-empty afterwards.
    pub fn new(latitude: impl AsRef<str>, longitude: impl AsRef<str>) -> GeofixResult<Self> {
        let latitude = latitude.as_ref().trim();
        let longitude = longitude.as_ref().trim();
        if latitude.is_empty() || longitude.is_empty() {
            return Err(GeofixError::InvalidCoordinate {
                content: format!("{latitude},{longitude}"),
            });
        }
        Ok(Self {
            latitude: latitude.to_string(),
            longitude: longitude.to_string(),
        })
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}
