//! Result and error types for geofix.

use crate::platform::Platform;
use thiserror::Error;

/// Result type for geofix operations
pub type GeofixResult<T> = Result<T, GeofixError>;

/// Errors that can occur while extracting coordinates or driving devices
#[derive(Debug, Error)]
pub enum GeofixError {
    /// The submission carried no usable coordinates
    #[error("No coordinates supplied")]
    NoCoordinates,

    /// A manual/batch line could not be split into latitude and longitude
    #[error("Malformed coordinate on line {line}: {content:?} (expected \"lat,lon\")")]
    MalformedCoordinate {
        /// 1-based line number within the submitted text
        line: usize,
        /// The offending line, trimmed
        content: String,
    },

    /// A coordinate built directly had a blank latitude or longitude
    #[error("Invalid coordinate {content:?}: latitude and longitude must both be non-empty")]
    InvalidCoordinate {
        /// The rejected pair as `lat,lon`
        content: String,
    },

    /// GPX document was not valid XML or lacked the track structure
    #[error("Invalid GPX: {message}")]
    Gpx {
        /// Error message
        message: String,
    },

    /// The device-listing command failed or returned something undecodable
    #[error("Failed to list devices with {tool}: {message}")]
    DeviceListing {
        /// Tool that was invoked (`xcrun simctl`, `adb`)
        tool: String,
        /// Error message
        message: String,
    },

    /// Enumeration succeeded but nothing is running
    #[error("No active {} for platform {platform}", platform.device_kind())]
    NoActiveDevices {
        /// Platform that was queried
        platform: Platform,
    },

    /// The external program could not be started at all
    #[error("Failed to run {program}: {source}")]
    CommandSpawn {
        /// Program name or path
        program: String,
        /// Underlying spawn error
        source: std::io::Error,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl GeofixError {
    /// Create a GPX error
    #[must_use]
    pub fn gpx(message: impl Into<String>) -> Self {
        Self::Gpx {
            message: message.into(),
        }
    }

    /// Create a device listing error
    #[must_use]
    pub fn device_listing(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::DeviceListing {
            tool: tool.into(),
            message: message.into(),
        }
    }

    /// Whether this error comes from the submitted input rather than the host
    #[must_use]
    pub const fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::NoCoordinates
                | Self::MalformedCoordinate { .. }
                | Self::InvalidCoordinate { .. }
                | Self::Gpx { .. }
                | Self::Io(_)
        )
    }
}
