//! Target platform selection.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Device platform a simulation run targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// iOS simulators driven through `xcrun simctl`
    Ios,
    /// Android emulators driven through `adb`
    #[default]
    Android,
}

impl Platform {
    /// Resolve a platform name, case-insensitively.
    ///
    /// Unrecognized names resolve to [`Platform::Android`] with a warning.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "ios" => Self::Ios,
            "android" => Self::Android,
            other => {
                tracing::warn!(platform = other, "unrecognized platform, using android");
                Self::Android
            }
        }
    }

    /// Resolve an optional platform field; absent or blank means Android
    #[must_use]
    pub fn from_optional(name: Option<&str>) -> Self {
        match name {
            Some(n) if !n.trim().is_empty() => Self::from_name(n),
            _ => Self::default(),
        }
    }

    /// Lowercase wire name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ios => "ios",
            Self::Android => "android",
        }
    }

    /// Plural noun for the kind of device this platform drives
    #[must_use]
    pub const fn device_kind(self) -> &'static str {
        match self {
            Self::Ios => "simulators",
            Self::Android => "emulators",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
