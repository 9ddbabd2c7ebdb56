//! Device discovery and location dispatch.
//!
//! Both platforms expose the same two operations: enumerate the devices that
//! are running right now, and push one coordinate to one device. A
//! [`DeviceBridge`] is picked once per run from the platform and carries the
//! program it drives.

pub mod emulator;
pub mod simulator;

use crate::config::SimulationConfig;
use crate::coordinate::Coordinate;
use crate::exec::CommandRunner;
use crate::platform::Platform;
use crate::result::{GeofixError, GeofixResult};

/// Platform-specific device strategy
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceBridge {
    /// iOS simulators through `<xcrun> simctl`
    Simulator {
        /// Program fronting simctl
        xcrun: String,
    },
    /// Android emulators through `adb`
    Emulator {
        /// adb program
        adb: String,
    },
}

impl DeviceBridge {
    /// Select the bridge for a platform
    #[must_use]
    pub fn for_platform(platform: Platform, config: &SimulationConfig) -> Self {
        match platform {
            Platform::Ios => Self::Simulator {
                xcrun: config.xcrun.clone(),
            },
            Platform::Android => Self::Emulator {
                adb: config.adb.clone(),
            },
        }
    }

    /// Platform this bridge drives
    #[must_use]
    pub const fn platform(&self) -> Platform {
        match self {
            Self::Simulator { .. } => Platform::Ios,
            Self::Emulator { .. } => Platform::Android,
        }
    }

    fn program(&self) -> &str {
        match self {
            Self::Simulator { xcrun } => xcrun,
            Self::Emulator { adb } => adb,
        }
    }

    /// List identifiers of currently active devices.
    ///
    /// An empty list is not an error here; the sequencer decides what an
    /// empty fleet means.
    pub async fn enumerate<R>(&self, runner: &R) -> GeofixResult<Vec<String>>
    where
        R: CommandRunner + ?Sized,
    {
        let (tool, args) = match self {
            Self::Simulator { .. } => ("xcrun simctl", simulator::list_args()),
            Self::Emulator { .. } => ("adb", emulator::list_args()),
        };

        let output = runner.run(self.program(), &args).await?;
        if !output.success() {
            return Err(GeofixError::device_listing(tool, output.failure_message()));
        }

        let devices = match self {
            Self::Simulator { .. } => simulator::parse_booted(&output.stdout)?,
            Self::Emulator { .. } => emulator::parse_devices(&output.stdout),
        };
        tracing::debug!(platform = %self.platform(), count = devices.len(), "enumerated devices");
        Ok(devices)
    }

    /// Push one coordinate to one device.
    ///
    /// Failures are logged and swallowed so one broken device cannot stop
    /// the rest of the broadcast.
    pub async fn dispatch<R>(&self, runner: &R, device: &str, coordinate: &Coordinate)
    where
        R: CommandRunner + ?Sized,
    {
        let args = match self {
            Self::Simulator { .. } => simulator::set_location_args(device, coordinate),
            Self::Emulator { .. } => emulator::geo_fix_args(device, coordinate),
        };

        match runner.run(self.program(), &args).await {
            Ok(output) if output.success() => {
                tracing::debug!(device, %coordinate, "location set");
            }
            Ok(output) => {
                tracing::warn!(
                    device,
                    %coordinate,
                    error = %output.failure_message(),
                    "failed to set location on {}",
                    self.platform()
                );
            }
            Err(err) => {
                tracing::warn!(
                    device,
                    %coordinate,
                    error = %err,
                    "failed to set location on {}",
                    self.platform()
                );
            }
        }
    }
}
