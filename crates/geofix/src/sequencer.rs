//! Location sequencer: plays a coordinate sequence onto every active device.
//!
//! A run enumerates devices exactly once, then for each coordinate in order
//! broadcasts it to every device one after another and sleeps for the
//! configured delay. Devices that appear or vanish mid-run are not noticed.
//! A run cannot be cancelled; it ends after the last coordinate's delay or at
//! the first fatal error.

use crate::config::SimulationConfig;
use crate::coordinate::Coordinate;
use crate::device::DeviceBridge;
use crate::exec::CommandRunner;
use crate::extract::{extract_coordinates, Submission};
use crate::platform::Platform;
use crate::result::{GeofixError, GeofixResult};
use serde::{Deserialize, Serialize};

/// Outcome of a completed run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Platform that was driven
    pub platform: Platform,
    /// Number of coordinates played
    pub coordinates: usize,
    /// Devices the coordinates were broadcast to
    pub devices: Vec<String>,
}

/// Reported after each broadcast step, before the delay
#[derive(Debug, Clone, Copy)]
pub struct Progress<'a> {
    /// 1-based step number
    pub step: usize,
    /// Total number of steps in the run
    pub total: usize,
    /// Coordinate that was just broadcast
    pub coordinate: &'a Coordinate,
    /// Number of devices it was sent to
    pub devices: usize,
}

/// Drives coordinate sequences through a [`CommandRunner`]
#[derive(Debug)]
pub struct LocationSequencer<R> {
    runner: R,
    config: SimulationConfig,
}

impl<R: CommandRunner> LocationSequencer<R> {
    /// Create a sequencer
    #[must_use]
    pub const fn new(runner: R, config: SimulationConfig) -> Self {
        Self { runner, config }
    }

    /// Active configuration
    #[must_use]
    pub const fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Underlying command runner
    #[must_use]
    pub const fn runner(&self) -> &R {
        &self.runner
    }

    /// Enumerate active devices for a platform without dispatching anything
    pub async fn list_devices(&self, platform: Platform) -> GeofixResult<Vec<String>> {
        DeviceBridge::for_platform(platform, &self.config)
            .enumerate(&self.runner)
            .await
    }

    /// Play `coordinates` on every active device of `platform`
    pub async fn run(
        &self,
        platform: Platform,
        coordinates: &[Coordinate],
    ) -> GeofixResult<RunSummary> {
        self.run_observed(platform, coordinates, |_| {}).await
    }

    /// Like [`run`](Self::run), calling `observer` after each broadcast step
    pub async fn run_observed<F>(
        &self,
        platform: Platform,
        coordinates: &[Coordinate],
        mut observer: F,
    ) -> GeofixResult<RunSummary>
    where
        F: FnMut(Progress<'_>) + Send,
    {
        if coordinates.is_empty() {
            return Err(GeofixError::NoCoordinates);
        }

        let bridge = DeviceBridge::for_platform(platform, &self.config);
        let devices = bridge.enumerate(&self.runner).await?;
        if devices.is_empty() {
            return Err(GeofixError::NoActiveDevices { platform });
        }

        tracing::info!(
            %platform,
            devices = devices.len(),
            coordinates = coordinates.len(),
            delay_ms = self.config.delay.as_millis() as u64,
            "starting location run"
        );

        let total = coordinates.len();
        for (idx, coordinate) in coordinates.iter().enumerate() {
            for device in &devices {
                bridge.dispatch(&self.runner, device, coordinate).await;
            }
            observer(Progress {
                step: idx + 1,
                total,
                coordinate,
                devices: devices.len(),
            });
            tokio::time::sleep(self.config.delay).await;
        }

        tracing::info!(%platform, coordinates = total, "location run finished");
        Ok(RunSummary {
            platform,
            coordinates: total,
            devices,
        })
    }

    /// Handle a decoded submission: resolve the platform, extract
    /// coordinates, and run them.
    pub async fn simulate(&self, submission: &Submission) -> GeofixResult<RunSummary> {
        self.simulate_observed(submission, |_| {}).await
    }

    /// Like [`simulate`](Self::simulate) with a progress observer
    pub async fn simulate_observed<F>(
        &self,
        submission: &Submission,
        observer: F,
    ) -> GeofixResult<RunSummary>
    where
        F: FnMut(Progress<'_>) + Send,
    {
        let platform = submission.platform();
        let coordinates = extract_coordinates(submission)?;
        if coordinates.is_empty() {
            return Err(GeofixError::NoCoordinates);
        }
        self.run_observed(platform, &coordinates, observer).await
    }
}
