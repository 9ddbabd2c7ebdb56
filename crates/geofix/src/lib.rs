//! geofix: push coordinate sequences to running mobile simulators/emulators
//!
//! Coordinates come from manual text, a newline-delimited batch, or a GPX
//! track. They are played one at a time, with a fixed pause, onto every
//! booted iOS simulator (`xcrun simctl`) or connected Android emulator
//! (`adb emu geo fix`) on the host.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌───────────────────────────┐
//! │  Submission  │──►│  Extractor   │──►│     LocationSequencer     │
//! │ manual/batch │   │ Vec<Coord>   │   │ enumerate once, then for  │
//! │     /gpx     │   └──────────────┘   │ each coord: every device, │
//! └──────────────┘                      │ sleep(delay)              │
//!                                       └────────────┬──────────────┘
//!                                                    │ DeviceBridge
//!                                       ┌────────────▼──────────────┐
//!                                       │ CommandRunner (tokio proc │
//!                                       │ or MockRunner in tests)   │
//!                                       └───────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use geofix::{LocationSequencer, SimulationConfig, Submission, SystemRunner};
//!
//! # async fn demo() -> geofix::GeofixResult<()> {
//! let sequencer = LocationSequencer::new(SystemRunner::new(), SimulationConfig::default());
//! let submission = Submission::new()
//!     .with_platform("ios")
//!     .with_manual("19.4326,-99.1332");
//! let summary = sequencer.simulate(&submission).await?;
//! println!("played {} coordinate(s)", summary.coordinates);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod coordinate;
pub mod device;
pub mod exec;
pub mod extract;
pub mod platform;
mod result;
pub mod sequencer;

pub use config::{SimulationConfig, SimulationConfigBuilder, DEFAULT_DELAY_MS};
pub use coordinate::Coordinate;
pub use device::DeviceBridge;
pub use exec::{CommandOutput, CommandRunner, Invocation, MockRunner, SystemRunner};
pub use extract::{extract_coordinates, parse_coordinate_lines, parse_gpx, GpxSource, Submission};
pub use platform::Platform;
pub use result::{GeofixError, GeofixResult};
pub use sequencer::{LocationSequencer, Progress, RunSummary};
