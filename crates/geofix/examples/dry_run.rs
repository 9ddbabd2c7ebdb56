//! Play a short batch against a scripted adb and print the commands that
//! would have been sent.
//!
//! ```bash
//! cargo run -p geofix --example dry_run
//! ```

use geofix::{CommandOutput, LocationSequencer, MockRunner, SimulationConfig, Submission};
use std::sync::Arc;

#[tokio::main]
async fn main() -> geofix::GeofixResult<()> {
    let runner = Arc::new(MockRunner::new().respond(
        "adb devices",
        CommandOutput::ok("List of devices attached\nemulator-5554\tdevice\nemulator-5556\tdevice\n"),
    ));
    let config = SimulationConfig::builder().delay_ms(100).build();
    let sequencer = LocationSequencer::new(Arc::clone(&runner), config);

    let submission = Submission::new()
        .with_platform("android")
        .with_batch("19.4326,-99.1332\n19.4270,-99.1677\n19.4194,-99.1455");

    let summary = sequencer
        .simulate_observed(&submission, |progress| {
            println!(
                "[{}/{}] {} -> {} device(s)",
                progress.step, progress.total, progress.coordinate, progress.devices
            );
        })
        .await?;

    println!("\n{} coordinate(s) on {:?}", summary.coordinates, summary.devices);
    for line in runner.command_lines() {
        println!("  $ {line}");
    }
    Ok(())
}
