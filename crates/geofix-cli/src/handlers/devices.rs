//! Devices command handler

use crate::commands::{DevicesArgs, ToolArgs};
use crate::config::CliConfig;
use crate::error::CliResult;
use crate::output::ProgressReporter;
use geofix::{CommandRunner, LocationSequencer, Platform, SystemRunner, DEFAULT_DELAY_MS};

/// List active devices for the requested platform
pub async fn execute_devices(config: &CliConfig, args: &DevicesArgs) -> CliResult<()> {
    let platform = Platform::from_name(&args.platform);
    let devices = list_with(platform, &args.tools, SystemRunner::new()).await?;

    if devices.is_empty() && !config.json {
        let reporter = ProgressReporter::new(config.color.should_color(), config.verbosity.is_quiet());
        reporter.warning(&format!(
            "No active {} for platform {platform}",
            platform.device_kind()
        ));
        return Ok(());
    }

    println!("{}", format_devices(&devices, config.json));
    Ok(())
}

/// Enumerate devices through any command runner
pub async fn list_with<R: CommandRunner>(
    platform: Platform,
    tools: &ToolArgs,
    runner: R,
) -> CliResult<Vec<String>> {
    let sequencer = LocationSequencer::new(runner, tools.simulation_config(DEFAULT_DELAY_MS));
    Ok(sequencer.list_devices(platform).await?)
}

/// One id per line, or a JSON array
#[must_use]
pub fn format_devices(devices: &[String], json: bool) -> String {
    if json {
        serde_json::Value::from(devices.to_vec()).to_string()
    } else {
        devices.join("\n")
    }
}
