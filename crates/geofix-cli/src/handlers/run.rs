//! Run command handler

use crate::commands::RunArgs;
use crate::config::CliConfig;
use crate::error::CliResult;
use crate::output::{format_summary, summary_json, ProgressReporter};
use geofix::{
    extract_coordinates, CommandRunner, GeofixError, LocationSequencer, RunSummary, SystemRunner,
};

/// Play the requested coordinates on the host's devices and print the result
pub async fn execute_run(config: &CliConfig, args: &RunArgs) -> CliResult<()> {
    let summary = run_with(config, args, SystemRunner::new()).await?;
    if config.json {
        println!("{}", summary_json(&summary));
    } else {
        println!("{}", format_summary(&summary));
    }
    Ok(())
}

/// Core of the run command over any command runner
pub async fn run_with<R: CommandRunner>(
    config: &CliConfig,
    args: &RunArgs,
    runner: R,
) -> CliResult<RunSummary> {
    let submission = args.input.to_submission(&args.platform)?;
    let platform = submission.platform();
    let coordinates = extract_coordinates(&submission)?;
    if coordinates.is_empty() {
        return Err(GeofixError::NoCoordinates.into());
    }

    let sequencer = LocationSequencer::new(runner, args.tools.simulation_config(args.delay_ms));

    let quiet = config.verbosity.is_quiet() || config.json;
    let mut reporter = ProgressReporter::new(config.color.should_color(), quiet);
    reporter.start_progress(coordinates.len() as u64, &format!("Simulating on {platform}"));

    let result = sequencer
        .run_observed(platform, &coordinates, |progress| reporter.step(&progress))
        .await;
    reporter.finish();

    Ok(result?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::commands::{InputArgs, ToolArgs};
    use crate::error::CliError;
    use geofix::{CommandOutput, MockRunner, Platform};
    use std::sync::Arc;

    fn args(platform: &str, input: InputArgs) -> RunArgs {
        RunArgs {
            platform: platform.to_string(),
            input,
            delay_ms: 0,
            json: false,
            tools: ToolArgs {
                xcrun: "xcrun".to_string(),
                adb: "adb".to_string(),
            },
        }
    }

    fn quiet() -> CliConfig {
        CliConfig::new().with_verbosity(crate::config::Verbosity::Quiet)
    }

    #[tokio::test]
    async fn test_batch_on_android() {
        let runner = Arc::new(MockRunner::new().respond(
            "adb devices",
            CommandOutput::ok("List of devices attached\nemulator-5554\tdevice\n"),
        ));
        let input = InputArgs {
            batch: Some("1,2\n3,4".to_string()),
            ..InputArgs::default()
        };

        let summary = run_with(&quiet(), &args("android", input), Arc::clone(&runner))
            .await
            .unwrap();

        assert_eq!(summary.platform, Platform::Android);
        assert_eq!(summary.coordinates, 2);
        assert_eq!(
            runner.command_lines(),
            vec![
                "adb devices",
                "adb -s emulator-5554 emu geo fix 2 1",
                "adb -s emulator-5554 emu geo fix 4 3",
            ]
        );
    }

    #[tokio::test]
    async fn test_custom_tool_paths_are_used() {
        let runner = Arc::new(MockRunner::new().respond(
            "/opt/platform-tools/adb devices",
            CommandOutput::ok("List of devices attached\nemulator-5554\tdevice\n"),
        ));
        let mut run_args = args(
            "android",
            InputArgs {
                manual: Some("5,6".to_string()),
                ..InputArgs::default()
            },
        );
        run_args.tools.adb = "/opt/platform-tools/adb".to_string();

        run_with(&quiet(), &run_args, Arc::clone(&runner)).await.unwrap();

        assert_eq!(runner.count_matching("/opt/platform-tools/adb -s"), 1);
    }

    #[tokio::test]
    async fn test_no_input_fails_without_listing() {
        let runner = Arc::new(MockRunner::new());
        let err = run_with(&quiet(), &args("ios", InputArgs::default()), Arc::clone(&runner))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            CliError::Simulation(GeofixError::NoCoordinates)
        ));
        assert!(runner.history().is_empty());
    }

    #[tokio::test]
    async fn test_no_devices_is_an_error() {
        let runner = MockRunner::new().respond(
            "simctl list",
            CommandOutput::ok(r#"{"devices":{}}"#),
        );
        let input = InputArgs {
            manual: Some("1,2".to_string()),
            ..InputArgs::default()
        };
        let err = run_with(&quiet(), &args("ios", input), runner)
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "No active simulators for platform ios");
    }

    #[tokio::test]
    async fn test_missing_gpx_file_is_io_error() {
        let input = InputArgs {
            gpx: Some("/definitely/not/here.gpx".into()),
            ..InputArgs::default()
        };
        let err = run_with(&quiet(), &args("android", input), MockRunner::new())
            .await
            .unwrap_err();

        assert!(matches!(err, CliError::Simulation(GeofixError::Io(_))));
    }
}
