//! geofix CLI: push GPS coordinates to iOS simulators and Android emulators
//!
//! ## Usage
//!
//! ```bash
//! geofix run --platform ios --manual "19.4326,-99.1332"
//! geofix run --platform android --gpx route.gpx --delay-ms 500
//! geofix devices --platform android --json
//! geofix serve --port 3000 --cors
//! ```

use clap::Parser;
use geofix_cli::{
    handlers, logging, Cli, CliConfig, CliError, CliResult, ColorChoice, Commands, ProgressReporter,
    Verbosity,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = build_config(&cli);
    logging::init(&config);

    match run(cli.command, config.clone()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            ProgressReporter::new(config.color.should_color(), config.verbosity.is_quiet())
                .failure(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands, config: CliConfig) -> CliResult<()> {
    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::config(format!("Failed to create runtime: {e}")))?;

    rt.block_on(async {
        match command {
            Commands::Run(args) => {
                let config = config.with_json(args.json);
                handlers::execute_run(&config, &args).await
            }
            Commands::Devices(args) => {
                let config = config.with_json(args.json);
                handlers::execute_devices(&config, &args).await
            }
            Commands::Serve(args) => handlers::execute_serve(&args).await,
        }
    })
}

fn build_config(cli: &Cli) -> CliConfig {
    let verbosity = Verbosity::from_flags(cli.quiet, cli.verbose);
    let color: ColorChoice = cli.color.clone().into();

    CliConfig::new().with_verbosity(verbosity).with_color(color)
}
