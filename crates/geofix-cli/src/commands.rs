//! CLI command definitions using clap

use clap::{Args, Parser, Subcommand, ValueEnum};
use geofix::config::{DEFAULT_ADB, DEFAULT_XCRUN};
use geofix::{GpxSource, SimulationConfig, Submission, DEFAULT_DELAY_MS};
use std::path::PathBuf;

/// geofix: push GPS coordinates to running iOS simulators and Android emulators
#[derive(Parser, Debug)]
#[command(name = "geofix")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play coordinates on every active device of a platform
    Run(RunArgs),

    /// List active devices for a platform
    Devices(DevicesArgs),

    /// Start the HTTP simulation endpoint
    Serve(ServeArgs),
}

/// External tool locations shared by every command
#[derive(Args, Debug, Clone)]
pub struct ToolArgs {
    /// Program fronting simctl
    #[arg(long, env = "GEOFIX_XCRUN", default_value = DEFAULT_XCRUN)]
    pub xcrun: String,

    /// Android debug bridge program
    #[arg(long, env = "GEOFIX_ADB", default_value = DEFAULT_ADB)]
    pub adb: String,
}

impl ToolArgs {
    /// Build the simulation configuration with the given delay
    #[must_use]
    pub fn simulation_config(&self, delay_ms: u64) -> SimulationConfig {
        SimulationConfig::builder()
            .delay_ms(delay_ms)
            .xcrun(self.xcrun.clone())
            .adb(self.adb.clone())
            .build()
    }
}

/// Coordinate input; at most one kind may be given
#[derive(Args, Debug, Clone, Default)]
#[group(id = "input", multiple = false)]
pub struct InputArgs {
    /// A single "lat,lon" coordinate
    #[arg(long)]
    pub manual: Option<String>,

    /// Newline-delimited "lat,lon" coordinates
    #[arg(long)]
    pub batch: Option<String>,

    /// File with newline-delimited "lat,lon" coordinates
    #[arg(long, value_name = "PATH")]
    pub batch_file: Option<PathBuf>,

    /// GPX track file (first segment of the first track is played)
    #[arg(long, value_name = "PATH")]
    pub gpx: Option<PathBuf>,
}

impl InputArgs {
    /// Turn the arguments into a submission for `platform`
    pub fn to_submission(&self, platform: &str) -> std::io::Result<Submission> {
        let mut submission = Submission::new().with_platform(platform);
        if let Some(manual) = &self.manual {
            submission = submission.with_manual(manual.clone());
        }
        if let Some(batch) = &self.batch {
            submission = submission.with_batch(batch.clone());
        }
        if let Some(path) = &self.batch_file {
            submission = submission.with_batch(std::fs::read_to_string(path)?);
        }
        if let Some(path) = &self.gpx {
            submission = submission.with_gpx(GpxSource::Path(path.clone()));
        }
        Ok(submission)
    }
}

/// Arguments for the run command
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Target platform: ios or android (anything else means android)
    #[arg(short, long, default_value = "android")]
    pub platform: String,

    #[command(flatten)]
    pub input: InputArgs,

    /// Pause after each coordinate, in milliseconds
    #[arg(long, env = "GEOFIX_DELAY_MS", default_value_t = DEFAULT_DELAY_MS)]
    pub delay_ms: u64,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub tools: ToolArgs,
}

/// Arguments for the devices command
#[derive(Parser, Debug)]
pub struct DevicesArgs {
    /// Target platform: ios or android (anything else means android)
    #[arg(short, long, default_value = "android")]
    pub platform: String,

    /// Print the device list as JSON
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub tools: ToolArgs,
}

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind
    #[arg(long, env = "GEOFIX_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// HTTP port to listen on
    #[arg(short, long, env = "GEOFIX_PORT", default_value = "3000")]
    pub port: u16,

    /// Enable CORS for cross-origin requests
    #[arg(long)]
    pub cors: bool,

    /// Pause after each coordinate, in milliseconds
    #[arg(long, env = "GEOFIX_DELAY_MS", default_value_t = DEFAULT_DELAY_MS)]
    pub delay_ms: u64,

    #[command(flatten)]
    pub tools: ToolArgs,
}

/// Color argument for CLI
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum ColorArg {
    /// Automatic color detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for crate::config::ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}
