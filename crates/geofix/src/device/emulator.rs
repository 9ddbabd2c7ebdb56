//! Android emulator commands (`adb`).

use crate::coordinate::Coordinate;
use regex::Regex;
use std::sync::OnceLock;

/// State marker adb prints for an unreachable device
pub const OFFLINE: &str = "offline";

/// Header adb prints before the device table
pub const HEADER: &str = "List of devices attached";

#[allow(clippy::expect_used)]
fn serial_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("serial pattern is valid"))
}

/// Arguments for `adb devices`
#[must_use]
pub fn list_args() -> Vec<String> {
    vec!["devices".to_string()]
}

/// Arguments for `adb -s <serial> emu geo fix <lon> <lat>`.
///
/// The console command takes longitude first.
#[must_use]
pub fn geo_fix_args(serial: &str, coordinate: &Coordinate) -> Vec<String> {
    vec![
        "-s".to_string(),
        serial.to_string(),
        "emu".to_string(),
        "geo".to_string(),
        "fix".to_string(),
        coordinate.longitude.clone(),
        coordinate.latitude.clone(),
    ]
}

/// Parse the `adb devices` table into usable serials.
///
/// Everything up to and including the header line is skipped, or just the
/// first line if no header is present. A line is kept when it is not marked offline and its first
/// token is a plain serial.
#[must_use]
pub fn parse_devices(stdout: &str) -> Vec<String> {
    let lines: Vec<&str> = stdout.lines().collect();
    let start = lines
        .iter()
        .position(|line| line.trim_start().starts_with(HEADER))
        .map_or(1, |idx| idx + 1);

    lines
        .iter()
        .skip(start)
        .filter(|line| !line.contains(OFFLINE))
        .filter_map(|line| line.split_whitespace().next())
        .filter(|serial| serial_pattern().is_match(serial))
        .map(str::to_string)
        .collect()
}
