//! iOS simulator commands (`xcrun simctl`).

use crate::coordinate::Coordinate;
use crate::result::{GeofixError, GeofixResult};
use serde::Deserialize;
use std::collections::BTreeMap;

/// State string simctl reports for a running simulator
pub const BOOTED: &str = "Booted";

#[derive(Debug, Deserialize)]
struct DeviceList {
    devices: BTreeMap<String, Vec<SimDevice>>,
}

#[derive(Debug, Deserialize)]
struct SimDevice {
    udid: String,
    state: String,
}

/// Arguments for `xcrun simctl list devices booted --json`
#[must_use]
pub fn list_args() -> Vec<String> {
    ["simctl", "list", "devices", "booted", "--json"]
        .iter()
        .map(|s| (*s).to_string())
        .collect()
}

/// Arguments for `xcrun simctl location <udid> set <lat>,<lon>`
#[must_use]
pub fn set_location_args(udid: &str, coordinate: &Coordinate) -> Vec<String> {
    vec![
        "simctl".to_string(),
        "location".to_string(),
        udid.to_string(),
        "set".to_string(),
        format!("{},{}", coordinate.latitude, coordinate.longitude),
    ]
}

/// Decode simctl's JSON device listing into the UDIDs of booted devices.
///
/// Runtimes are visited in name order; devices keep their listed order.
pub fn parse_booted(json: &str) -> GeofixResult<Vec<String>> {
    let list: DeviceList = serde_json::from_str(json)
        .map_err(|e| GeofixError::device_listing("xcrun simctl", format!("bad JSON: {e}")))?;

    Ok(list
        .devices
        .into_values()
        .flatten()
        .filter(|device| device.state == BOOTED)
        .map(|device| device.udid)
        .collect())
}
