//! Command handlers, kept out of main.rs for testability
//!
//! Each handler module contains:
//! - The execution logic for a CLI command
//! - A runner-generic core exercised with `MockRunner` in tests

pub mod devices;
pub mod run;
pub mod serve;

pub use devices::{execute_devices, format_devices, list_with};
pub use run::{execute_run, run_with};
pub use serve::{build_server_config, execute_serve};
