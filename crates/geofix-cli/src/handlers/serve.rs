//! Serve command handler

use crate::commands::ServeArgs;
use crate::error::CliResult;
use crate::server::{self, ServerConfig};
use geofix::{LocationSequencer, SystemRunner};
use std::sync::Arc;

/// Build the endpoint configuration from CLI args
#[must_use]
pub fn build_server_config(args: &ServeArgs) -> ServerConfig {
    ServerConfig::builder()
        .host(args.host.clone())
        .port(args.port)
        .cors(args.cors)
        .build()
}

/// Run the HTTP endpoint until interrupted
pub async fn execute_serve(args: &ServeArgs) -> CliResult<()> {
    let config = build_server_config(args);
    let sequencer = Arc::new(LocationSequencer::new(
        SystemRunner::new(),
        args.tools.simulation_config(args.delay_ms),
    ));
    eprintln!("geofix listening on {}", config.http_url());
    eprintln!("Press Ctrl+C to stop");
    server::serve(&config, sequencer).await
}
