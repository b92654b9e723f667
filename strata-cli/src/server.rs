//! Serve command - start the HTTP API server

use anyhow::Result;
use clap::Args;

use strata_server::{run_server, ServerConfig};

#[derive(Args)]
pub struct ServerArgs {
    /// Port number to listen on
    #[arg(long, default_value = "8003")]
    pub port: u16,
}

/// Run serve command
pub fn run(args: ServerArgs) -> Result<()> {
    let config = configure_server(&args);

    tracing::info!("Starting Strata server on port {}", config.port);

    start_server(config)
}

/// Configure server from command arguments
fn configure_server(args: &ServerArgs) -> ServerConfig {
    ServerConfig { port: args.port }
}

/// Start the server (blocking)
fn start_server(config: ServerConfig) -> Result<()> {
    // Create tokio runtime for async server
    let runtime = tokio::runtime::Runtime::new()?;

    runtime.block_on(async { run_server(config).await })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configure_server_port() {
        let args = ServerArgs { port: 9000 };
        let config = configure_server(&args);
        assert_eq!(config.port, 9000);
    }
}
