//! Serve command handler
//!
//! Starts the HTTP API in foreground mode.

use crate::config::Config;
use crate::error::Result;
use crate::server;
use clap::Args;
use tracing::{info, warn};

/// Serve command arguments
#[derive(Args)]
pub struct ServeArgs {
    /// Host address to bind to
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(long, short = 'p')]
    pub port: Option<u16>,

    /// Reference dataset JSON file (overrides dataset.path)
    #[arg(long, short = 'd')]
    pub dataset: Option<String>,

    /// Overpass interpreter URL (overrides upstream.overpass_url)
    #[arg(long)]
    pub overpass_url: Option<String>,
}

impl ServeArgs {
    /// Apply command-line overrides on top of the loaded config
    fn apply(self, config: &mut Config) {
        if let Some(host) = self.host {
            config.server.host = host;
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(dataset) = self.dataset {
            config.dataset.path = dataset;
        }
        if let Some(url) = self.overpass_url {
            config.upstream.overpass_url = url;
        }
    }
}

/// Run the serve command
pub async fn run(args: ServeArgs) -> Result<()> {
    let mut config = Config::load()?;
    args.apply(&mut config);

    info!(
        "Starting poi-gateway v{} on {}",
        env!("CARGO_PKG_VERSION"),
        config.server_addr()
    );
    info!(
        "Upstreams: overpass={} nominatim={}",
        config.upstream.overpass_url, config.upstream.nominatim_url
    );
    if config.dataset.path.is_empty() {
        warn!("No reference dataset configured; bounds fallback will be empty");
    }

    server::run(config).await
}
