//! poi-gateway CLI entry point
//!
//! Point-of-interest gateway - CLI + web API

use poi_gateway::cli;

#[tokio::main]
async fn main() {
    if let Err(e) = cli::run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
