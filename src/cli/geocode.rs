//! Geocode command handler

use crate::config::Config;
use crate::error::{Error, Result};
use crate::geo::nominatim::NominatimBackend;
use crate::geo::{GeoBackend, GeocodeResult};
use clap::Args;

/// Geocode command arguments
#[derive(Args)]
pub struct GeocodeArgs {
    /// Place name or address
    #[arg(required = true)]
    pub query: Vec<String>,

    /// Print one line per hit instead of JSON
    #[arg(long)]
    pub text: bool,
}

/// Run the geocode command
pub async fn run(args: GeocodeArgs) -> Result<()> {
    let query = args.query.join(" ");
    if query.trim().is_empty() {
        return Err(Error::InvalidInput("No query provided".to_string()));
    }

    let config = Config::load()?;
    let geocoder = NominatimBackend::new(&config.upstream)?;
    let results = geocoder.geocode(&query).await?;

    if results.is_empty() {
        eprintln!("No results for '{}'", query);
    }

    if args.text {
        print!("{}", render_text(&results));
    } else {
        println!("{}", serde_json::to_string_pretty(&results)?);
    }

    Ok(())
}

fn render_text(results: &[GeocodeResult]) -> String {
    results
        .iter()
        .map(|r| {
            format!(
                "{} ({:.6}, {:.6}) [{}, importance {:.2}]\n",
                r.name, r.lat, r.lng, r.kind, r.importance
            )
        })
        .collect()
}
