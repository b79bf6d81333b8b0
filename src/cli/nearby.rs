//! Nearby command handler
//!
//! Lists reference locations around a point, closest first.

use crate::cli::{emit, formatter_for};
use crate::config::Config;
use crate::coord::distance::nearby;
use crate::coord::Coordinates;
use crate::error::{Error, Result};
use crate::location::dataset::ReferenceDataset;
use crate::location::Location;
use clap::Args;

/// Nearby command arguments
#[derive(Args)]
pub struct NearbyArgs {
    /// Latitude
    #[arg(long, allow_negative_numbers = true)]
    pub lat: f64,

    /// Longitude
    #[arg(long, allow_negative_numbers = true)]
    pub lng: f64,

    /// Search radius in kilometers
    #[arg(long, short = 'r')]
    pub radius: Option<f64>,

    /// Output format
    #[arg(long, short = 'f')]
    pub format: Option<String>,

    /// Write output to file
    #[arg(long, short = 'o')]
    pub output: Option<String>,
}

/// Run the nearby command
pub fn run(args: NearbyArgs) -> Result<()> {
    let config = Config::load()?;
    let radius = args.radius.unwrap_or(config.defaults.nearby_radius_km);
    let format = args.format.unwrap_or(config.defaults.format.clone());

    let dataset = ReferenceDataset::load_optional(&config.dataset.path)?;
    if dataset.is_empty() {
        return Err(Error::Config(
            "No reference dataset configured (set dataset.path)".to_string(),
        ));
    }

    let found = nearby(Coordinates::new(args.lat, args.lng), radius, dataset.locations());

    // JSON keeps the distance field; the other formats work on plain locations
    let output = if format.eq_ignore_ascii_case("json") {
        serde_json::to_string_pretty(&found)?
    } else {
        let locations: Vec<Location> = found.into_iter().map(|n| n.location).collect();
        formatter_for(&format)?.format(&locations)?
    };

    emit(&output, args.output.as_deref())
}
