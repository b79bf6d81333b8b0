//! Bounds command handler
//!
//! Runs one viewport query against the feature source and prints the result.

use crate::aggregate::LocationAggregator;
use crate::cli::{emit, formatter_for, list_formats};
use crate::config::Config;
use crate::coord::BoundingBox;
use crate::error::{Error, Result};
use crate::location::available_categories;
use crate::location::dataset::ReferenceDataset;
use crate::overpass::OverpassClient;
use clap::Args;
use std::sync::Arc;

/// Bounds command arguments
#[derive(Args)]
pub struct BoundsArgs {
    /// Southern latitude
    #[arg(allow_negative_numbers = true, required_unless_present_any = ["list_types", "list_formats"])]
    pub south: Option<f64>,

    /// Western longitude
    #[arg(allow_negative_numbers = true, required_unless_present_any = ["list_types", "list_formats"])]
    pub west: Option<f64>,

    /// Northern latitude
    #[arg(allow_negative_numbers = true, required_unless_present_any = ["list_types", "list_formats"])]
    pub north: Option<f64>,

    /// Eastern longitude
    #[arg(allow_negative_numbers = true, required_unless_present_any = ["list_types", "list_formats"])]
    pub east: Option<f64>,

    /// Category to query (park, landmark, infrastructure)
    #[arg(long, short = 't')]
    pub r#type: Option<String>,

    /// Output format
    #[arg(long, short = 'f')]
    pub format: Option<String>,

    /// Write output to file
    #[arg(long, short = 'o')]
    pub output: Option<String>,

    /// List available types
    #[arg(short = 'T', long = "list-types")]
    pub list_types: bool,

    /// List available formats
    #[arg(short = 'F', long = "list-formats")]
    pub list_formats: bool,
}

impl BoundsArgs {
    fn bounds(&self) -> Result<BoundingBox> {
        match (self.south, self.west, self.north, self.east) {
            (Some(s), Some(w), Some(n), Some(e)) => Ok(BoundingBox::new(s, w, n, e)),
            _ => Err(Error::InvalidInput(
                "Bounds require south, west, north and east".to_string(),
            )),
        }
    }
}

/// Run the bounds command
pub async fn run(args: BoundsArgs) -> Result<()> {
    if args.list_types {
        list_types();
        return Ok(());
    }

    if args.list_formats {
        list_formats();
        return Ok(());
    }

    let config = Config::load()?;
    let bounds = args.bounds()?;
    let format = args.format.clone().unwrap_or(config.defaults.format.clone());
    let formatter = formatter_for(&format)?;

    let fallback = ReferenceDataset::load_optional(&config.dataset.path)?;
    let aggregator =
        LocationAggregator::new(OverpassClient::new(&config.upstream)?, Arc::new(fallback));

    let result = aggregator
        .locations_in_bounds(bounds, args.r#type.as_deref().filter(|t| !t.is_empty()))
        .await;
    eprintln!(
        "{} location(s) from {} data",
        result.locations.len(),
        result.origin.as_str()
    );

    let output = formatter.format(&result.locations)?;
    emit(&output, args.output.as_deref())
}

/// Print available location types
fn list_types() {
    println!("Available location types:");
    for category in available_categories() {
        println!("  {}", category);
    }
}
