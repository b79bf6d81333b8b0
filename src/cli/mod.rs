//! CLI command handlers
//!
//! Each subcommand has its own module with handler functions.

pub mod bounds;
pub mod config;
pub mod geocode;
pub mod nearby;
pub mod serve;

use crate::error::{Error, Result};
use crate::format::{available_formats, get_formatter, OutputFormatter};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Point-of-interest gateway over OpenStreetMap
#[derive(Parser)]
#[command(name = "poi-gateway")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start web server (foreground)
    Serve(serve::ServeArgs),

    /// Manage configuration
    Config(config::ConfigArgs),

    /// Fetch categorized locations inside a bounding box
    Bounds(bounds::BoundsArgs),

    /// Geocode a place name
    Geocode(geocode::GeocodeArgs),

    /// Reference locations near a point
    Nearby(nearby::NearbyArgs),
}

/// Initialize logging on stderr, `RUST_LOG` overriding the `info` default
///
/// Stdout is left to command output so `bounds`/`nearby` stay pipeable.
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

/// Run the CLI
pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    match cli.command {
        Commands::Serve(args) => serve::run(args).await,
        Commands::Config(args) => config::run(args),
        Commands::Bounds(args) => bounds::run(args).await,
        Commands::Geocode(args) => geocode::run(args).await,
        Commands::Nearby(args) => nearby::run(args),
    }
}

/// Look up a formatter by name
fn formatter_for(format: &str) -> Result<Box<dyn OutputFormatter>> {
    get_formatter(format).ok_or_else(|| Error::Config(format!("Unknown format: {}", format)))
}

/// Write command output to a file or stdout
fn emit(output: &str, path: Option<&str>) -> Result<()> {
    if let Some(path) = path {
        std::fs::write(path, output)?;
        eprintln!("Output written to {}", path);
    } else {
        println!("{}", output);
    }
    Ok(())
}

/// Print available output formats
fn list_formats() {
    println!("Available output formats:");
    for format in available_formats() {
        println!("  {:<6} - {}", format.name, format.description);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bounds_with_negative_coordinates() {
        let cli = Cli::try_parse_from([
            "poi-gateway", "bounds", "40.70", "-74.02", "40.80", "-73.93", "--type", "park",
        ])
        .unwrap();

        match cli.command {
            Commands::Bounds(args) => {
                assert_eq!(args.south, Some(40.70));
                assert_eq!(args.west, Some(-74.02));
                assert_eq!(args.east, Some(-73.93));
                assert_eq!(args.r#type.as_deref(), Some("park"));
            }
            _ => panic!("expected bounds command"),
        }
    }

    #[test]
    fn test_parse_nearby() {
        let cli = Cli::try_parse_from([
            "poi-gateway", "nearby", "--lat", "40.78", "--lng", "-73.96", "-r", "2.5",
        ])
        .unwrap();

        match cli.command {
            Commands::Nearby(args) => {
                assert_eq!(args.lat, 40.78);
                assert_eq!(args.lng, -73.96);
                assert_eq!(args.radius, Some(2.5));
            }
            _ => panic!("expected nearby command"),
        }
    }

    #[test]
    fn test_parse_geocode_joins_words() {
        let cli = Cli::try_parse_from(["poi-gateway", "geocode", "central", "park"]).unwrap();

        match cli.command {
            Commands::Geocode(args) => assert_eq!(args.query.join(" "), "central park"),
            _ => panic!("expected geocode command"),
        }
    }

    #[test]
    fn test_init_logging_installs_global_subscriber() {
        init_logging();
        assert!(tracing::dispatcher::has_been_set());
        tracing::warn!("Error fetching OSM data: test");
    }

    #[test]
    fn test_formatter_for_unknown() {
        assert!(formatter_for("text").is_ok());
        assert!(matches!(formatter_for("kml"), Err(Error::Config(_))));
    }

    #[test]
    fn test_emit_to_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("out.json");
        emit("[]", path.to_str()).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
    }
}
