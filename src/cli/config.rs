//! Config command handler
//!
//! View and modify configuration settings.

use crate::config::Config;
use crate::error::Result;
use clap::Args;

/// Config command arguments
#[derive(Args)]
pub struct ConfigArgs {
    /// Configuration key (e.g., "upstream.overpass_url")
    pub key: Option<String>,

    /// Value to set (if not provided, shows current value)
    pub value: Option<String>,

    /// Show config file path
    #[arg(long)]
    pub path: bool,

    /// Reset config to defaults
    #[arg(long)]
    pub reset: bool,
}

/// Run the config command
pub fn run(args: ConfigArgs) -> Result<()> {
    // Show path
    if args.path {
        let path = Config::config_path()?;
        println!("{}", path.display());
        return Ok(());
    }

    // Reset config
    if args.reset {
        let config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults");
        return Ok(());
    }

    let mut config = Config::load()?;

    match (&args.key, &args.value) {
        // No arguments: show all config
        (None, None) => {
            show_all_config(&config);
        }

        // Key only: show that value
        (Some(key), None) => {
            if let Some(value) = config.get(key) {
                println!("{}", value);
            } else {
                eprintln!("Unknown config key: {}", key);
                eprintln!("\nAvailable keys:");
                for k in Config::available_keys() {
                    eprintln!("  {}", k);
                }
                std::process::exit(1);
            }
        }

        // Key and value: set the value
        (Some(key), Some(value)) => {
            config.set(key, value)?;
            config.save()?;
            println!("{} = {}", key, value);
        }

        // Value without key: not valid
        (None, Some(_)) => {
            eprintln!("Error: Must specify a key to set a value");
            std::process::exit(1);
        }
    }

    Ok(())
}

/// Display all configuration values
fn show_all_config(config: &Config) {
    println!("[server]");
    println!("host = \"{}\"", config.server.host);
    println!("port = {}", config.server.port);
    println!();

    println!("[upstream]");
    println!("overpass_url = \"{}\"", config.upstream.overpass_url);
    println!("nominatim_url = \"{}\"", config.upstream.nominatim_url);
    println!("user_agent = \"{}\"", config.upstream.user_agent);
    println!("feature_timeout_secs = {}", config.upstream.feature_timeout_secs);
    println!("geocode_timeout_secs = {}", config.upstream.geocode_timeout_secs);
    println!("geocode_limit = {}", config.upstream.geocode_limit);
    println!();

    println!("[defaults]");
    println!("nearby_radius_km = {}", config.defaults.nearby_radius_km);
    println!("format = \"{}\"", config.defaults.format);
    println!();

    println!("[dataset]");
    if config.dataset.path.is_empty() {
        println!("path = \"\" # no reference dataset");
    } else {
        println!("path = \"{}\"", config.dataset.path);
    }
    println!();

    println!("[map]");
    println!("center = [{}, {}]", config.map.center[0], config.map.center[1]);
    println!("zoom = {}", config.map.zoom);
    println!();

    println!("[map.marker_colors]");
    for (kind, color) in &config.map.marker_colors {
        println!("{} = \"{}\"", kind, color);
    }
}
