//! Human-readable text output formatter

use crate::error::Result;
use crate::format::OutputFormatter;
use crate::location::Location;

/// Text formatter - one line per location
pub struct TextFormatter;

impl OutputFormatter for TextFormatter {
    fn name(&self) -> &str {
        "text"
    }

    fn description(&self) -> &str {
        "Human-readable text"
    }

    fn format(&self, locations: &[Location]) -> Result<String> {
        let mut output = format!("{} location(s)\n", locations.len());

        for loc in locations {
            output.push_str(&format!(
                "  [{}] {} ({:.6}, {:.6}) {}: {}\n",
                loc.id, loc.name, loc.lat, loc.lng, loc.category, loc.description
            ));
        }

        Ok(output)
    }
}
