//! JSON output formatter

use crate::error::Result;
use crate::format::OutputFormatter;
use crate::location::Location;

/// JSON formatter - outputs the locations as a pretty-printed array
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Location array as JSON"
    }

    fn format(&self, locations: &[Location]) -> Result<String> {
        Ok(serde_json::to_string_pretty(locations)?)
    }
}
