//! GPX output formatter

use crate::error::Result;
use crate::format::OutputFormatter;
use crate::location::Location;

/// GPX formatter - outputs GPX waypoint file
pub struct GpxFormatter;

/// Escape text for XML element content and attributes
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

impl OutputFormatter for GpxFormatter {
    fn name(&self) -> &str {
        "gpx"
    }

    fn description(&self) -> &str {
        "GPX waypoint file"
    }

    fn format(&self, locations: &[Location]) -> Result<String> {
        let mut gpx = String::new();

        gpx.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        gpx.push('\n');
        gpx.push_str(r#"<gpx version="1.1" creator="poi-gateway">"#);
        gpx.push('\n');

        gpx.push_str("  <metadata>\n");
        gpx.push_str(&format!("    <name>{} locations</name>\n", locations.len()));
        gpx.push_str(&format!(
            "    <time>{}</time>\n",
            chrono::Utc::now().to_rfc3339()
        ));
        gpx.push_str("  </metadata>\n");

        for loc in locations {
            gpx.push_str(&format!(r#"  <wpt lat="{}" lon="{}">"#, loc.lat, loc.lng));
            gpx.push('\n');
            gpx.push_str(&format!("    <name>{}</name>\n", escape(&loc.name)));
            gpx.push_str(&format!("    <desc>{}</desc>\n", escape(&loc.description)));
            gpx.push_str(&format!("    <sym>{}</sym>\n", loc.category));
            gpx.push_str("  </wpt>\n");
        }

        gpx.push_str("</gpx>\n");
        Ok(gpx)
    }
}
