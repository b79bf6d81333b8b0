//! Feature classification
//!
//! Turns a raw tagged element into a [`Location`]. Category assignment walks
//! an ordered rule table and the first match wins; tag families overlap (a
//! place of worship may also be `historic`), so table order is significant.
//! Elements no rule matches become generic landmarks, so every element with
//! coordinates gets exactly one category.

use crate::location::{Category, Location};
use crate::overpass::RawFeature;
use std::collections::BTreeMap;

/// One classification rule
struct Rule {
    category: Category,
    matches: fn(&RawFeature) -> bool,
    describe: fn(&RawFeature) -> String,
}

/// Tag -> property name copied onto every location
const PROPERTY_TAGS: &[(&str, &str)] = &[
    ("addr:city", "city"),
    ("addr:street", "street"),
    ("website", "website"),
    ("opening_hours", "hours"),
];

const PARK_LEISURE: &[&str] = &["park", "garden", "playground", "sports_centre"];
const PUBLIC_AMENITY: &[&str] = &["hospital", "school", "university"];
const INFRASTRUCTURE_KEYS: &[&str] = &["highway", "railway", "man_made", "aeroway"];

const RULES: &[Rule] = &[
    Rule {
        category: Category::Park,
        matches: |f| tag_in(f, "leisure", PARK_LEISURE),
        describe: |f| humanize(f.tag("leisure").unwrap_or("park")),
    },
    Rule {
        category: Category::Park,
        matches: |f| f.tag("landuse") == Some("recreation_ground"),
        describe: |_| "Recreation Ground".to_string(),
    },
    Rule {
        category: Category::Landmark,
        matches: |f| f.tag("tourism").is_some() || f.tag("historic").is_some(),
        describe: describe_landmark,
    },
    Rule {
        category: Category::Landmark,
        matches: |f| f.tag("amenity") == Some("place_of_worship"),
        describe: |f| {
            f.tag("religion")
                .map(title_case)
                .unwrap_or_else(|| "Place of worship".to_string())
        },
    },
    Rule {
        category: Category::Infrastructure,
        matches: |f| INFRASTRUCTURE_KEYS.iter().any(|key| f.tag(key).is_some()),
        describe: describe_infrastructure,
    },
    Rule {
        category: Category::Infrastructure,
        matches: |f| tag_in(f, "amenity", PUBLIC_AMENITY),
        describe: |f| title_case(f.tag("amenity").unwrap_or("Building")),
    },
    Rule {
        category: Category::Infrastructure,
        matches: |f| f.tag("office") == Some("government"),
        describe: |_| "Government Office".to_string(),
    },
];

fn tag_in(feature: &RawFeature, key: &str, values: &[&str]) -> bool {
    feature.tag(key).is_some_and(|v| values.contains(&v))
}

fn describe_landmark(feature: &RawFeature) -> String {
    match (feature.tag("tourism"), feature.tag("historic")) {
        (Some(tourism), _) => humanize(tourism),
        (None, Some(historic)) => humanize(historic),
        (None, None) => "Attraction".to_string(),
    }
}

fn describe_infrastructure(feature: &RawFeature) -> String {
    if let Some(highway) = feature.tag("highway") {
        humanize(highway)
    } else if let Some(railway) = feature.tag("railway") {
        // "station" renders as "Station Station"; clients match on it
        if railway == "station" {
            format!("{} Station", title_case(railway))
        } else {
            "Railway".to_string()
        }
    } else if let Some(aeroway) = feature.tag("aeroway") {
        if aeroway == "aerodrome" {
            "Airport".to_string()
        } else {
            "Aeroway".to_string()
        }
    } else {
        humanize(feature.tag("man_made").unwrap_or("Infrastructure"))
    }
}

/// Upper-case the first letter of every cased run, lower-case the rest
///
/// Only cased letters continue a word, so digits, punctuation and uncased
/// scripts all start a new one: `sports_centre` -> `Sports_Centre`,
/// `3rd` -> `3Rd`, `東京abc` -> `東京Abc`.
pub fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut in_word = false;

    for c in value.chars() {
        if c.is_lowercase() || c.is_uppercase() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }

    out
}

/// Title-case and turn underscores into spaces
fn humanize(value: &str) -> String {
    title_case(value).replace('_', " ")
}

/// Pick the category and description for a feature
pub fn categorize(feature: &RawFeature) -> (Category, String) {
    RULES
        .iter()
        .find(|rule| (rule.matches)(feature))
        .map(|rule| (rule.category, (rule.describe)(feature)))
        // no rule matched
        .unwrap_or_else(|| (Category::Landmark, "Point of interest".to_string()))
}

/// Copy the whitelisted tags into a property map
pub fn extract_properties(feature: &RawFeature) -> BTreeMap<String, String> {
    PROPERTY_TAGS
        .iter()
        .filter_map(|(tag, prop)| feature.tag(tag).map(|v| (prop.to_string(), v.to_string())))
        .collect()
}

/// Classify one raw element
///
/// `position` is the element's 0-based index in the response; it names
/// unnamed features (`Location {position + 1}`) and stands in for a missing
/// id. Elements without any coordinates yield `None`.
pub fn classify(feature: &RawFeature, position: usize) -> Option<Location> {
    let (lat, lng) = feature.coordinates()?;

    let name = feature
        .tag("name")
        .map(str::to_string)
        .unwrap_or_else(|| format!("Location {}", position + 1));

    let (category, description) = categorize(feature);

    Some(Location {
        id: feature.id.unwrap_or(position as i64),
        name,
        category,
        lat,
        lng,
        description,
        properties: extract_properties(feature),
    })
}
