//! Overpass query construction
//!
//! Each category has a fixed set of clauses listing the tags diagnostic of
//! it. Without a category the smaller combined set is used; it is a
//! representative subset rather than the union, which keeps the query cheap.

use crate::constants::api::OVERPASS_QUERY_TIMEOUT_SECS;
use crate::coord::BoundingBox;
use crate::location::Category;
use std::fmt;

/// OSM element kind a clause matches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Node,
    Way,
    Relation,
}

impl ElementKind {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Node => "node",
            Self::Way => "way",
            Self::Relation => "relation",
        }
    }
}

/// A single `kind["key"="value"](bbox);` statement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clause {
    pub kind: ElementKind,
    pub key: &'static str,
    /// `None` matches any value of `key`
    pub value: Option<&'static str>,
}

const fn node(key: &'static str, value: &'static str) -> Clause {
    Clause { kind: ElementKind::Node, key, value: Some(value) }
}

const fn way(key: &'static str, value: &'static str) -> Clause {
    Clause { kind: ElementKind::Way, key, value: Some(value) }
}

const fn relation(key: &'static str, value: &'static str) -> Clause {
    Clause { kind: ElementKind::Relation, key, value: Some(value) }
}

const fn node_any(key: &'static str) -> Clause {
    Clause { kind: ElementKind::Node, key, value: None }
}

const fn way_any(key: &'static str) -> Clause {
    Clause { kind: ElementKind::Way, key, value: None }
}

const PARK_CLAUSES: &[Clause] = &[
    way("leisure", "park"),
    relation("leisure", "park"),
    way("leisure", "garden"),
    way("leisure", "playground"),
    node("leisure", "playground"),
    way("leisure", "sports_centre"),
    node("leisure", "sports_centre"),
    way("landuse", "recreation_ground"),
];

const LANDMARK_CLAUSES: &[Clause] = &[
    node("tourism", "attraction"),
    node_any("historic"),
    way("tourism", "attraction"),
    way_any("historic"),
    node("amenity", "place_of_worship"),
    way("amenity", "place_of_worship"),
    node("tourism", "museum"),
    way("tourism", "museum"),
];

const INFRASTRUCTURE_CLAUSES: &[Clause] = &[
    way("highway", "motorway"),
    way("highway", "trunk"),
    way("railway", "rail"),
    node("railway", "station"),
    way("man_made", "bridge"),
    node("man_made", "bridge"),
    way("aeroway", "aerodrome"),
    node("aeroway", "aerodrome"),
    node("amenity", "hospital"),
    way("amenity", "hospital"),
    node("amenity", "school"),
    way("amenity", "school"),
    node("amenity", "university"),
    way("amenity", "university"),
    node("office", "government"),
    way("office", "government"),
];

const COMBINED_CLAUSES: &[Clause] = &[
    way("leisure", "park"),
    way("leisure", "garden"),
    way("leisure", "playground"),
    node("tourism", "attraction"),
    node_any("historic"),
    way("tourism", "attraction"),
    node("amenity", "place_of_worship"),
    way("highway", "motorway"),
    way("man_made", "bridge"),
    node("railway", "station"),
    node("amenity", "hospital"),
    node("amenity", "school"),
];

/// Clause set for a category, or the combined set when none is given
pub fn clauses_for(category: Option<Category>) -> &'static [Clause] {
    match category {
        Some(Category::Park) => PARK_CLAUSES,
        Some(Category::Landmark) => LANDMARK_CLAUSES,
        Some(Category::Infrastructure) => INFRASTRUCTURE_CLAUSES,
        None => COMBINED_CLAUSES,
    }
}

/// A ready-to-send Overpass QL query
#[derive(Debug, Clone, PartialEq)]
pub struct OverpassQuery {
    bounds: BoundingBox,
    clauses: &'static [Clause],
}

impl OverpassQuery {
    /// Build a query for the given viewport and optional category
    pub fn new(bounds: BoundingBox, category: Option<Category>) -> Self {
        Self {
            bounds,
            clauses: clauses_for(category),
        }
    }

    /// Build a query from a raw type token
    ///
    /// Unknown tokens fall back to the combined clause set.
    pub fn from_token(bounds: BoundingBox, token: Option<&str>) -> Self {
        Self::new(bounds, token.and_then(|t| t.parse().ok()))
    }

    pub fn clauses(&self) -> &'static [Clause] {
        self.clauses
    }
}

impl fmt::Display for OverpassQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bbox = self.bounds.overpass_filter();

        writeln!(f, "[out:json][timeout:{}];", OVERPASS_QUERY_TIMEOUT_SECS)?;
        writeln!(f, "(")?;
        for clause in self.clauses {
            match clause.value {
                Some(value) => writeln!(
                    f,
                    "  {}[\"{}\"=\"{}\"]({});",
                    clause.kind.as_str(),
                    clause.key,
                    value,
                    bbox
                )?,
                None => writeln!(f, "  {}[\"{}\"]({});", clause.kind.as_str(), clause.key, bbox)?,
            }
        }
        writeln!(f, ");")?;
        write!(f, "out center;")
    }
}
