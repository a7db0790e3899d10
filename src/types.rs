use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::errors::NetworkError;

/// One check-in row from a Foursquare-style dataset. Columns beyond the
/// three used here (category names, coordinates, timestamps) are ignored
/// when deserializing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CheckIn {
    #[serde(rename = "userId")]
    pub user_id: u64,
    #[serde(rename = "venueId")]
    pub venue_id: String,
    #[serde(rename = "venueCategoryId")]
    pub venue_category_id: String,
}

/// Edge criterion for the interaction network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NetworkType {
    /// Two users interact when they have checked in at the same venue.
    Colocation,
    /// Two users interact when they have checked in at venues of the
    /// same category.
    Taste,
}

impl NetworkType {
    /// The profile key of a check-in under this criterion.
    pub(crate) fn key<'a>(&self, record: &'a CheckIn) -> &'a str {
        match self {
            NetworkType::Colocation => &record.venue_id,
            NetworkType::Taste => &record.venue_category_id,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NetworkType::Colocation => "colocation",
            NetworkType::Taste => "taste",
        }
    }
}

impl FromStr for NetworkType {
    type Err = NetworkError;

    fn from_str(selector: &str) -> Result<Self, Self::Err> {
        match selector {
            "colocation" => Ok(NetworkType::Colocation),
            "taste" => Ok(NetworkType::Taste),
            other => Err(NetworkError::InvalidNetworkType(other.to_owned())),
        }
    }
}

impl fmt::Display for NetworkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Undirected user pair, stored with `source <= target` so that both
/// discovery orders collapse onto the same key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InteractionEdge {
    pub source: u64,
    pub target: u64,
}

impl InteractionEdge {
    pub fn new(a: u64, b: u64) -> Self {
        if a <= b {
            InteractionEdge { source: a, target: b }
        } else {
            InteractionEdge { source: b, target: a }
        }
    }
}

/// One row of a similarity ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityRow {
    pub user: u64,
    pub overlap_count: u32,
    /// Overlap relative to the top-ranked row, rounded to two decimals.
    pub percentage_overlap: f64,
}
