use serde::{Deserialize, Serialize};

/// Catalog metadata describing a title, as selected from IGDB search results.
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq)]
pub struct GameMetadata {
    pub name: String,

    #[serde(default)]
    #[serde(skip_serializing_if = "String::is_empty")]
    pub summary: String,

    /// Aggregate rating in the 0-100 range.
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_rating: Option<f64>,

    /// First release timestamp in epoch seconds.
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_release_date: Option<i64>,
}
