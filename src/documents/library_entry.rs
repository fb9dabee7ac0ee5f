use serde::{Deserialize, Serialize};

use super::{GameMetadata, OwnedGame};

/// An owned game merged with the outcome of its metadata lookup.
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq)]
pub struct LibraryEntry {
    #[serde(flatten)]
    pub game: OwnedGame,

    #[serde(default)]
    pub metadata: MetadataOutcome,
}

/// Result of a single enrichment attempt. Distinguishes "the catalog had no
/// data" from "the lookup failed" so diagnostics survive the merge.
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum MetadataOutcome {
    Matched(GameMetadata),

    #[default]
    Unmatched,

    Failed(String),
}

impl MetadataOutcome {
    pub fn record(&self) -> Option<&GameMetadata> {
        match self {
            MetadataOutcome::Matched(record) => Some(record),
            _ => None,
        }
    }
}
