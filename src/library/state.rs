use serde::Serialize;

/// Aggregation progress published to observers.
///
/// Transitions: `Idle` → `FetchingLibrary` → `Enriching` → `Settled` or
/// `Failed`. A storefront failure aborts the run with `Failed`; per-game
/// metadata failures do not, they surface in the entries themselves.
#[derive(Serialize, Default, Debug, Clone, PartialEq)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LibraryState {
    #[default]
    Idle,

    FetchingLibrary,

    Enriching {
        completed: usize,
        total: usize,
    },

    Settled {
        total: usize,
    },

    Failed {
        error: String,
    },
}
