use serde::{Deserialize, Serialize};

/// A title present in a user's Steam ownership record. Field names follow the
/// GetOwnedGames payload verbatim.
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq)]
pub struct OwnedGame {
    pub appid: u64,
    pub name: String,

    /// Total lifetime playtime in minutes.
    #[serde(default)]
    pub playtime_forever: u32,

    /// Last played timestamp in epoch seconds. Absent for games never
    /// launched.
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rtime_last_played: Option<i64>,
}
