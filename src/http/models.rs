use serde::{Deserialize, Serialize};

/// Request for a user's owned games. `username` is the full community
/// profile URL.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct GetGames {
    pub username: String,
}

impl std::fmt::Display for GetGames {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.username)
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct MetadataSearch {
    #[serde(rename = "gameName")]
    pub game_name: String,
}

impl std::fmt::Display for MetadataSearch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.game_name)
    }
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct GamesResponse<T: serde::Serialize> {
    pub games: Vec<T>,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
