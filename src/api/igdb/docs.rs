use serde::{Deserialize, Serialize};

use crate::documents::GameMetadata;

#[derive(Serialize, Deserialize, Default, Debug, Clone)]
pub struct IgdbGame {
    #[serde(default)]
    pub id: u64,

    pub name: String,

    #[serde(default)]
    pub summary: String,

    #[serde(default)]
    pub total_rating: Option<f64>,

    #[serde(default)]
    pub first_release_date: Option<i64>,

    #[serde(default)]
    pub parent_game: Option<IgdbParentGame>,
}

impl IgdbGame {
    /// Titles this game is also known by, i.e. its parent title when the
    /// search hit is an edition or remaster of another entry.
    pub fn parent_titles(&self) -> impl Iterator<Item = &str> {
        self.parent_game.iter().map(|parent| parent.name.as_str())
    }
}

#[derive(Serialize, Deserialize, Default, Debug, Clone)]
pub struct IgdbParentGame {
    pub name: String,
}

impl From<IgdbGame> for GameMetadata {
    fn from(igdb_game: IgdbGame) -> Self {
        GameMetadata {
            name: igdb_game.name,
            summary: igdb_game.summary,
            total_rating: igdb_game.total_rating,
            first_release_date: igdb_game.first_release_date,
        }
    }
}
