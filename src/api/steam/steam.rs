use crate::{documents::OwnedGame, traits::Storefront, Status};
use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

pub struct SteamApi {
    steam_key: String,
}

impl SteamApi {
    pub fn new(steam_key: &str) -> SteamApi {
        SteamApi {
            steam_key: String::from(steam_key),
        }
    }
}

#[async_trait]
impl Storefront for SteamApi {
    /// Resolves a community profile URL to a SteamID by matching the id
    /// embedded in the profile page JSON.
    #[instrument(level = "trace", skip(self))]
    async fn resolve_user(&self, profile_url: &str) -> Result<String, Status> {
        lazy_static! {
            static ref STEAM_ID_RE: Regex = Regex::new(r#""steamid":"(\d+)""#).unwrap();
        }

        let text = reqwest::get(profile_url).await?.text().await?;
        match STEAM_ID_RE.captures(&text) {
            Some(captures) => Ok(captures[1].to_owned()),
            None => Err(Status::not_found(format!(
                "SteamID was not found in profile page '{profile_url}'."
            ))),
        }
    }

    #[instrument(level = "trace", skip(self))]
    async fn get_owned_games(&self, user_id: &str) -> Result<Vec<OwnedGame>, Status> {
        let uri = format!(
            "{STEAM_HOST}{STEAM_GETOWNEDGAMES_SERVICE}?key={}&steamid={user_id}&include_appinfo=true&format=json",
            self.steam_key,
        );

        let resp = reqwest::get(&uri).await?.json::<SteamResponse>().await?;
        info! {
            "steam games: {}", resp.response.game_count
        }

        // Private profiles and empty libraries come back as an empty
        // `response` object.
        Ok(resp.response.games)
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct SteamResponse {
    #[serde(default)]
    response: GetOwnedGamesResponse,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct GetOwnedGamesResponse {
    #[serde(default)]
    game_count: i32,

    #[serde(default)]
    games: Vec<OwnedGame>,
}

const STEAM_HOST: &str = "http://api.steampowered.com";
const STEAM_GETOWNEDGAMES_SERVICE: &str = "/IPlayerService/GetOwnedGames/v0001/";
