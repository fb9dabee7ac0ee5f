use std::env;

use crate::Status;

/// Secrets and connection strings required at process start.
#[derive(Clone, Debug)]
pub struct Keys {
    pub steam_api_key: String,
    pub twitch_client_id: String,
    pub twitch_client_secret: String,
    pub redis_url: String,
}

impl Keys {
    pub fn from_env() -> Result<Keys, Status> {
        Ok(Keys {
            steam_api_key: require("STEAM_API_KEY")?,
            twitch_client_id: require("TWITCH_CLIENT_ID")?,
            twitch_client_secret: require("TWITCH_CLIENT_SECRET")?,
            redis_url: require("REDIS_URL")?,
        })
    }
}

fn require(name: &str) -> Result<String, Status> {
    env::var(name).map_err(|_| Status::internal(format!("Environment variable {name} is not set.")))
}
