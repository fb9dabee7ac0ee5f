use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::{
    documents::GameMetadata,
    traits::{KeyValueStore, MetadataProvider},
    Status,
};

use super::{
    backend::{post, GAMES_ENDPOINT},
    matching::{best_match, normalize_title},
    IgdbConnection, IgdbGame,
};

#[derive(Clone)]
pub struct IgdbApi {
    client_id: String,
    secret: String,
    cache: Arc<dyn KeyValueStore>,
    oauth_url: String,
}

impl IgdbApi {
    pub fn new(client_id: &str, secret: &str, cache: Arc<dyn KeyValueStore>) -> IgdbApi {
        IgdbApi {
            client_id: String::from(client_id),
            secret: String::from(secret),
            cache,
            oauth_url: String::from(TWITCH_OAUTH_URL),
        }
    }

    /// Returns an authenticated IGDB connection.
    ///
    /// The bearer token is shared across server instances through the cache
    /// and reused until its provider-declared expiry. On a miss a fresh token
    /// is requested with a client-credentials exchange; any non-success
    /// response from the identity provider is a hard failure.
    async fn connection(&self) -> Result<IgdbConnection, Status> {
        if let Some(token) = self.cache.get(TOKEN_KEY).await? {
            return Ok(IgdbConnection {
                client_id: self.client_id.clone(),
                oauth_token: token,
            });
        }

        let uri = format!(
            "{}?client_id={}&client_secret={}&grant_type=client_credentials",
            self.oauth_url, self.client_id, self.secret
        );

        let resp = reqwest::Client::new().post(&uri).send().await?;
        if !resp.status().is_success() {
            let text = resp.text().await?;
            return Err(Status::internal(format!(
                "Failed to obtain IGDB token: {text}"
            )));
        }

        let resp = resp.json::<TwitchOAuthResponse>().await?;
        self.cache
            .set_ex(TOKEN_KEY, &resp.access_token, resp.expires_in)
            .await?;

        Ok(IgdbConnection {
            client_id: self.client_id.clone(),
            oauth_token: resp.access_token,
        })
    }

    /// Searches IGDB for `title` and returns the best matching record.
    ///
    /// Search results are cached under the normalized title, including empty
    /// results, so repeated lookups within the TTL never reach IGDB.
    #[instrument(level = "trace", skip(self))]
    pub async fn match_title(&self, title: &str) -> Result<Option<GameMetadata>, Status> {
        let normalized = normalize_title(title);
        if normalized.is_empty() {
            return Err(Status::invalid_argument("Game title is empty."));
        }

        let cache_key = format!("{SEARCH_KEY_PREFIX}{normalized}");
        if let Some(cached) = self.cache.get(&cache_key).await? {
            let games: Vec<GameMetadata> = serde_json::from_str(&cached)?;
            return Ok(games.into_iter().next());
        }

        let connection = self.connection().await?;
        let query = format!(
            "fields name, summary, total_rating, first_release_date, parent_game.name; search \"{}\"; limit {SEARCH_CANDIDATE_LIMIT};",
            normalized.replace('"', ""),
        );
        let candidates: Vec<IgdbGame> = post(&connection, GAMES_ENDPOINT, &query).await?;
        info!(
            "igdb search '{normalized}' returned {} candidates",
            candidates.len()
        );

        let selected = best_match(&normalized, candidates).map(GameMetadata::from);
        let records: Vec<&GameMetadata> = selected.iter().collect();
        self.cache
            .set_ex(
                &cache_key,
                &serde_json::to_string(&records)?,
                SEARCH_CACHE_TTL_SECS,
            )
            .await?;

        Ok(selected)
    }
}

#[async_trait]
impl MetadataProvider for IgdbApi {
    async fn match_title(&self, title: &str) -> Result<Option<GameMetadata>, Status> {
        IgdbApi::match_title(self, title).await
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct TwitchOAuthResponse {
    access_token: String,

    /// Token lifetime in seconds. Negative values are rejected at parse time.
    expires_in: u64,
}

pub const TWITCH_OAUTH_URL: &str = "https://id.twitch.tv/oauth2/token";

const TOKEN_KEY: &str = "igdb:access-token";
const SEARCH_KEY_PREFIX: &str = "igdb_game_search:";
const SEARCH_CANDIDATE_LIMIT: usize = 5;
const SEARCH_CACHE_TTL_SECS: u64 = 30600;

#[cfg(test)]
mod tests {
    use std::{collections::HashMap, sync::Mutex};

    use warp::Filter;

    use super::*;

    #[derive(Default)]
    struct FakeStore {
        entries: Mutex<HashMap<String, String>>,
        writes: Mutex<Vec<(String, String, u64)>>,
    }

    impl FakeStore {
        fn with_entry(key: &str, value: &str) -> Arc<Self> {
            let store = FakeStore::default();
            store
                .entries
                .lock()
                .unwrap()
                .insert(key.to_owned(), value.to_owned());
            Arc::new(store)
        }
    }

    #[async_trait]
    impl KeyValueStore for FakeStore {
        async fn get(&self, key: &str) -> Result<Option<String>, Status> {
            Ok(self.entries.lock().unwrap().get(key).cloned())
        }

        async fn set_ex(&self, key: &str, value: &str, ttl_secs: u64) -> Result<(), Status> {
            self.entries
                .lock()
                .unwrap()
                .insert(key.to_owned(), value.to_owned());
            self.writes
                .lock()
                .unwrap()
                .push((key.to_owned(), value.to_owned(), ttl_secs));
            Ok(())
        }
    }

    fn igdb_with(store: Arc<FakeStore>, oauth_url: &str) -> IgdbApi {
        IgdbApi {
            client_id: "client".to_owned(),
            secret: "secret".to_owned(),
            cache: store,
            oauth_url: oauth_url.to_owned(),
        }
    }

    #[tokio::test]
    async fn cached_token_skips_the_identity_provider() {
        let store = FakeStore::with_entry(TOKEN_KEY, "token-abc");
        // The OAuth URL is unreachable; a cache hit must never touch it.
        let igdb = igdb_with(Arc::clone(&store), "http://127.0.0.1:9");

        let connection = igdb.connection().await.unwrap();

        assert_eq!(connection.oauth_token, "token-abc");
        assert!(store.writes.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn token_miss_exchanges_and_stores_with_declared_expiry() {
        let route = warp::post().map(|| {
            warp::reply::json(&TwitchOAuthResponse {
                access_token: "fresh-token".to_owned(),
                expires_in: 4765,
            })
        });
        let (addr, server) = warp::serve(route).bind_ephemeral(([127, 0, 0, 1], 0));
        tokio::spawn(server);

        let store = Arc::new(FakeStore::default());
        let igdb = igdb_with(Arc::clone(&store), &format!("http://{addr}"));

        let connection = igdb.connection().await.unwrap();

        assert_eq!(connection.oauth_token, "fresh-token");
        assert_eq!(
            *store.writes.lock().unwrap(),
            vec![(TOKEN_KEY.to_owned(), "fresh-token".to_owned(), 4765)]
        );
    }

    #[tokio::test]
    async fn identity_provider_rejection_is_a_hard_failure() {
        let route = warp::post().map(|| {
            warp::reply::with_status("denied", warp::http::StatusCode::FORBIDDEN)
        });
        let (addr, server) = warp::serve(route).bind_ephemeral(([127, 0, 0, 1], 0));
        tokio::spawn(server);

        let store = Arc::new(FakeStore::default());
        let igdb = igdb_with(Arc::clone(&store), &format!("http://{addr}"));

        let result = igdb.connection().await;

        assert!(matches!(result, Err(Status::Internal(_))));
        assert!(store.writes.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn cached_search_skips_igdb_and_the_identity_provider() {
        let store = FakeStore::with_entry("igdb_game_search:portal", r#"[{"name": "Portal"}]"#);
        let igdb = igdb_with(Arc::clone(&store), "http://127.0.0.1:9");

        let record = igdb.match_title("Portal™").await.unwrap().unwrap();

        assert_eq!(record.name, "Portal");
        assert!(store.writes.lock().unwrap().is_empty());
    }
}
