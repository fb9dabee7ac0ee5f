use crate::{
    api::{IgdbApi, SteamApi},
    http::models,
    traits::Storefront,
    Status,
};
use std::{convert::Infallible, sync::Arc};
use tracing::{info, instrument};
use warp::http::StatusCode;

#[instrument(level = "trace")]
pub async fn welcome() -> Result<impl warp::Reply, Infallible> {
    info!("welcome");
    Ok("welcome")
}

#[instrument(level = "trace", skip_all, fields(profile = %get_games))]
pub async fn post_steam_games(
    get_games: models::GetGames,
    steam: Arc<SteamApi>,
) -> Result<Box<dyn warp::Reply>, Infallible> {
    let profile_url = get_games.username.trim();
    if profile_url.is_empty() || !profile_url.starts_with("http") {
        return Ok(error_reply(Status::invalid_argument(
            "A full Steam profile URL is required.",
        )));
    }

    let games = match steam.resolve_user(profile_url).await {
        Ok(steam_id) => steam.get_owned_games(&steam_id).await,
        Err(status) => Err(status),
    };

    match games {
        Ok(games) => Ok(Box::new(warp::reply::json(&models::GamesResponse {
            games,
        }))),
        Err(status) => Ok(error_reply(status)),
    }
}

#[instrument(level = "trace", skip_all, fields(title = %search))]
pub async fn post_igdb_games(
    search: models::MetadataSearch,
    igdb: Arc<IgdbApi>,
) -> Result<Box<dyn warp::Reply>, Infallible> {
    if search.game_name.trim().is_empty() {
        return Ok(error_reply(Status::invalid_argument(
            "Game name is required.",
        )));
    }

    match igdb.match_title(&search.game_name).await {
        Ok(record) => Ok(Box::new(warp::reply::json(&models::GamesResponse {
            games: record.into_iter().collect::<Vec<_>>(),
        }))),
        Err(status) => Ok(error_reply(status)),
    }
}

fn error_reply(status: Status) -> Box<dyn warp::Reply> {
    let code = match &status {
        Status::InvalidArgument(_) => StatusCode::BAD_REQUEST,
        Status::NotFound(_) => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    Box::new(warp::reply::with_status(
        warp::reply::json(&models::ErrorResponse {
            error: status.to_string(),
        }),
        code,
    ))
}

#[cfg(test)]
mod tests {
    use std::{collections::HashMap, sync::Mutex};

    use async_trait::async_trait;
    use warp::Filter;

    use super::*;
    use crate::{http::routes::routes, traits::KeyValueStore};

    #[derive(Default)]
    struct FakeStore {
        entries: Mutex<HashMap<String, String>>,
    }

    #[async_trait]
    impl KeyValueStore for FakeStore {
        async fn get(&self, key: &str) -> Result<Option<String>, Status> {
            Ok(self.entries.lock().unwrap().get(key).cloned())
        }

        async fn set_ex(&self, key: &str, value: &str, _ttl_secs: u64) -> Result<(), Status> {
            self.entries
                .lock()
                .unwrap()
                .insert(key.to_owned(), value.to_owned());
            Ok(())
        }
    }

    fn test_routes(
        store: FakeStore,
    ) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
        let steam = Arc::new(SteamApi::new("steam-key"));
        let igdb = Arc::new(IgdbApi::new("client", "secret", Arc::new(store)));
        routes(steam, igdb)
    }

    fn error_of(body: &[u8]) -> String {
        let body: serde_json::Value = serde_json::from_slice(body).unwrap();
        body["error"].as_str().unwrap().to_owned()
    }

    #[tokio::test]
    async fn missing_profile_url_is_bad_request() {
        let resp = warp::test::request()
            .method("POST")
            .path("/steam/games")
            .json(&serde_json::json!({ "username": "" }))
            .reply(&test_routes(FakeStore::default()))
            .await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(error_of(resp.body()).contains("profile URL"));
    }

    #[tokio::test]
    async fn unresolved_profile_is_not_found() {
        // A page without an embedded steamid.
        let route = warp::get().map(|| "<html><body>not a profile</body></html>");
        let (addr, server) = warp::serve(route).bind_ephemeral(([127, 0, 0, 1], 0));
        tokio::spawn(server);

        let resp = warp::test::request()
            .method("POST")
            .path("/steam/games")
            .json(&serde_json::json!({ "username": format!("http://{addr}/") }))
            .reply(&test_routes(FakeStore::default()))
            .await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert!(error_of(resp.body()).contains("SteamID"));
    }

    #[tokio::test]
    async fn empty_game_name_is_bad_request() {
        let resp = warp::test::request()
            .method("POST")
            .path("/igdb/games")
            .json(&serde_json::json!({ "gameName": "   " }))
            .reply(&test_routes(FakeStore::default()))
            .await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(error_of(resp.body()).contains("Game name"));
    }

    #[tokio::test]
    async fn cached_search_returns_games_payload() {
        let store = FakeStore::default();
        store.entries.lock().unwrap().insert(
            "igdb_game_search:portal".to_owned(),
            r#"[{"name": "Portal"}]"#.to_owned(),
        );

        let resp = warp::test::request()
            .method("POST")
            .path("/igdb/games")
            .json(&serde_json::json!({ "gameName": "Portal" }))
            .reply(&test_routes(store))
            .await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = serde_json::from_slice(resp.body()).unwrap();
        assert_eq!(body["games"][0]["name"], "Portal");
    }
}
