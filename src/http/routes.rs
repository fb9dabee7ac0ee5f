use crate::api::{IgdbApi, SteamApi};
use std::sync::Arc;
use tracing::warn;
use warp::{self, Filter};

use super::{handlers, models};

/// Returns a Filter with all available routes.
pub fn routes(
    steam: Arc<SteamApi>,
    igdb: Arc<IgdbApi>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    home()
        .or(post_steam_games(steam))
        .or(post_igdb_games(igdb))
        .or_else(|e| async {
            warn! {"Rejected route: {:?}", e};
            Err(e)
        })
}

/// GET /
fn home() -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path!().and(warp::get()).and_then(handlers::welcome)
}

/// POST /steam/games
fn post_steam_games(
    steam: Arc<SteamApi>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path!("steam" / "games")
        .and(warp::post())
        .and(json_body::<models::GetGames>())
        .and(with_steam(steam))
        .and_then(handlers::post_steam_games)
}

/// POST /igdb/games
fn post_igdb_games(
    igdb: Arc<IgdbApi>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path!("igdb" / "games")
        .and(warp::post())
        .and(json_body::<models::MetadataSearch>())
        .and(with_igdb(igdb))
        .and_then(handlers::post_igdb_games)
}

fn with_steam(
    steam: Arc<SteamApi>,
) -> impl Filter<Extract = (Arc<SteamApi>,), Error = std::convert::Infallible> + Clone {
    warp::any().map(move || Arc::clone(&steam))
}

fn with_igdb(
    igdb: Arc<IgdbApi>,
) -> impl Filter<Extract = (Arc<IgdbApi>,), Error = std::convert::Infallible> + Clone {
    warp::any().map(move || Arc::clone(&igdb))
}

fn json_body<T: serde::de::DeserializeOwned + Send>(
) -> impl Filter<Extract = (T,), Error = warp::Rejection> + Clone {
    warp::body::content_length_limit(16 * 1024).and(warp::body::json())
}
