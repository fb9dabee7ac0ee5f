use clap::Parser;
use std::{env, sync::Arc};
use steamtime_backend::{
    api::{CacheApi, IgdbApi, SteamApi},
    http, util, Status, Tracing,
};
use tracing::info;
use warp::{self, Filter};

#[derive(Parser)]
struct Opts {
    /// Port number to use for listening to HTTP requests.
    #[clap(short, long, default_value = "8080")]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<(), Status> {
    let opts: Opts = Opts::parse();

    Tracing::setup("steamtime-http-server")?;

    // Let ENV VAR override flag.
    let port: u16 = match env::var("PORT") {
        Ok(port) => match port.parse::<u16>() {
            Ok(port) => port,
            Err(_) => opts.port,
        },
        Err(_) => opts.port,
    };

    let keys = util::keys::Keys::from_env()?;
    let cache = CacheApi::connect(&keys.redis_url).await?;

    let steam = Arc::new(SteamApi::new(&keys.steam_api_key));
    let igdb = Arc::new(IgdbApi::new(
        &keys.twitch_client_id,
        &keys.twitch_client_secret,
        Arc::new(cache),
    ));

    info!("http server started");

    warp::serve(http::routes::routes(steam, igdb).with(
        warp::cors()
            .allow_methods(vec!["GET", "POST"])
            .allow_headers(vec!["Content-Type", "Authorization"])
            .allow_any_origin(),
    ))
    .run(([0, 0, 0, 0], port))
    .await;

    Ok(())
}
