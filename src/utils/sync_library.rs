use chrono::DateTime;
use clap::Parser;
use std::{sync::Arc, time::Duration};
use steamtime_backend::{
    api::{CacheApi, IgdbApi, SteamApi},
    documents::MetadataOutcome,
    library::{
        view::{filter_and_sort, Direction, SortKey},
        EnrichConfig, LibraryAggregator, LibraryState,
    },
    util, Status, Tracing,
};

/// Fetches a Steam library, enriches it with IGDB metadata and prints the
/// merged result.
#[derive(Parser)]
struct Opts {
    /// Full Steam community profile URL, e.g.
    /// https://steamcommunity.com/id/gordon
    #[clap(long)]
    profile_url: String,

    /// Number of games enriched concurrently per batch.
    #[clap(long, default_value = "15")]
    batch_size: usize,

    /// Pause between enrichment batches, in seconds.
    #[clap(long, default_value = "3")]
    batch_delay_secs: u64,

    /// Substring filter applied to game names.
    #[clap(long, default_value = "")]
    filter: String,

    /// Sort key: name, playtime, rating, release-date or last-played.
    #[clap(long, default_value = "name")]
    sort: SortKey,

    #[clap(long)]
    descending: bool,
}

#[tokio::main]
async fn main() -> Result<(), Status> {
    let opts: Opts = Opts::parse();

    Tracing::setup("sync-library")?;

    let keys = util::keys::Keys::from_env()?;
    let cache = CacheApi::connect(&keys.redis_url).await?;
    let steam = Arc::new(SteamApi::new(&keys.steam_api_key));
    let igdb = Arc::new(IgdbApi::new(
        &keys.twitch_client_id,
        &keys.twitch_client_secret,
        Arc::new(cache),
    ));

    let (aggregator, mut state) = LibraryAggregator::new(
        steam,
        igdb,
        EnrichConfig {
            batch_size: opts.batch_size,
            batch_delay: Duration::from_secs(opts.batch_delay_secs),
        },
    );

    let progress = tokio::spawn(async move {
        while state.changed().await.is_ok() {
            if let LibraryState::Enriching { completed, total } = *state.borrow_and_update() {
                println!("enriched {completed}/{total}");
            }
        }
    });

    let entries = aggregator.aggregate(&opts.profile_url).await?;
    progress.abort();

    if entries.is_empty() {
        println!("No games found");
        return Ok(());
    }

    let direction = match opts.descending {
        true => Direction::Descending,
        false => Direction::Ascending,
    };
    for entry in filter_and_sort(&entries, &opts.filter, opts.sort, direction) {
        let game = &entry.game;
        println!(
            "{} ({:.1}h, last played: {})",
            game.name,
            game.playtime_forever as f64 / 60.0,
            game.rtime_last_played.map_or("never".to_owned(), date),
        );
        match &entry.metadata {
            MetadataOutcome::Matched(record) => {
                println!(
                    "    rating: {}  released: {}",
                    record
                        .total_rating
                        .map_or("n/a".to_owned(), |rating| format!("{rating:.1}")),
                    record.first_release_date.map_or("n/a".to_owned(), date),
                );
                if !record.summary.is_empty() {
                    println!("    {}", record.summary);
                }
            }
            MetadataOutcome::Unmatched => println!("    no metadata"),
            MetadataOutcome::Failed(reason) => println!("    lookup failed: {reason}"),
        }
    }

    Ok(())
}

fn date(epoch_secs: i64) -> String {
    match DateTime::from_timestamp(epoch_secs, 0) {
        Some(date) => date.format("%Y-%m-%d").to_string(),
        None => "n/a".to_owned(),
    }
}
