use std::{sync::Arc, time::Duration};

use tracing::{instrument, warn};

use crate::{
    documents::{LibraryEntry, MetadataOutcome, OwnedGame},
    traits::MetadataProvider,
};

/// Throttling parameters for the enrichment loop. The defaults are an ad hoc
/// guard against upstream rate limits, not an adaptive mechanism.
#[derive(Clone, Debug)]
pub struct EnrichConfig {
    pub batch_size: usize,
    pub batch_delay: Duration,
}

impl Default for EnrichConfig {
    fn default() -> Self {
        EnrichConfig {
            batch_size: 15,
            batch_delay: Duration::from_secs(3),
        }
    }
}

/// Attaches catalog metadata to `games`, batch by batch.
///
/// All lookups within a batch run concurrently and the loop proceeds only
/// once the whole batch settles, pausing `batch_delay` between batches. A
/// failed lookup degrades to `MetadataOutcome::Failed` and is never retried,
/// so the output always has one entry per input game, in input order.
/// `on_progress` is invoked after each batch with (completed, total).
#[instrument(level = "trace", skip_all, fields(games = games.len()))]
pub async fn enrich(
    provider: Arc<dyn MetadataProvider>,
    games: Vec<OwnedGame>,
    config: &EnrichConfig,
    mut on_progress: impl FnMut(usize, usize),
) -> Vec<LibraryEntry> {
    let total = games.len();
    let mut entries = Vec::with_capacity(total);

    let mut games = games.into_iter();
    let mut first = true;
    loop {
        let batch: Vec<OwnedGame> = games.by_ref().take(config.batch_size.max(1)).collect();
        if batch.is_empty() {
            break;
        }
        if !first {
            tokio::time::sleep(config.batch_delay).await;
        }
        first = false;

        let lookups = batch.into_iter().map(|game| {
            let provider = Arc::clone(&provider);
            async move {
                let metadata = match provider.match_title(&game.name).await {
                    Ok(Some(record)) => MetadataOutcome::Matched(record),
                    Ok(None) => MetadataOutcome::Unmatched,
                    Err(status) => {
                        warn!("Metadata lookup failed for '{}': {status}", game.name);
                        MetadataOutcome::Failed(status.to_string())
                    }
                };
                LibraryEntry { game, metadata }
            }
        });

        entries.extend(futures::future::join_all(lookups).await);
        on_progress(entries.len(), total);
    }

    entries
}
