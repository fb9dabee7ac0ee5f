use std::sync::Arc;

use tokio::sync::watch;
use tracing::instrument;

use crate::{
    documents::{LibraryEntry, OwnedGame},
    traits::{MetadataProvider, Storefront},
    Status,
};

use super::{enrich, EnrichConfig, LibraryState};

/// Drives the full aggregation run: profile resolution, ownership lookup and
/// the batched metadata enrichment, publishing `LibraryState` along the way.
pub struct LibraryAggregator {
    storefront: Arc<dyn Storefront>,
    provider: Arc<dyn MetadataProvider>,
    config: EnrichConfig,
    state: watch::Sender<LibraryState>,
}

impl LibraryAggregator {
    pub fn new(
        storefront: Arc<dyn Storefront>,
        provider: Arc<dyn MetadataProvider>,
        config: EnrichConfig,
    ) -> (Self, watch::Receiver<LibraryState>) {
        let (state, receiver) = watch::channel(LibraryState::Idle);
        (
            LibraryAggregator {
                storefront,
                provider,
                config,
                state,
            },
            receiver,
        )
    }

    /// Aggregates the library behind `profile_url`.
    ///
    /// A storefront failure aborts the whole run. Per-game metadata failures
    /// degrade to entries without metadata and the run still settles.
    #[instrument(level = "trace", skip(self))]
    pub async fn aggregate(&self, profile_url: &str) -> Result<Vec<LibraryEntry>, Status> {
        self.state.send_replace(LibraryState::FetchingLibrary);

        let games = match self.fetch_owned_games(profile_url).await {
            Ok(games) => games,
            Err(status) => {
                self.state.send_replace(LibraryState::Failed {
                    error: status.to_string(),
                });
                return Err(status);
            }
        };

        let total = games.len();
        self.state.send_replace(LibraryState::Enriching {
            completed: 0,
            total,
        });

        let state = &self.state;
        let entries = enrich(
            Arc::clone(&self.provider),
            games,
            &self.config,
            |completed, total| {
                state.send_replace(LibraryState::Enriching { completed, total });
            },
        )
        .await;

        self.state.send_replace(LibraryState::Settled { total });
        Ok(entries)
    }

    async fn fetch_owned_games(&self, profile_url: &str) -> Result<Vec<OwnedGame>, Status> {
        let user_id = self.storefront.resolve_user(profile_url).await?;
        self.storefront.get_owned_games(&user_id).await
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::documents::{GameMetadata, MetadataOutcome, OwnedGame};

    struct FakeStorefront {
        games: Vec<OwnedGame>,
        fail: bool,
    }

    #[async_trait]
    impl Storefront for FakeStorefront {
        async fn resolve_user(&self, _profile_url: &str) -> Result<String, Status> {
            match self.fail {
                true => Err(Status::not_found("SteamID was not found.")),
                false => Ok("76561190000000000".to_owned()),
            }
        }

        async fn get_owned_games(&self, _user_id: &str) -> Result<Vec<OwnedGame>, Status> {
            Ok(self.games.clone())
        }
    }

    struct FakeProvider;

    #[async_trait]
    impl MetadataProvider for FakeProvider {
        async fn match_title(&self, title: &str) -> Result<Option<GameMetadata>, Status> {
            Ok(Some(GameMetadata {
                name: title.to_owned(),
                ..Default::default()
            }))
        }
    }

    #[tokio::test]
    async fn aggregation_settles_with_enriched_entries() {
        let storefront = Arc::new(FakeStorefront {
            games: vec![
                OwnedGame {
                    appid: 220,
                    name: "Half-Life 2".to_owned(),
                    ..Default::default()
                },
                OwnedGame {
                    appid: 400,
                    name: "Portal".to_owned(),
                    ..Default::default()
                },
            ],
            fail: false,
        });
        let (aggregator, state) = LibraryAggregator::new(
            storefront,
            Arc::new(FakeProvider),
            EnrichConfig::default(),
        );

        let entries = aggregator.aggregate("https://steamcommunity.com/id/gordon").await.unwrap();

        assert_eq!(entries.len(), 2);
        assert!(entries
            .iter()
            .all(|e| matches!(e.metadata, MetadataOutcome::Matched(_))));
        assert_eq!(*state.borrow(), LibraryState::Settled { total: 2 });
    }

    #[tokio::test]
    async fn empty_library_settles_without_error() {
        let storefront = Arc::new(FakeStorefront {
            games: vec![],
            fail: false,
        });
        let (aggregator, state) = LibraryAggregator::new(
            storefront,
            Arc::new(FakeProvider),
            EnrichConfig::default(),
        );

        let entries = aggregator.aggregate("https://steamcommunity.com/id/empty").await.unwrap();

        assert!(entries.is_empty());
        assert_eq!(*state.borrow(), LibraryState::Settled { total: 0 });
    }

    #[tokio::test]
    async fn storefront_failure_aborts_the_run() {
        let storefront = Arc::new(FakeStorefront {
            games: vec![],
            fail: true,
        });
        let (aggregator, state) = LibraryAggregator::new(
            storefront,
            Arc::new(FakeProvider),
            EnrichConfig::default(),
        );

        let result = aggregator.aggregate("https://steamcommunity.com/id/ghost").await;

        assert!(matches!(result, Err(Status::NotFound(_))));
        assert!(matches!(*state.borrow(), LibraryState::Failed { .. }));
    }
}
