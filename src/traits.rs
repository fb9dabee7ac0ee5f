use crate::{
    documents::{GameMetadata, OwnedGame},
    Status,
};
use async_trait::async_trait;

/// A game storefront that holds a user's ownership record.
#[async_trait]
pub trait Storefront: Send + Sync {
    /// Resolves a user profile URL to the storefront's numeric user id.
    async fn resolve_user(&self, profile_url: &str) -> Result<String, Status>;

    async fn get_owned_games(&self, user_id: &str) -> Result<Vec<OwnedGame>, Status>;
}

/// A shared key-value cache with per-entry expiry.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, Status>;

    async fn set_ex(&self, key: &str, value: &str, ttl_secs: u64) -> Result<(), Status>;
}

/// A catalog service that can attach metadata to a game title.
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Returns the catalog record that best matches `title`, if any.
    async fn match_title(&self, title: &str) -> Result<Option<GameMetadata>, Status>;
}
