mod cache;
mod igdb;
mod steam;

pub use cache::CacheApi;
pub use igdb::{best_match, normalize_title, IgdbApi, IgdbGame};
pub use steam::SteamApi;
