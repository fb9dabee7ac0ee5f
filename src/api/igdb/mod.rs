mod backend;
mod connection;
mod docs;
mod matching;
mod service;

use connection::IgdbConnection;
pub use docs::IgdbGame;
pub use matching::{best_match, normalize_title};
pub use service::IgdbApi;
