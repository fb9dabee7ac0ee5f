mod game_metadata;
mod library_entry;
mod owned_game;

pub use game_metadata::GameMetadata;
pub use library_entry::{LibraryEntry, MetadataOutcome};
pub use owned_game::OwnedGame;
