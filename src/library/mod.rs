mod aggregator;
mod enrich;
mod state;
pub mod view;

pub use aggregator::LibraryAggregator;
pub use enrich::{enrich, EnrichConfig};
pub use state::LibraryState;
