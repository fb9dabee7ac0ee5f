pub mod api;
pub mod documents;
pub mod http;
pub mod library;
pub mod traits;
pub mod util;

mod status;
pub use status::Status;

mod tracing;
pub use crate::tracing::Tracing;
