/// Shelter API module
///
/// Everything that talks to the remote shelter service lives here:
/// - The HTTP client and its operations (client.rs)
/// - Wire-format data structures (models.rs)

pub mod client;
pub mod models;

pub use client::{ApiClient, ApiError};
pub use models::{Dog, SearchPage};
