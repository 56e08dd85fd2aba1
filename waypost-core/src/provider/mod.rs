//! Boundary traits for the external collaborators the engine calls.
//!
//! [`GeoSearchProvider`] returns raw POI candidates for one keyword and
//! [`KnowledgeBaseProvider`] fetches one article in one language. Both are
//! asynchronous and must be `Send + Sync` so the engine can fan calls out
//! across worker tasks.
//!
//! Failures are reported as [`ProviderError`]; the engine downgrades them to
//! "no result for this task" and never lets one provider failure abort a
//! sibling task.

mod error;
mod traits;

pub use error::ProviderError;
pub use traits::{GeoSearchProvider, KnowledgeBaseProvider};
