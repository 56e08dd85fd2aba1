//! Knowledge base backed by the Wikipedia REST summary endpoint.
//!
//! Each lookup issues `GET {base}/api/rest_v1/page/summary/{title}` against
//! the language edition requested. A missing page (HTTP 404) and a
//! disambiguation page both count as "no article".
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//!
//! use waypost_core::KnowledgeBaseProvider;
//! use waypost_data::wikipedia::{WikipediaConfig, WikipediaKnowledgeBase};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = WikipediaConfig::default().with_timeout(Duration::from_secs(5));
//! let wikipedia = WikipediaKnowledgeBase::with_config(config)?;
//! let article = wikipedia.lookup("Man Mo Temple", "en").await?;
//! # Ok(())
//! # }
//! ```

mod client;
mod summary;

pub use client::{DEFAULT_BASE_URL, LANGUAGE_PLACEHOLDER, WikipediaConfig, WikipediaKnowledgeBase};
pub use summary::{SummaryResponse, decode_summary};
