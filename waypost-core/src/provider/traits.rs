//! Provider traits implemented by geo search and knowledge-base backends.

use async_trait::async_trait;

use crate::{KeywordSearchRequest, LanguageCandidate, PoiCandidate};

use super::error::ProviderError;

/// Search for POIs matching one keyword around a centre point.
///
/// Implementations should return at most `request.limit` candidates, each
/// with `distance_metres` measured from `request.center`.
///
/// # Examples
///
/// ```rust
/// use async_trait::async_trait;
/// use geo::Coord;
/// use waypost_core::{GeoSearchProvider, KeywordSearchRequest, PoiCandidate, ProviderError};
///
/// struct SingleTemple;
///
/// #[async_trait]
/// impl GeoSearchProvider for SingleTemple {
///     async fn search(
///         &self,
///         request: &KeywordSearchRequest,
///     ) -> Result<Vec<PoiCandidate>, ProviderError> {
///         let location = Coord { x: 114.1504, y: 22.2839 };
///         Ok(vec![PoiCandidate::new("Man Mo Temple", location, request.center)])
///     }
/// }
/// ```
#[async_trait]
pub trait GeoSearchProvider: Send + Sync {
    /// Return raw candidates for `request`.
    async fn search(
        &self,
        request: &KeywordSearchRequest,
    ) -> Result<Vec<PoiCandidate>, ProviderError>;
}

/// Look up a knowledge-base article by title in one language edition.
///
/// `Ok(None)` means the article does not exist in that language; errors are
/// reserved for transport, decoding and service failures.
#[async_trait]
pub trait KnowledgeBaseProvider: Send + Sync {
    /// Fetch the article titled `title` from the `language_code` edition.
    async fn lookup(
        &self,
        title: &str,
        language_code: &str,
    ) -> Result<Option<LanguageCandidate>, ProviderError>;
}
