//! Deterministic in-memory collaborators used by unit and behaviour tests.
//!
//! The stubs answer from canned replies, can be delayed or stalled to
//! exercise timeouts, and count calls so tests can assert that no I/O was
//! attempted or that cancelled lookups never finished.

use std::{
    collections::HashMap,
    sync::{
        Mutex, PoisonError,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;

use crate::{
    GeoSearchProvider, KeywordSearchRequest, KnowledgeBaseProvider, LanguageCandidate,
    PoiCandidate, ProviderError, ResolutionCache, ResolutionResult,
};

/// Canned reply returned by a stub provider.
#[derive(Debug, Clone)]
pub enum StubReply<T> {
    /// Answer successfully with the value.
    Answer(T),
    /// Fail with the error.
    Fail(ProviderError),
    /// Never answer.
    Stall,
}

#[derive(Debug, Clone)]
struct Scripted<T> {
    reply: StubReply<T>,
    delay: Duration,
}

async fn play<T: Clone>(scripted: Option<Scripted<T>>, fallback: T) -> Result<T, ProviderError> {
    let Some(Scripted { reply, delay }) = scripted else {
        return Ok(fallback);
    };
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
    match reply {
        StubReply::Answer(value) => Ok(value),
        StubReply::Fail(error) => Err(error),
        StubReply::Stall => std::future::pending().await,
    }
}

/// Stub [`GeoSearchProvider`] keyed by keyword.
///
/// Keywords without a scripted reply return no candidates.
#[derive(Debug, Default)]
pub struct StubGeoSearch {
    replies: HashMap<String, Scripted<Vec<PoiCandidate>>>,
    calls: Mutex<Vec<String>>,
}

impl StubGeoSearch {
    /// Create a stub with no scripted replies.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return `candidates` for `keyword`.
    #[must_use]
    pub fn with_results(self, keyword: &str, candidates: Vec<PoiCandidate>) -> Self {
        self.with_reply(keyword, StubReply::Answer(candidates), Duration::ZERO)
    }

    /// Fail searches for `keyword` with `error`.
    #[must_use]
    pub fn with_error(self, keyword: &str, error: ProviderError) -> Self {
        self.with_reply(keyword, StubReply::Fail(error), Duration::ZERO)
    }

    /// Script an arbitrary reply after `delay`.
    #[must_use]
    pub fn with_reply(
        mut self,
        keyword: &str,
        reply: StubReply<Vec<PoiCandidate>>,
        delay: Duration,
    ) -> Self {
        self.replies
            .insert(keyword.to_owned(), Scripted { reply, delay });
        self
    }

    /// Keywords searched so far, in call order.
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl GeoSearchProvider for StubGeoSearch {
    async fn search(
        &self,
        request: &KeywordSearchRequest,
    ) -> Result<Vec<PoiCandidate>, ProviderError> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.keyword.clone());
        let scripted = self.replies.get(&request.keyword).cloned();
        play(scripted, Vec::new()).await
    }
}

/// Stub [`KnowledgeBaseProvider`] keyed by language code.
///
/// Languages without a scripted reply report "not found". The stub counts
/// lookups that started and lookups that ran to completion; the difference
/// reveals lookups abandoned through cancellation.
#[derive(Debug, Default)]
pub struct StubKnowledgeBase {
    replies: HashMap<String, Scripted<Option<LanguageCandidate>>>,
    calls: Mutex<Vec<(String, String)>>,
    started: AtomicUsize,
    finished: AtomicUsize,
}

impl StubKnowledgeBase {
    /// Create a stub where every language misses.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return `article` for lookups in its language.
    #[must_use]
    pub fn with_article(self, article: LanguageCandidate) -> Self {
        let language = article.language_code.clone();
        self.with_reply(&language, StubReply::Answer(Some(article)), Duration::ZERO)
    }

    /// Return `article` after `delay`.
    #[must_use]
    pub fn with_delayed_article(self, article: LanguageCandidate, delay: Duration) -> Self {
        let language = article.language_code.clone();
        self.with_reply(&language, StubReply::Answer(Some(article)), delay)
    }

    /// Fail lookups in `language` with `error`.
    #[must_use]
    pub fn with_error(self, language: &str, error: ProviderError) -> Self {
        self.with_reply(language, StubReply::Fail(error), Duration::ZERO)
    }

    /// Never answer lookups in `language`.
    #[must_use]
    pub fn with_stall(self, language: &str) -> Self {
        self.with_reply(language, StubReply::Stall, Duration::ZERO)
    }

    /// Script an arbitrary reply after `delay`.
    #[must_use]
    pub fn with_reply(
        mut self,
        language: &str,
        reply: StubReply<Option<LanguageCandidate>>,
        delay: Duration,
    ) -> Self {
        self.replies
            .insert(language.to_owned(), Scripted { reply, delay });
        self
    }

    /// `(title, language)` pairs looked up so far, in call order.
    #[must_use]
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Languages looked up so far, in call order.
    #[must_use]
    pub fn languages(&self) -> Vec<String> {
        self.calls().into_iter().map(|(_, language)| language).collect()
    }

    /// Number of lookups that started.
    #[must_use]
    pub fn started(&self) -> usize {
        self.started.load(Ordering::SeqCst)
    }

    /// Number of lookups that ran to completion.
    #[must_use]
    pub fn finished(&self) -> usize {
        self.finished.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl KnowledgeBaseProvider for StubKnowledgeBase {
    async fn lookup(
        &self,
        title: &str,
        language_code: &str,
    ) -> Result<Option<LanguageCandidate>, ProviderError> {
        self.started.fetch_add(1, Ordering::SeqCst);
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((title.to_owned(), language_code.to_owned()));
        let scripted = self.replies.get(language_code).cloned();
        let outcome = play(scripted, None).await;
        self.finished.fetch_add(1, Ordering::SeqCst);
        outcome
    }
}

/// In-memory [`ResolutionCache`] backed by a mutex-guarded map.
#[derive(Debug, Default)]
pub struct MemoryResolutionCache {
    entries: Mutex<HashMap<String, ResolutionResult>>,
}

impl MemoryResolutionCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Report whether the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ResolutionCache for MemoryResolutionCache {
    fn get(&self, key: &str) -> Option<ResolutionResult> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn put(&self, key: String, value: ResolutionResult) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, value);
    }
}
