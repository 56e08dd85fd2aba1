//! Wave-based concurrent resolution with early termination.

use std::{fmt, sync::Arc, time::Duration};

use log::{debug, info, warn};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use waypost_core::{
    KnowledgeBaseProvider, LanguageCandidate, MatchScore, ProviderError, Query, Resolution,
    ResolutionResult, UnresolvedReason,
};
use waypost_scorer::{MatchScorer, QueryFeatures, ScorerConfig, select_best};

use crate::{LanguagePriority, language_priority};

/// Default number of concurrent lookups per wave.
pub const DEFAULT_FAN_OUT: usize = 3;

/// Default hard timeout for a single language lookup.
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(5);

/// Tunables for [`Resolver`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Fallback language order.
    pub languages: LanguagePriority,
    /// Lookups run concurrently in each wave; zero is treated as one.
    pub fan_out: usize,
    /// Hard timeout for one lookup.
    pub lookup_timeout: Duration,
}

impl ResolverConfig {
    /// Override the fallback language order.
    #[must_use]
    pub fn with_languages(mut self, languages: LanguagePriority) -> Self {
        self.languages = languages;
        self
    }

    /// Override the wave width.
    #[must_use]
    pub const fn with_fan_out(mut self, fan_out: usize) -> Self {
        self.fan_out = fan_out;
        self
    }

    /// Override the per-lookup timeout.
    #[must_use]
    pub const fn with_lookup_timeout(mut self, lookup_timeout: Duration) -> Self {
        self.lookup_timeout = lookup_timeout;
        self
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            languages: LanguagePriority::default(),
            fan_out: DEFAULT_FAN_OUT,
            lookup_timeout: DEFAULT_LOOKUP_TIMEOUT,
        }
    }
}

/// Lifecycle of one resolution, logged on every transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ResolverState {
    Idle,
    Searching { wave: usize },
    Resolved,
    Exhausted,
}

impl fmt::Display for ResolverState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => f.write_str("idle"),
            Self::Searching { wave } => write!(f, "searching (wave {wave})"),
            Self::Resolved => f.write_str("resolved"),
            Self::Exhausted => f.write_str("exhausted"),
        }
    }
}

fn transition(state: &mut ResolverState, next: ResolverState) {
    debug!("resolver {state} -> {next}");
    *state = next;
}

/// What one lookup task produced.
#[derive(Debug)]
enum Lookup {
    Found(LanguageCandidate),
    Missing,
    Failed(ProviderError),
    Cancelled,
}

/// An article together with its score.
type Scored = (LanguageCandidate, MatchScore);

enum WaveOutcome {
    /// An article reached the fast path.
    FastPath(Scored),
    /// Every lookup finished; accepted articles in priority order, plus
    /// whether any article was found at all.
    Completed { accepted: Vec<Scored>, found: bool },
}

/// Resolves POI names against a multilingual knowledge base.
#[derive(Clone)]
pub struct Resolver {
    knowledge_base: Arc<dyn KnowledgeBaseProvider>,
    scorer: MatchScorer,
    config: ResolverConfig,
}

impl fmt::Debug for Resolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver")
            .field("scorer", &self.scorer)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Resolver {
    /// Create a resolver with default scoring and configuration.
    #[must_use]
    pub fn new(knowledge_base: Arc<dyn KnowledgeBaseProvider>) -> Self {
        Self {
            knowledge_base,
            scorer: MatchScorer::default(),
            config: ResolverConfig::default(),
        }
    }

    /// Replace the resolver configuration.
    #[must_use]
    pub fn with_config(mut self, config: ResolverConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the scorer configuration.
    #[must_use]
    pub const fn with_scorer_config(mut self, config: ScorerConfig) -> Self {
        self.scorer = MatchScorer::new(config);
        self
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolve `query` to a knowledge-base article.
    ///
    /// Languages are tried in priority order, [`ResolverConfig::fan_out`] at
    /// a time. Within a wave, the highest-priority lookup that reaches the
    /// fast path wins: lower-priority lookups are cancelled at once and
    /// higher-priority ones are awaited, up to their timeout, in case they
    /// reach it too. Without a fast-path hit every wave runs and the best
    /// accepted article wins, ties going to the higher-priority language.
    ///
    /// Must be called from within a Tokio runtime.
    pub async fn resolve(&self, query: &Query) -> ResolutionResult {
        let mut state = ResolverState::Idle;
        let features = QueryFeatures::analyse(query);
        let title = query.name.trim();
        let languages = language_priority(title, &self.config.languages);
        let fan_out = self.config.fan_out.max(1);

        let mut tried: Vec<String> = Vec::with_capacity(languages.len());
        let mut best: Option<Scored> = None;
        let mut found_any = false;

        for (index, wave) in languages.chunks(fan_out).enumerate() {
            transition(&mut state, ResolverState::Searching { wave: index + 1 });
            tried.extend(wave.iter().cloned());
            match self.run_wave(&features, title, wave).await {
                WaveOutcome::FastPath((candidate, score)) => {
                    transition(&mut state, ResolverState::Resolved);
                    info!(
                        "resolved early from '{}' with combined score {:.3}",
                        candidate.language_code, score.combined
                    );
                    return ResolutionResult::Resolved(into_resolution(candidate, score));
                }
                WaveOutcome::Completed { accepted, found } => {
                    found_any |= found;
                    best = select_best(best.into_iter().chain(accepted));
                }
            }
        }

        if let Some((candidate, score)) = best {
            transition(&mut state, ResolverState::Resolved);
            info!(
                "resolved from '{}' with combined score {:.3}",
                candidate.language_code, score.combined
            );
            return ResolutionResult::Resolved(into_resolution(candidate, score));
        }

        transition(&mut state, ResolverState::Exhausted);
        let reason = if found_any {
            UnresolvedReason::NoAcceptedMatch
        } else {
            UnresolvedReason::NoCandidatesFound
        };
        info!("unresolved after {} languages: {reason}", tried.len());
        ResolutionResult::Unresolved {
            tried_languages: tried,
            reason,
        }
    }

    async fn run_wave(
        &self,
        features: &QueryFeatures,
        title: &str,
        wave: &[String],
    ) -> WaveOutcome {
        let wave_token = CancellationToken::new();
        let _cancel_on_exit = wave_token.clone().drop_guard();
        let tokens: Vec<CancellationToken> =
            wave.iter().map(|_| wave_token.child_token()).collect();

        let mut tasks = JoinSet::new();
        for (rank, (language, cancel)) in wave.iter().zip(&tokens).enumerate() {
            let knowledge_base = Arc::clone(&self.knowledge_base);
            let cancel = cancel.clone();
            let title = title.to_owned();
            let language = language.clone();
            let budget = self.config.lookup_timeout;
            tasks.spawn(async move {
                let lookup =
                    lookup_language(knowledge_base.as_ref(), &title, &language, budget, &cancel)
                        .await;
                (rank, language, lookup)
            });
        }

        let mut slots: Vec<Option<Scored>> = wave.iter().map(|_| None).collect();
        let mut finished = vec![false; wave.len()];
        let mut found = false;
        let mut fast: Option<(usize, Scored)> = None;

        while let Some(joined) = tasks.join_next().await {
            let (rank, language, lookup) = match joined {
                Ok(done) => done,
                Err(error) => {
                    warn!("lookup task ended abnormally: {error}");
                    continue;
                }
            };
            if let Some(done) = finished.get_mut(rank) {
                *done = true;
            }
            match lookup {
                Lookup::Found(candidate) => {
                    found = true;
                    let score = self.scorer.score_features(features, &candidate, None);
                    let outranks = fast.as_ref().is_none_or(|(winner, _)| rank < *winner);
                    if self.scorer.is_fast_path(&score) && outranks {
                        debug!("'{language}' reached the fast path; cancelling lower priorities");
                        for token in tokens.iter().skip(rank + 1) {
                            token.cancel();
                        }
                        fast = Some((rank, (candidate, score)));
                    } else if let Some(slot) = slots.get_mut(rank) {
                        *slot = Some((candidate, score));
                    }
                }
                Lookup::Missing => debug!("no article in '{language}'"),
                Lookup::Failed(error) => warn!("lookup in '{language}' failed: {error}"),
                Lookup::Cancelled => debug!("lookup in '{language}' cancelled"),
            }

            if let Some((winner, _)) = &fast
                && finished.iter().take(*winner).all(|done| *done)
            {
                break;
            }
        }

        if let Some((_, scored)) = fast {
            return WaveOutcome::FastPath(scored);
        }
        let accepted = slots
            .into_iter()
            .flatten()
            .filter(|(_, score)| score.accepted)
            .collect();
        WaveOutcome::Completed { accepted, found }
    }
}

/// Run one lookup under `budget`, giving up as soon as `cancel` fires.
async fn lookup_language(
    knowledge_base: &dyn KnowledgeBaseProvider,
    title: &str,
    language: &str,
    budget: Duration,
    cancel: &CancellationToken,
) -> Lookup {
    tokio::select! {
        () = cancel.cancelled() => Lookup::Cancelled,
        outcome = tokio::time::timeout(budget, knowledge_base.lookup(title, language)) => {
            match outcome {
                Ok(Ok(Some(candidate))) => Lookup::Found(candidate),
                Ok(Ok(None)) => Lookup::Missing,
                Ok(Err(error)) => Lookup::Failed(error),
                Err(_) => Lookup::Failed(ProviderError::timeout(
                    format!("lookup in '{language}'"),
                    budget,
                )),
            }
        }
    }
}

fn into_resolution(candidate: LanguageCandidate, score: MatchScore) -> Resolution {
    Resolution {
        title: candidate.title,
        summary: candidate.summary,
        description: candidate.description,
        thumbnail_url: candidate.thumbnail_url,
        page_url: candidate.page_url,
        language_code: candidate.language_code,
        score,
    }
}
