//! Multi-language POI resolution for the Waypost engine.
//!
//! [`Resolver::resolve`] looks a POI name up in several language editions of
//! a knowledge base. Languages are ordered by [`language_priority`] from the
//! script of the name, then queried in concurrent waves of
//! [`ResolverConfig::fan_out`] lookups. Each answer is scored as soon as it
//! arrives; a confident match ends the search early and cancels the lookups
//! still in flight. Otherwise the best accepted match across every wave wins,
//! or the result is [`waypost_core::ResolutionResult::Unresolved`].
//!
//! Provider failures, timeouts and panics count as "no article in that
//! language" and never abort a resolution.

#![forbid(unsafe_code)]

mod language;
mod resolver;

pub use language::{DEFAULT_LANGUAGES, LanguagePriority, language_priority};
pub use resolver::{DEFAULT_FAN_OUT, DEFAULT_LOOKUP_TIMEOUT, Resolver, ResolverConfig};
