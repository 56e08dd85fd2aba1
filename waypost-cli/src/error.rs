//! Error types emitted by the Waypost CLI.

use std::sync::Arc;

use thiserror::Error;
use waypost_data::ProviderBuildError;
use waypost_engine::EngineError;

/// Errors emitted by the Waypost CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Flag name.
        field: &'static str,
        /// Environment variable that can supply it.
        env: &'static str,
    },
    /// Only one of `--lat` and `--lon` was given.
    #[error("--lat and --lon must be given together")]
    IncompleteLocation,
    /// Constructing an HTTP provider failed.
    #[error("failed to build provider for {base_url:?}: {source}")]
    BuildProvider {
        /// Endpoint the provider was configured with.
        base_url: String,
        /// Underlying failure.
        #[source]
        source: ProviderBuildError,
    },
    /// The engine rejected the request.
    #[error(transparent)]
    Engine(#[from] EngineError),
    /// Serialising the command output failed.
    #[error("failed to serialise output: {0}")]
    SerialiseOutput(#[source] serde_json::Error),
    /// Writing the command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
