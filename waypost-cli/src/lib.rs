//! Command-line interface for the Waypost engine.
//!
//! `waypost discover` lists POIs near a coordinate and `waypost resolve`
//! matches a POI name to a Wikipedia article. Both talk to the public
//! Overpass and Wikipedia services unless their endpoints are overridden.
//! Options are layered from flags, `WAYPOST_*` environment variables and
//! configuration files.
#![forbid(unsafe_code)]

use std::{io::Write, sync::Arc};

use clap::{Parser, Subcommand};
use waypost_data::{
    OverpassConfig, OverpassGeoSearch, WikipediaConfig, WikipediaKnowledgeBase,
    overpass::DEFAULT_ENDPOINT, wikipedia::DEFAULT_BASE_URL,
};
use waypost_engine::Engine;

mod discover;
mod error;
mod resolve;

pub use error::CliError;

use discover::{DiscoverArgs, run_discover};
use resolve::{ResolveArgs, run_resolve};

const ARG_LAT: &str = "lat";
const ARG_LON: &str = "lon";
const ARG_NAME: &str = "name";
const ENV_DISCOVER_LAT: &str = "WAYPOST_CMDS_DISCOVER_LAT";
const ENV_DISCOVER_LON: &str = "WAYPOST_CMDS_DISCOVER_LON";
const ENV_RESOLVE_NAME: &str = "WAYPOST_CMDS_RESOLVE_NAME";

/// Run the Waypost CLI with the current process arguments and environment.
///
/// # Errors
///
/// Returns a [`CliError`] when arguments or configuration are invalid, a
/// provider cannot be built, the engine rejects the request, or the output
/// cannot be written.
pub async fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse()?;
    let mut stdout = std::io::stdout();
    run_with(cli.command, &HttpEngineFactory, &mut stdout).await
}

async fn run_with(
    command: Command,
    factory: &dyn EngineFactory,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    match command {
        Command::Discover(args) => run_discover(args, factory, writer).await,
        Command::Resolve(args) => run_resolve(args, factory, writer).await,
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "waypost",
    about = "Discover points of interest and resolve them to reference articles",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List points of interest near a coordinate.
    Discover(DiscoverArgs),
    /// Resolve a point-of-interest name to a Wikipedia article.
    Resolve(ResolveArgs),
}

/// Service endpoints a command talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Endpoints {
    pub(crate) overpass_url: String,
    pub(crate) wikipedia_url: String,
}

impl Endpoints {
    pub(crate) fn new(overpass_url: Option<String>, wikipedia_url: Option<String>) -> Self {
        Self {
            overpass_url: overpass_url.unwrap_or_else(|| DEFAULT_ENDPOINT.to_owned()),
            wikipedia_url: wikipedia_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_owned()),
        }
    }
}

/// Builds the engine for one invocation.
pub(crate) trait EngineFactory {
    fn build(&self, endpoints: &Endpoints) -> Result<Engine, CliError>;
}

/// Engine over the Overpass and Wikipedia HTTP providers.
struct HttpEngineFactory;

impl EngineFactory for HttpEngineFactory {
    fn build(&self, endpoints: &Endpoints) -> Result<Engine, CliError> {
        let geo_search =
            OverpassGeoSearch::with_config(OverpassConfig::new(endpoints.overpass_url.clone()))
                .map_err(|source| CliError::BuildProvider {
                    base_url: endpoints.overpass_url.clone(),
                    source,
                })?;
        let knowledge_base = WikipediaKnowledgeBase::with_config(WikipediaConfig::new(
            endpoints.wikipedia_url.clone(),
        ))
        .map_err(|source| CliError::BuildProvider {
            base_url: endpoints.wikipedia_url.clone(),
            source,
        })?;
        Ok(Engine::builder(Arc::new(geo_search), Arc::new(knowledge_base)).build())
    }
}

pub(crate) fn write_json<T: serde::Serialize + ?Sized>(
    writer: &mut dyn Write,
    value: &T,
) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(value).map_err(CliError::SerialiseOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[cfg(test)]
mod tests;
