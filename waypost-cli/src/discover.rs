//! `discover` command: list POIs near a coordinate.

use std::io::Write;

use clap::Parser;
use geo::Coord;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use waypost_engine::{Discovery, PoiCandidate};

use crate::{
    ARG_LAT, ARG_LON, CliError, ENV_DISCOVER_LAT, ENV_DISCOVER_LON, EngineFactory, Endpoints,
    write_json,
};

/// Search radius used when none is configured.
pub(crate) const DEFAULT_RADIUS_METRES: f64 = 1_000.0;

/// Result count used when none is configured.
pub(crate) const DEFAULT_MAX_RESULTS: usize = 20;

/// CLI arguments for the `discover` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Search the Overpass API once per keyword around a coordinate \
                 and print the merged, deduplicated POIs nearest first.",
    about = "List points of interest near a coordinate"
)]
#[ortho_config(prefix = "WAYPOST")]
pub(crate) struct DiscoverArgs {
    /// Latitude of the search centre.
    #[arg(long = ARG_LAT, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) lat: Option<f64>,
    /// Longitude of the search centre.
    #[arg(long = ARG_LON, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) lon: Option<f64>,
    /// Search radius in metres.
    #[arg(long, value_name = "metres")]
    #[serde(default)]
    pub(crate) radius: Option<f64>,
    /// Maximum number of POIs to print.
    #[arg(long, value_name = "count")]
    #[serde(default)]
    pub(crate) max_results: Option<usize>,
    /// Keyword to search for; repeat for several. Defaults to a sightseeing
    /// set.
    #[arg(long = "keyword", value_name = "keyword")]
    #[serde(default)]
    pub(crate) keywords: Option<Vec<String>>,
    /// Override the Overpass interpreter endpoint.
    #[arg(long, value_name = "url")]
    #[serde(default)]
    pub(crate) overpass_url: Option<String>,
    /// Override the Wikipedia base URL (`{lang}` is replaced per language).
    #[arg(long, value_name = "url")]
    #[serde(default)]
    pub(crate) wikipedia_url: Option<String>,
}

impl DiscoverArgs {
    fn into_config(self) -> Result<DiscoverConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        DiscoverConfig::try_from(merged)
    }
}

/// Resolved `discover` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DiscoverConfig {
    pub(crate) center: Coord<f64>,
    pub(crate) radius_metres: f64,
    pub(crate) max_results: usize,
    /// Explicit keywords; `None` uses the engine defaults.
    pub(crate) keywords: Option<Vec<String>>,
    pub(crate) endpoints: Endpoints,
}

impl TryFrom<DiscoverArgs> for DiscoverConfig {
    type Error = CliError;

    fn try_from(args: DiscoverArgs) -> Result<Self, Self::Error> {
        let lat = args.lat.ok_or(CliError::MissingArgument {
            field: ARG_LAT,
            env: ENV_DISCOVER_LAT,
        })?;
        let lon = args.lon.ok_or(CliError::MissingArgument {
            field: ARG_LON,
            env: ENV_DISCOVER_LON,
        })?;
        Ok(Self {
            center: Coord { x: lon, y: lat },
            radius_metres: args.radius.unwrap_or(DEFAULT_RADIUS_METRES),
            max_results: args.max_results.unwrap_or(DEFAULT_MAX_RESULTS),
            keywords: args.keywords.filter(|keywords| !keywords.is_empty()),
            endpoints: Endpoints::new(args.overpass_url, args.wikipedia_url),
        })
    }
}

/// JSON printed by `discover`.
#[derive(Debug, Serialize)]
struct DiscoverOutput<'a> {
    pois: &'a [PoiCandidate],
    failed_keywords: Vec<&'a str>,
    all_failed: bool,
}

impl<'a> From<&'a Discovery> for DiscoverOutput<'a> {
    fn from(discovery: &'a Discovery) -> Self {
        Self {
            pois: discovery.pois().items(),
            failed_keywords: discovery
                .failures()
                .iter()
                .map(|failure| failure.keyword.as_str())
                .collect(),
            all_failed: discovery.all_failed(),
        }
    }
}

pub(crate) async fn run_discover(
    args: DiscoverArgs,
    factory: &dyn EngineFactory,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    execute_discover(config, factory, writer).await
}

pub(crate) async fn execute_discover(
    config: DiscoverConfig,
    factory: &dyn EngineFactory,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let engine = factory.build(&config.endpoints)?;
    let discovery = match &config.keywords {
        Some(keywords) => {
            engine
                .discover_with_keywords(
                    config.center,
                    config.radius_metres,
                    keywords,
                    config.max_results,
                )
                .await?
        }
        None => {
            engine
                .discover_nearby(config.center, config.radius_metres, config.max_results)
                .await?
        }
    };
    if discovery.all_failed() {
        log::warn!("every keyword search failed");
    }
    write_json(writer, &DiscoverOutput::from(&discovery))
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<DiscoverConfig, CliError> {
    let merged = DiscoverArgs::merge_from_layers(layers).map_err(CliError::from)?;
    DiscoverConfig::try_from(merged)
}
