//! `resolve` command: match a POI name to a Wikipedia article.

use std::io::Write;

use clap::Parser;
use geo::Coord;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::{
    ARG_LAT, ARG_LON, ARG_NAME, CliError, ENV_RESOLVE_NAME, EngineFactory, Endpoints, write_json,
};

/// Session used for cooldown bookkeeping when none is configured.
pub(crate) const DEFAULT_SESSION: &str = "cli";

/// CLI arguments for the `resolve` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Look the name up across Wikipedia language editions, score \
                 each article against it and print the best accepted match, \
                 or the languages tried when nothing matched.",
    about = "Resolve a point-of-interest name to a Wikipedia article"
)]
#[ortho_config(prefix = "WAYPOST")]
pub(crate) struct ResolveArgs {
    /// Name of the point of interest.
    #[arg(value_name = "name")]
    #[serde(default)]
    pub(crate) name: Option<String>,
    /// Latitude of the POI, used to rank articles by distance.
    #[arg(long = ARG_LAT, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) lat: Option<f64>,
    /// Longitude of the POI.
    #[arg(long = ARG_LON, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) lon: Option<f64>,
    /// Session identifier passed to the refresh cooldown.
    #[arg(long, value_name = "id")]
    #[serde(default)]
    pub(crate) session: Option<String>,
    /// Override the Wikipedia base URL (`{lang}` is replaced per language).
    #[arg(long, value_name = "url")]
    #[serde(default)]
    pub(crate) wikipedia_url: Option<String>,
    /// Override the Overpass interpreter endpoint.
    #[arg(long, value_name = "url")]
    #[serde(default)]
    pub(crate) overpass_url: Option<String>,
}

impl ResolveArgs {
    fn into_config(self) -> Result<ResolveConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ResolveConfig::try_from(merged)
    }
}

/// Resolved `resolve` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ResolveConfig {
    pub(crate) name: String,
    pub(crate) hint: Option<Coord<f64>>,
    pub(crate) session: String,
    pub(crate) endpoints: Endpoints,
}

impl TryFrom<ResolveArgs> for ResolveConfig {
    type Error = CliError;

    fn try_from(args: ResolveArgs) -> Result<Self, Self::Error> {
        let name = args.name.ok_or(CliError::MissingArgument {
            field: ARG_NAME,
            env: ENV_RESOLVE_NAME,
        })?;
        let hint = match (args.lat, args.lon) {
            (Some(lat), Some(lon)) => Some(Coord { x: lon, y: lat }),
            (None, None) => None,
            _ => return Err(CliError::IncompleteLocation),
        };
        Ok(Self {
            name,
            hint,
            session: args.session.unwrap_or_else(|| DEFAULT_SESSION.to_owned()),
            endpoints: Endpoints::new(args.overpass_url, args.wikipedia_url),
        })
    }
}

pub(crate) async fn run_resolve(
    args: ResolveArgs,
    factory: &dyn EngineFactory,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    execute_resolve(config, factory, writer).await
}

pub(crate) async fn execute_resolve(
    config: ResolveConfig,
    factory: &dyn EngineFactory,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let engine = factory.build(&config.endpoints)?;
    let result = engine
        .resolve_poi(&config.session, &config.name, config.hint)
        .await?;
    write_json(writer, &result)
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<ResolveConfig, CliError> {
    let merged = ResolveArgs::merge_from_layers(layers).map_err(CliError::from)?;
    ResolveConfig::try_from(merged)
}
