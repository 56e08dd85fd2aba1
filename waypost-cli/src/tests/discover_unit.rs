//! Unit tests covering discover configuration and output.

use super::helpers::{StubEngineFactory, man_mo_poi, parse_output};
use super::*;
use crate::discover::{
    DEFAULT_MAX_RESULTS, DEFAULT_RADIUS_METRES, DiscoverConfig, config_from_layers_for_test,
};
use geo::Coord;
use ortho_config::MergeComposer;
use rstest::rstest;
use serde_json::json;
use waypost_engine::{
    DEFAULT_KEYWORDS, DiscoveryError, EngineError, ProviderError,
    test_support::{StubGeoSearch, StubKnowledgeBase},
};

const ORIGIN: Coord<f64> = Coord {
    x: 114.1500,
    y: 22.2840,
};

fn discover_args() -> DiscoverArgs {
    DiscoverArgs {
        lat: Some(ORIGIN.y),
        lon: Some(ORIGIN.x),
        ..DiscoverArgs::default()
    }
}

#[rstest]
#[case::missing_lat(None, Some(114.15), ARG_LAT, ENV_DISCOVER_LAT)]
#[case::missing_lon(Some(22.28), None, ARG_LON, ENV_DISCOVER_LON)]
fn converting_discover_without_coordinates_errors(
    #[case] lat: Option<f64>,
    #[case] lon: Option<f64>,
    #[case] expected_field: &'static str,
    #[case] expected_env: &'static str,
) {
    let args = DiscoverArgs {
        lat,
        lon,
        ..DiscoverArgs::default()
    };

    let err = DiscoverConfig::try_from(args).expect_err("missing coordinate should error");
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, expected_field);
            assert_eq!(env, expected_env);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn discover_config_fills_defaults() {
    let args = DiscoverArgs {
        keywords: Some(Vec::new()),
        ..discover_args()
    };

    let config = DiscoverConfig::try_from(args).expect("config should build");
    assert_eq!(config.center, ORIGIN);
    assert_eq!(config.radius_metres, DEFAULT_RADIUS_METRES);
    assert_eq!(config.max_results, DEFAULT_MAX_RESULTS);
    assert_eq!(config.keywords, None);
    assert_eq!(
        config.endpoints,
        Endpoints::new(None, None),
        "endpoints should default to the public services"
    );
    assert_eq!(
        config.endpoints.overpass_url,
        "https://overpass-api.de/api/interpreter"
    );
}

#[rstest]
fn merge_layers_honours_precedence() {
    let mut composer = MergeComposer::new();
    composer.push_file(
        json!({
            "lat": 1.0,
            "radius": 250.0,
            "overpass_url": "http://from-file/api/interpreter",
        }),
        None,
    );
    composer.push_environment(json!({
        "lat": 22.284,
        "lon": 114.15,
        "radius": 500.0,
    }));
    composer.push_cli(json!({
        "radius": 750.0,
        "keywords": ["temple"],
    }));

    let config =
        config_from_layers_for_test(composer.layers()).expect("merged config should build");
    assert_eq!(config.center, Coord { x: 114.15, y: 22.284 });
    assert_eq!(config.radius_metres, 750.0);
    assert_eq!(config.keywords, Some(vec!["temple".to_owned()]));
    assert_eq!(
        config.endpoints.overpass_url,
        "http://from-file/api/interpreter"
    );
}

#[rstest]
fn merge_layers_maps_configuration_errors() {
    let mut composer = MergeComposer::new();
    composer.push_cli(json!({ "lat": "north" }));

    let err = config_from_layers_for_test(composer.layers())
        .expect_err("invalid config layer should map to CliError::Configuration");
    match err {
        CliError::Configuration(_) => {}
        other => panic!("expected CliError::Configuration, found {other:?}"),
    }
}

#[rstest]
#[tokio::test]
async fn discover_prints_ranked_pois_as_json() {
    let factory = StubEngineFactory::new(
        StubGeoSearch::new().with_results("temple", vec![man_mo_poi(ORIGIN)]),
        StubKnowledgeBase::new(),
    );
    let args = DiscoverArgs {
        keywords: Some(vec!["temple".to_owned()]),
        ..discover_args()
    };
    let mut stdout = Vec::new();

    run_with(Command::Discover(args), &factory, &mut stdout)
        .await
        .expect("discover should succeed");

    let output = parse_output(&stdout);
    assert_eq!(output["pois"][0]["name"], "Man Mo Temple");
    assert_eq!(output["pois"].as_array().map(Vec::len), Some(1));
    assert_eq!(output["failed_keywords"], json!([]));
    assert_eq!(output["all_failed"], false);
    assert_eq!(factory.geo_search.calls(), ["temple"]);
}

#[rstest]
#[tokio::test]
async fn discover_without_keywords_searches_the_defaults() {
    let factory = StubEngineFactory::new(StubGeoSearch::new(), StubKnowledgeBase::new());
    let mut stdout = Vec::new();

    run_with(Command::Discover(discover_args()), &factory, &mut stdout)
        .await
        .expect("discover should succeed");

    let mut searched = factory.geo_search.calls();
    searched.sort();
    let mut expected = DEFAULT_KEYWORDS.map(str::to_owned).to_vec();
    expected.sort();
    assert_eq!(searched, expected);
    assert_eq!(parse_output(&stdout)["pois"], json!([]));
}

#[rstest]
#[tokio::test]
async fn discover_reports_failed_keywords() {
    let factory = StubEngineFactory::new(
        StubGeoSearch::new().with_error(
            "museum",
            ProviderError::Network {
                url: "http://overpass.test".to_owned(),
                message: "connection refused".to_owned(),
            },
        ),
        StubKnowledgeBase::new(),
    );
    let args = DiscoverArgs {
        keywords: Some(vec!["museum".to_owned()]),
        ..discover_args()
    };
    let mut stdout = Vec::new();

    run_with(Command::Discover(args), &factory, &mut stdout)
        .await
        .expect("a provider outage is not a command failure");

    let output = parse_output(&stdout);
    assert_eq!(output["failed_keywords"], json!(["museum"]));
    assert_eq!(output["all_failed"], true);
}

#[rstest]
#[tokio::test]
async fn discover_rejects_non_positive_radius() {
    let factory = StubEngineFactory::new(StubGeoSearch::new(), StubKnowledgeBase::new());
    let args = DiscoverArgs {
        radius: Some(0.0),
        ..discover_args()
    };
    let mut stdout = Vec::new();

    let err = run_with(Command::Discover(args), &factory, &mut stdout)
        .await
        .expect_err("zero radius should be rejected");
    match err {
        CliError::Engine(EngineError::Discovery(DiscoveryError::InvalidRadius { .. })) => {}
        other => panic!("expected InvalidRadius, found {other:?}"),
    }
    assert!(stdout.is_empty());
    assert!(factory.geo_search.calls().is_empty());
}

#[rstest]
fn discover_flags_parse_negative_coordinates() {
    let cli = Cli::try_parse_from([
        "waypost",
        "discover",
        "--lat",
        "-33.8568",
        "--lon",
        "151.2153",
        "--keyword",
        "opera house",
        "--keyword",
        "park",
    ])
    .expect("arguments should parse");
    match cli.command {
        Command::Discover(args) => {
            assert_eq!(args.lat, Some(-33.8568));
            assert_eq!(args.lon, Some(151.2153));
            assert_eq!(
                args.keywords,
                Some(vec!["opera house".to_owned(), "park".to_owned()])
            );
        }
        Command::Resolve(_) => panic!("expected discover command"),
    }
}
