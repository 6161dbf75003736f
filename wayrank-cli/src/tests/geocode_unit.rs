//! Unit tests covering geocode configuration and output.

use super::*;
use rstest::rstest;
use std::time::Duration;
use wayrank_core::test_support::FixedGeocoder;
use wayrank_core::{Geocoder, Place};

use crate::geocode::{GeocodeArgs, GeocodeConfig, GeocoderBuilder, run_geocode_with};

struct StubGeocoderBuilder {
    places: Vec<Place>,
}

impl GeocoderBuilder for StubGeocoderBuilder {
    fn build(&self, _config: &GeocodeConfig) -> Result<Box<dyn Geocoder>, CliError> {
        Ok(Box::new(FixedGeocoder::new(self.places.clone())))
    }
}

fn place(name: &str, lat: &str, lon: &str) -> Place {
    serde_json::from_value(serde_json::json!({
        "display_name": name,
        "lat": lat,
        "lon": lon,
        "importance": 0.5,
    }))
    .expect("place")
}

#[rstest]
fn converting_geocode_without_query_errors() {
    let err = GeocodeConfig::try_from(GeocodeArgs::default()).expect_err("missing query");
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, ARG_GEOCODE_QUERY);
            assert_eq!(env, ENV_GEOCODE_QUERY);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn geocode_config_applies_defaults() {
    let args = GeocodeArgs {
        query: Some("Tehran".to_owned()),
        ..GeocodeArgs::default()
    };
    let config = GeocodeConfig::try_from(args).expect("config");
    assert_eq!(config.limit, 5);
    assert_eq!(config.geocoder_url, "https://nominatim.openstreetmap.org");
    assert_eq!(config.user_agent, "wayrank/0.1");
    assert_eq!(config.timeout, Duration::from_secs(10));
    assert_eq!(config.retry.max_attempts, 3);
    assert_eq!(config.retry.deadline, None);
    assert_eq!(config.cache, wayrank_core::CacheConfig::default());
}

#[rstest]
fn geocode_tuning_flags_reach_config() {
    let cli = Cli::try_parse_from([
        "wayrank",
        "geocode",
        "Milad Tower",
        "--timeout",
        "4",
        "--retry-deadline",
        "6",
        "--cache-ttl",
        "60",
        "--cache-max-size",
        "16",
    ])
    .expect("parse");
    let Command::Geocode(args) = cli.command else {
        panic!("expected geocode command");
    };

    let config = GeocodeConfig::try_from(args).expect("config");
    assert_eq!(config.timeout, Duration::from_secs(4));
    assert_eq!(config.retry.deadline, Some(Duration::from_secs(6)));
    assert_eq!(config.retry.max_attempts, 3);
    assert_eq!(config.cache.ttl, Duration::from_secs(60));
    assert_eq!(config.cache.max_size, 16);
}

#[rstest]
fn geocode_limit_parses_from_flags() {
    let cli = Cli::try_parse_from(["wayrank", "geocode", "Azadi Tower", "--limit", "2"])
        .expect("parse");
    match cli.command {
        Command::Geocode(args) => {
            assert_eq!(args.query.as_deref(), Some("Azadi Tower"));
            assert_eq!(args.limit, Some(2));
        }
        other => panic!("expected geocode command, found {other:?}"),
    }
}

#[rstest]
fn geocode_prints_candidates_as_json() {
    let builder = StubGeocoderBuilder {
        places: vec![
            place("Tehran", "35.6892", "51.3890"),
            place("Tehran Province", "35.5", "51.5"),
            place("Tehran County", "35.6", "51.4"),
        ],
    };
    let args = GeocodeArgs {
        query: Some("Tehran".to_owned()),
        limit: Some(2),
        ..GeocodeArgs::default()
    };
    let mut stdout = Vec::new();

    run_geocode_with(args, &builder, &mut stdout).expect("geocode");

    let printed: Vec<Place> = serde_json::from_slice(&stdout).expect("JSON places");
    assert_eq!(printed.len(), 2);
    assert_eq!(printed[0].display_name, "Tehran");
    assert!(printed[0].extra.contains_key("importance"));
    assert!(stdout.ends_with(b"\n"));
}
