//! Geocode command implementation.

use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::time::Duration;
use wayrank_core::{CacheConfig, Geocoder, Place};
use wayrank_data::{HttpGeocoder, HttpGeocoderConfig, ResponseCache, RetryPolicy};

use crate::{
    ARG_CACHE_MAX_SIZE, ARG_CACHE_TTL, ARG_GEOCODE_LIMIT, ARG_GEOCODE_QUERY, ARG_GEOCODER_URL,
    ARG_RETRY_DEADLINE, ARG_TIMEOUT, ARG_USER_AGENT, CliError, DEFAULT_GEOCODE_LIMIT,
    ENV_GEOCODE_QUERY, cache_config, write_json,
};

/// CLI arguments for the `geocode` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Search the geocoding service for places matching free text. \
                 Transient failures are retried with a linear backoff; an \
                 explicit rejection by the service fails at once.",
    about = "Resolve free text to candidate places"
)]
#[ortho_config(prefix = "WAYRANK")]
pub(crate) struct GeocodeArgs {
    /// Text to search for.
    #[arg(value_name = "text")]
    #[serde(default)]
    pub(crate) query: Option<String>,
    /// Maximum number of candidates (default 5).
    #[arg(long = ARG_GEOCODE_LIMIT, value_name = "n")]
    #[serde(default)]
    pub(crate) limit: Option<u32>,
    /// Base URL of the search service.
    #[arg(long = ARG_GEOCODER_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) geocoder_url: Option<String>,
    /// User agent sent with every request.
    #[arg(long = ARG_USER_AGENT, value_name = "agent")]
    #[serde(default)]
    pub(crate) user_agent: Option<String>,
    /// Per-attempt timeout in seconds (default 10).
    #[arg(long = ARG_TIMEOUT, value_name = "secs")]
    #[serde(default)]
    pub(crate) timeout: Option<u64>,
    /// Overall retry budget in seconds; unbounded when absent.
    #[arg(long = ARG_RETRY_DEADLINE, value_name = "secs")]
    #[serde(default)]
    pub(crate) retry_deadline: Option<u64>,
    /// Seconds a cached response stays fresh (default 300).
    #[arg(long = ARG_CACHE_TTL, value_name = "secs")]
    #[serde(default)]
    pub(crate) cache_ttl: Option<u64>,
    /// Most responses held in the cache (default 1024).
    #[arg(long = ARG_CACHE_MAX_SIZE, value_name = "n")]
    #[serde(default)]
    pub(crate) cache_max_size: Option<usize>,
}

impl GeocodeArgs {
    pub(crate) fn into_config(self) -> Result<GeocodeConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        GeocodeConfig::try_from(merged)
    }
}

/// Resolved `geocode` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct GeocodeConfig {
    pub(crate) query: String,
    pub(crate) limit: u32,
    pub(crate) geocoder_url: String,
    pub(crate) user_agent: String,
    pub(crate) timeout: Duration,
    pub(crate) retry: RetryPolicy,
    pub(crate) cache: CacheConfig,
}

impl TryFrom<GeocodeArgs> for GeocodeConfig {
    type Error = CliError;

    fn try_from(args: GeocodeArgs) -> Result<Self, Self::Error> {
        let query = args.query.ok_or(CliError::MissingArgument {
            field: ARG_GEOCODE_QUERY,
            env: ENV_GEOCODE_QUERY,
        })?;
        let defaults = HttpGeocoderConfig::default();
        Ok(Self {
            query,
            limit: args.limit.unwrap_or(DEFAULT_GEOCODE_LIMIT),
            geocoder_url: args.geocoder_url.unwrap_or(defaults.base_url),
            user_agent: args.user_agent.unwrap_or(defaults.user_agent),
            timeout: args.timeout.map_or(defaults.timeout, Duration::from_secs),
            retry: args.retry_deadline.map_or(defaults.retry, |secs| {
                defaults.retry.with_deadline(Duration::from_secs(secs))
            }),
            cache: cache_config(args.cache_ttl, args.cache_max_size),
        })
    }
}

/// Builds the geocoder for the current invocation.
pub(crate) trait GeocoderBuilder {
    fn build(&self, config: &GeocodeConfig) -> Result<Box<dyn Geocoder>, CliError>;
}

pub(crate) struct DefaultGeocoderBuilder;

impl GeocoderBuilder for DefaultGeocoderBuilder {
    fn build(&self, config: &GeocodeConfig) -> Result<Box<dyn Geocoder>, CliError> {
        let geocoder = HttpGeocoder::with_config(
            HttpGeocoderConfig::new(config.geocoder_url.clone())
                .with_user_agent(config.user_agent.clone())
                .with_timeout(config.timeout)
                .with_retry(config.retry),
            ResponseCache::new(config.cache),
        )
        .map_err(|source| CliError::BuildProvider {
            base_url: config.geocoder_url.clone(),
            source,
        })?;
        Ok(Box::new(geocoder))
    }
}

pub(crate) fn run_geocode(args: GeocodeArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_geocode_with(args, &DefaultGeocoderBuilder, &mut stdout)
}

pub(crate) fn run_geocode_with(
    args: GeocodeArgs,
    builder: &dyn GeocoderBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let places = execute_geocode(args, builder)?;
    write_json(writer, &places)
}

fn execute_geocode(
    args: GeocodeArgs,
    builder: &dyn GeocoderBuilder,
) -> Result<Vec<Place>, CliError> {
    let config = args.into_config()?;
    let geocoder = builder.build(&config)?;
    let places = geocoder
        .geocode(&config.query, config.limit)
        .map_err(|source| CliError::Geocode { source })?;
    log::info!("{} candidates for {:?}", places.len(), config.query);
    Ok(places)
}
