//! Rank command implementation.

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use std::io::{BufReader, Write};
use std::sync::Arc;
use wayrank_core::{RankPayload, RankRequest, RankedItinerary, Ranker};
use wayrank_fs::open_utf8_file;
use wayrank_solver::BruteForceRanker;

use crate::route::RoutingEndpoint;
use crate::{
    ARG_CACHE_MAX_SIZE, ARG_CACHE_TTL, ARG_RANK_REQUEST, ARG_ROUTING_URL, ARG_TIMEOUT,
    ARG_USER_AGENT, CliError, ENV_RANK_REQUEST, cache_config, write_json,
};

/// CLI arguments for the `rank` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Rank an origin and four destinations into the visiting \
                 order with the least total road distance. The request is a \
                 JSON file with `origin`, `destinations`, and optional \
                 `profile` and `return_to_origin` fields; points are either \
                 \"lat,lon\" strings or {lat, lon, label} objects.",
    about = "Rank four destinations by road distance"
)]
#[ortho_config(prefix = "WAYRANK")]
pub(crate) struct RankArgs {
    /// Path to a JSON file containing the rank request.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// Base URL of the routing service.
    #[arg(long = ARG_ROUTING_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) routing_url: Option<String>,
    /// User agent sent with every request.
    #[arg(long = ARG_USER_AGENT, value_name = "agent")]
    #[serde(default)]
    pub(crate) user_agent: Option<String>,
    /// Per-request timeout in seconds (default 10).
    #[arg(long = ARG_TIMEOUT, value_name = "secs")]
    #[serde(default)]
    pub(crate) timeout: Option<u64>,
    /// Seconds a cached response stays fresh (default 300).
    #[arg(long = ARG_CACHE_TTL, value_name = "secs")]
    #[serde(default)]
    pub(crate) cache_ttl: Option<u64>,
    /// Most responses held in the cache (default 1024).
    #[arg(long = ARG_CACHE_MAX_SIZE, value_name = "n")]
    #[serde(default)]
    pub(crate) cache_max_size: Option<usize>,
}

impl RankArgs {
    pub(crate) fn into_config(self) -> Result<RankConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RankConfig::try_from(merged)
    }
}

/// Resolved `rank` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RankConfig {
    pub(crate) request_path: Utf8PathBuf,
    pub(crate) endpoint: RoutingEndpoint,
}

impl TryFrom<RankArgs> for RankConfig {
    type Error = CliError;

    fn try_from(args: RankArgs) -> Result<Self, Self::Error> {
        let request_path = args.request_path.ok_or(CliError::MissingArgument {
            field: ARG_RANK_REQUEST,
            env: ENV_RANK_REQUEST,
        })?;
        Ok(Self {
            request_path,
            endpoint: RoutingEndpoint::resolve(
                args.routing_url,
                args.user_agent,
                args.timeout,
                cache_config(args.cache_ttl, args.cache_max_size),
            ),
        })
    }
}

/// Builds a ranker for the current rank invocation.
pub(crate) trait RankerBuilder {
    fn build(&self, config: &RankConfig) -> Result<Box<dyn Ranker>, CliError>;
}

pub(crate) struct DefaultRankerBuilder;

impl RankerBuilder for DefaultRankerBuilder {
    fn build(&self, config: &RankConfig) -> Result<Box<dyn Ranker>, CliError> {
        let provider = Arc::new(config.endpoint.connect()?);
        Ok(Box::new(BruteForceRanker::new(Arc::clone(&provider), provider)))
    }
}

pub(crate) fn run_rank(args: RankArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_rank_with(args, &DefaultRankerBuilder, &mut stdout)
}

pub(crate) fn run_rank_with(
    args: RankArgs,
    builder: &dyn RankerBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let itinerary = execute_rank(args, builder)?;
    write_json(writer, &itinerary)
}

fn execute_rank(
    args: RankArgs,
    builder: &dyn RankerBuilder,
) -> Result<RankedItinerary, CliError> {
    let config = args.into_config()?;
    let request = load_rank_request(&config.request_path)?;
    let ranker = builder.build(&config)?;
    ranker
        .rank(&request)
        .map_err(|source| CliError::Rank { source })
}

/// Loads and normalises a JSON-encoded rank request from disk.
///
/// Point syntax and the destination count are checked here, before any
/// provider is built.
pub(crate) fn load_rank_request(path: &Utf8Path) -> Result<RankRequest, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenRankRequest {
        path: path.to_path_buf(),
        source,
    })?;
    let payload: RankPayload = serde_json::from_reader(BufReader::new(file)).map_err(|source| {
        CliError::ParseRankRequest {
            path: path.to_path_buf(),
            source,
        }
    })?;
    RankRequest::try_from(payload).map_err(|source| CliError::InvalidRankRequest {
        path: path.to_path_buf(),
        source,
    })
}
