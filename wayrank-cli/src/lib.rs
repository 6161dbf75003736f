//! Command-line interface for geocoding, routing and ranking destinations.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};
use std::time::Duration;
use wayrank_core::CacheConfig;

mod error;
mod geocode;
mod rank;
mod route;

pub use error::CliError;

const ARG_GEOCODE_QUERY: &str = "query";
const ARG_GEOCODE_LIMIT: &str = "limit";
const ARG_ROUTE_ORIGIN: &str = "origin";
const ARG_ROUTE_DESTINATION: &str = "destination";
const ARG_ROUTE_PROFILE: &str = "profile";
const ARG_ROUTE_OVERVIEW: &str = "overview";
const ARG_RANK_REQUEST: &str = "request";
const ARG_GEOCODER_URL: &str = "geocoder-url";
const ARG_ROUTING_URL: &str = "routing-url";
const ARG_USER_AGENT: &str = "user-agent";
const ARG_TIMEOUT: &str = "timeout";
const ARG_RETRY_DEADLINE: &str = "retry-deadline";
const ARG_CACHE_TTL: &str = "cache-ttl";
const ARG_CACHE_MAX_SIZE: &str = "cache-max-size";
const ENV_GEOCODE_QUERY: &str = "WAYRANK_CMDS_GEOCODE_QUERY";
const ENV_ROUTE_ORIGIN: &str = "WAYRANK_CMDS_ROUTE_ORIGIN";
const ENV_ROUTE_DESTINATION: &str = "WAYRANK_CMDS_ROUTE_DESTINATION";
const ENV_RANK_REQUEST: &str = "WAYRANK_CMDS_RANK_REQUEST_PATH";

/// Candidates returned by `geocode` when `--limit` is not given.
const DEFAULT_GEOCODE_LIMIT: u32 = 5;

/// Run the wayrank CLI with the current process arguments and environment.
///
/// # Errors
///
/// Returns [`CliError`] when arguments fail to parse, configuration cannot be
/// resolved, a provider fails, or output cannot be written.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Geocode(args) => geocode::run_geocode(args),
        Command::Route(args) => route::run_route(args),
        Command::Rank(args) => rank::run_rank(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "wayrank",
    about = "Geocode places, fetch routes and rank destinations by road distance",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Resolve free text to candidate places.
    Geocode(geocode::GeocodeArgs),
    /// Fetch a detailed route between two points.
    Route(route::RouteArgs),
    /// Rank four destinations into the shortest visiting order.
    Rank(rank::RankArgs),
}

/// Default response cache settings with any `--cache-ttl` and
/// `--cache-max-size` overrides applied.
fn cache_config(ttl_secs: Option<u64>, max_size: Option<usize>) -> CacheConfig {
    let defaults = CacheConfig::default();
    CacheConfig {
        ttl: ttl_secs.map_or(defaults.ttl, Duration::from_secs),
        max_size: max_size.unwrap_or(defaults.max_size),
    }
}

/// Pretty-print `value` as JSON followed by a newline.
fn write_json<T: serde::Serialize>(
    writer: &mut dyn std::io::Write,
    value: &T,
) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(value).map_err(CliError::SerializeOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[cfg(test)]
mod tests;
