//! Route command implementation.

use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io::Write;
use std::time::Duration;
use wayrank_core::{
    CacheConfig, Overview, Point, Profile, RouteDetail, RouteProvider, RouteQuery, RouteSummary,
};
use wayrank_data::{HttpRoutingProvider, HttpRoutingProviderConfig, ResponseCache};

use crate::{
    ARG_CACHE_MAX_SIZE, ARG_CACHE_TTL, ARG_ROUTE_DESTINATION, ARG_ROUTE_ORIGIN,
    ARG_ROUTE_OVERVIEW, ARG_ROUTE_PROFILE, ARG_ROUTING_URL, ARG_TIMEOUT, ARG_USER_AGENT, CliError,
    ENV_ROUTE_DESTINATION, ENV_ROUTE_ORIGIN, cache_config, write_json,
};

/// CLI arguments for the `route` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Fetch the detailed route between two points from the \
                 routing service. Prints the raw route alternatives and a \
                 summary of the best one.",
    about = "Fetch a detailed route between two points"
)]
#[ortho_config(prefix = "WAYRANK")]
pub(crate) struct RouteArgs {
    /// Start point as `lat,lon`.
    #[arg(long = ARG_ROUTE_ORIGIN, value_name = "lat,lon", allow_hyphen_values = true)]
    #[serde(default)]
    pub(crate) origin: Option<String>,
    /// End point as `lat,lon`.
    #[arg(long = ARG_ROUTE_DESTINATION, value_name = "lat,lon", allow_hyphen_values = true)]
    #[serde(default)]
    pub(crate) destination: Option<String>,
    /// Routing profile: car, bike or foot (default car).
    #[arg(long = ARG_ROUTE_PROFILE, value_name = "profile")]
    #[serde(default)]
    pub(crate) profile: Option<Profile>,
    /// Geometry detail: full, simplified or false (default full).
    #[arg(long = ARG_ROUTE_OVERVIEW, value_name = "overview")]
    #[serde(default)]
    pub(crate) overview: Option<Overview>,
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

impl RouteArgs {
    pub(crate) fn into_config(self) -> Result<RouteConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RouteConfig::try_from(merged)
    }
}

/// Resolved `route` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RouteConfig {
    pub(crate) origin: Point,
    pub(crate) destination: Point,
    pub(crate) profile: Profile,
    pub(crate) overview: Overview,
    pub(crate) endpoint: RoutingEndpoint,
}

impl RouteConfig {
    pub(crate) const fn query(&self) -> RouteQuery {
        RouteQuery::between(&self.origin, &self.destination, self.profile, self.overview)
    }
}

impl TryFrom<RouteArgs> for RouteConfig {
    type Error = CliError;

    fn try_from(args: RouteArgs) -> Result<Self, Self::Error> {
        let origin = required_point(args.origin, ARG_ROUTE_ORIGIN, ENV_ROUTE_ORIGIN)?;
        let destination =
            required_point(args.destination, ARG_ROUTE_DESTINATION, ENV_ROUTE_DESTINATION)?;
        Ok(Self {
            origin,
            destination,
            profile: args.profile.unwrap_or_default(),
            overview: args.overview.unwrap_or_default(),
            endpoint: RoutingEndpoint::resolve(
                args.routing_url,
                args.user_agent,
                args.timeout,
                cache_config(args.cache_ttl, args.cache_max_size),
            ),
        })
    }
}

fn required_point(
    text: Option<String>,
    field: &'static str,
    env: &'static str,
) -> Result<Point, CliError> {
    let raw = text.ok_or(CliError::MissingArgument { field, env })?;
    Point::parse_lat_lon(field, &raw).map_err(|source| CliError::InvalidPoint { field, source })
}

/// Where and how to reach the routing service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RoutingEndpoint {
    pub(crate) base_url: String,
    pub(crate) user_agent: String,
    pub(crate) timeout: Duration,
    pub(crate) cache: CacheConfig,
}

impl RoutingEndpoint {
    pub(crate) fn resolve(
        base_url: Option<String>,
        user_agent: Option<String>,
        timeout_secs: Option<u64>,
        cache: CacheConfig,
    ) -> Self {
        let defaults = HttpRoutingProviderConfig::default();
        Self {
            base_url: base_url.unwrap_or(defaults.base_url),
            user_agent: user_agent.unwrap_or(defaults.user_agent),
            timeout: timeout_secs.map_or(defaults.timeout, Duration::from_secs),
            cache,
        }
    }

    pub(crate) fn connect(&self) -> Result<HttpRoutingProvider, CliError> {
        HttpRoutingProvider::with_config(
            HttpRoutingProviderConfig::new(self.base_url.clone())
                .with_user_agent(self.user_agent.clone())
                .with_timeout(self.timeout),
            ResponseCache::new(self.cache),
        )
        .map_err(|source| CliError::BuildProvider {
            base_url: self.base_url.clone(),
            source,
        })
    }
}

/// JSON document printed by `route`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct RouteOutput {
    /// Routing service response body as received.
    pub(crate) raw: Value,
    /// Headline figures for the best alternative; `null` without one.
    pub(crate) summary: Option<RouteSummary>,
}

impl From<RouteDetail> for RouteOutput {
    fn from(detail: RouteDetail) -> Self {
        let summary = detail.summary();
        Self {
            raw: detail.raw,
            summary,
        }
    }
}

/// Builds the route provider for the current invocation.
pub(crate) trait RouteProviderBuilder {
    fn build(&self, config: &RouteConfig) -> Result<Box<dyn RouteProvider>, CliError>;
}

pub(crate) struct DefaultRouteProviderBuilder;

impl RouteProviderBuilder for DefaultRouteProviderBuilder {
    fn build(&self, config: &RouteConfig) -> Result<Box<dyn RouteProvider>, CliError> {
        Ok(Box::new(config.endpoint.connect()?))
    }
}

pub(crate) fn run_route(args: RouteArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_route_with(args, &DefaultRouteProviderBuilder, &mut stdout)
}

pub(crate) fn run_route_with(
    args: RouteArgs,
    builder: &dyn RouteProviderBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    let provider = builder.build(&config)?;
    let detail = provider
        .route(&config.query())
        .map_err(|source| CliError::Route { source })?;
    write_json(writer, &RouteOutput::from(detail))
}
