//! Error types emitted by the wayrank CLI.
//!
//! Keep this error type reasonably small, as every command helper returns
//! `Result<_, CliError>`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use thiserror::Error;
use wayrank_core::{PointError, ProviderError, RankError};
use wayrank_data::ProviderBuildError;

/// Errors emitted by the wayrank CLI.
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
        field: &'static str,
        env: &'static str,
    },
    /// A `lat,lon` option did not describe a valid point.
    #[error("invalid {field}: {source}")]
    InvalidPoint {
        field: &'static str,
        #[source]
        source: PointError,
    },
    /// Opening the rank request file failed.
    #[error("failed to open rank request at {path:?}: {source}")]
    OpenRankRequest {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Rank request JSON could not be decoded.
    #[error("failed to parse rank request JSON at {path:?}: {source}")]
    ParseRankRequest {
        path: Utf8PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// The rank request payload failed validation.
    #[error("rank request in {path:?} failed validation: {source}")]
    InvalidRankRequest {
        path: Utf8PathBuf,
        #[source]
        source: RankError,
    },
    /// Constructing an HTTP provider failed.
    #[error("failed to build provider for {base_url:?}: {source}")]
    BuildProvider {
        base_url: String,
        #[source]
        source: ProviderBuildError,
    },
    /// The geocoding service failed.
    #[error("geocoding failed: {source}")]
    Geocode { source: ProviderError },
    /// The routing service failed.
    #[error("routing failed: {source}")]
    Route { source: ProviderError },
    /// The ranker rejected or could not complete the request.
    #[error("ranking failed: {source}")]
    Rank { source: RankError },
    /// Serializing command output failed.
    #[error("failed to serialize output: {0}")]
    SerializeOutput(#[source] serde_json::Error),
    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
