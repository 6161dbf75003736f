//! Test helpers for writing request files and stubbing providers.

use super::*;
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use tempfile::TempDir;
use wayrank_core::test_support::{StubRouteProvider, TableMatrixProvider};
use wayrank_core::{Ranker, RouteProvider};
use wayrank_solver::BruteForceRanker;

use crate::rank::{RankConfig, RankerBuilder};
use crate::route::{RouteConfig, RouteProviderBuilder};

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    fs::write(path, contents).expect("write file");
}

/// Temporary directory with a UTF-8 path.
pub(super) struct Workspace {
    _dir: TempDir,
    pub(super) root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self { _dir: dir, root }
    }

    pub(super) fn write(&self, name: &str, contents: &str) -> Utf8PathBuf {
        let path = self.root.join(name);
        write_utf8(&path, contents.as_bytes());
        path
    }
}

pub(super) const FOUR_DESTINATIONS: &str = r#"{
    "origin": "35.6892,51.3890",
    "destinations": [
        "35.7000,51.4000",
        {"lat": 35.7100, "lon": 51.4100, "label": "Bazaar"},
        "35.7200,51.4200",
        "35.7300,51.4300"
    ]
}"#;

/// Ranker over a uniform table and an always-answering route service.
pub(super) struct StubRankerBuilder;

impl RankerBuilder for StubRankerBuilder {
    fn build(&self, _config: &RankConfig) -> Result<Box<dyn Ranker>, CliError> {
        Ok(Box::new(BruteForceRanker::new(
            TableMatrixProvider::uniform(5, 1000.0),
            StubRouteProvider::new(1000.0, 60.0),
        )))
    }
}

/// Builder that must never be reached.
pub(super) struct UnreachableRankerBuilder;

impl RankerBuilder for UnreachableRankerBuilder {
    fn build(&self, _config: &RankConfig) -> Result<Box<dyn Ranker>, CliError> {
        panic!("ranker should not be built for an invalid request");
    }
}

pub(super) struct StubRouteProviderBuilder {
    pub(super) distance_m: f64,
    pub(super) duration_s: f64,
}

impl RouteProviderBuilder for StubRouteProviderBuilder {
    fn build(&self, _config: &RouteConfig) -> Result<Box<dyn RouteProvider>, CliError> {
        Ok(Box::new(StubRouteProvider::new(
            self.distance_m,
            self.duration_s,
        )))
    }
}
