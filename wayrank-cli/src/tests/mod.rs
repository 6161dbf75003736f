//! Shared test harness modules for the wayrank CLI.
#![expect(
    clippy::panic,
    reason = "Tests assert panic branches to surface unexpected CLI outcomes"
)]

use super::*;

mod geocode_unit;
mod helpers;
