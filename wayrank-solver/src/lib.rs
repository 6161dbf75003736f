//! Exhaustive destination ranking for wayrank.
//!
//! This crate provides [`BruteForceRanker`], the implementation of the
//! [`Ranker`](wayrank_core::Ranker) trait. It fetches one cost table for the
//! origin and four destinations, scores all 24 visiting orders in
//! lexicographic order, keeps the cheapest by total distance and then
//! reconstructs per-leg detail from a route provider.

#![forbid(unsafe_code)]

mod legs;
mod permutations;
mod ranker;
mod search;

pub use ranker::BruteForceRanker;
