//! Developer portfolio
//!
//! # Overview
//!
//! Builds a report row per user of a source code hosting platform: public repository count, followers,
//! forks summed over all of the user's repositories and distribution of languages used in them.
//!
//! Languages are merged over all repositories of a user into a single tally of bytes per language.
//! The tally is ranked by byte count and the top `k` languages (5 by default) are reported with their share
//! of all bytes, followed by the `Other` share of the remaining languages.
//! Users whose repositories report no language bytes get a single `no language data` entry.
//!
//! With the `calculator` feature, reports of many users are fetched concurrently through an `api::Client`
//! and streamed in the order the users were given. A user whose data could not be fetched is reported
//! as failed without affecting the others.

pub mod aggregator;
pub mod api;
#[cfg(feature = "calculator")]
pub mod calculator;

pub use aggregator::{DistributionEntry, RepoStats, UserReport};
#[cfg(feature = "calculator")]
pub use calculator::{PortfolioCalculator, PortfolioStream, UserOutcome};
