//! PageRank Computation
//!
//! This module implements fixed-iteration damped PageRank over a
//! [`PageGraph`](crate::graph::PageGraph).
//!
//! # Update Rule
//!
//! Each round, every page gets
//!
//! ```text
//! rank(p) = (1 - d) + d * sum(rank(q) / out_degree(q)) for q linking to p
//! ```
//!
//! Ranks start at 1.0 and are not normalized, so the sum of all ranks is
//! whatever the graph makes it.
//!
//! # Iteration Count
//!
//! There is no tolerance-based stopping rule. The caller picks the number of
//! rounds; [`Node::rank_within_tolerance`](crate::graph::Node::rank_within_tolerance)
//! exists for verification only.

mod config;
mod engine;
mod report;

pub use config::{DanglingPolicy, RankConfig, UpdateSchedule, DEFAULT_DAMPING};
pub use report::{RankReport, RankedPage};

pub(crate) use engine::{run_rounds, total_rank};
