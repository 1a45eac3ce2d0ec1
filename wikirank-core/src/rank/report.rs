//! Rank Report
//!
//! The output handed to presenters after a computation: pages in collection
//! order (rank descending once computed) plus the sum of all ranks.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::graph::PageId;

/// One reported page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedPage {
    pub id: PageId,
    pub name: String,
    pub rank: f64,
}

/// Ranked pages and their total.
///
/// The total is a recorded value, not a conserved quantity: with the
/// `(1 - d)` base term it does not in general equal the node count.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RankReport {
    pub pages: Vec<RankedPage>,
    pub total: f64,
    /// Rounds run by the computation that produced this report.
    pub iterations: usize,
}

impl RankReport {
    pub(crate) fn new(pages: Vec<RankedPage>, iterations: usize) -> Self {
        let total = pages.iter().map(|p| p.rank).sum();
        Self {
            pages,
            total,
            iterations,
        }
    }

    /// First `n` pages.
    pub fn top(&self, n: usize) -> &[RankedPage] {
        &self.pages[..n.min(self.pages.len())]
    }

    /// Whether every adjacent pair is in non-increasing rank order.
    pub fn is_sorted_desc(&self) -> bool {
        self.pages.windows(2).all(|w| w[0].rank >= w[1].rank)
    }

    /// `(name, rank)` pairs in report order.
    pub fn name_ranks(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.pages.iter().map(|p| (p.name.as_str(), p.rank))
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for RankReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for page in &self.pages {
            writeln!(f, "PageRank for {} is {}", page.name, page.rank)?;
        }
        write!(f, "Sum of all PageRanks: {}", self.total)
    }
}
