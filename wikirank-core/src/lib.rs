//! Wikirank Core
//!
//! This crate computes PageRank scores for the pages of a wiki from its link
//! structure. It implements:
//!
//! - An in-memory page graph with id and name lookup
//! - Fixed-iteration damped PageRank with synchronous or sequential rounds
//! - Ranked reports of the result
//! - Loading a graph from page and link rows
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - `graph`: Page nodes and the arena that owns them
//! - `rank`: Rank configuration, the round engine, and reports
//! - `loader`: Turning store rows into graph construction calls
//! - `error`: The crate error type
//!
//! # Example
//!
//! ```rust
//! use wikirank_core::graph::PageGraph;
//! use wikirank_core::rank::RankConfig;
//!
//! let mut graph = PageGraph::new();
//! let a = graph.add_node(1, "A");
//! let b = graph.add_node(2, "B");
//! graph.add_link(a, b).unwrap();
//! graph.add_link(b, a).unwrap();
//!
//! let report = graph.compute_all_ranks(10, &RankConfig::default()).unwrap();
//! for (name, rank) in report.name_ranks() {
//!     assert!((rank - 1.0).abs() < 1e-7, "{name}");
//! }
//! ```

pub mod error;
pub mod graph;
pub mod loader;
pub mod rank;

pub use error::{GraphError, Result};
pub use graph::{Node, NodeIndex, PageGraph, PageId, PageRef};
pub use loader::{load_graph, LoadSummary, MemorySource, PageSource};
pub use rank::{DanglingPolicy, RankConfig, RankReport, UpdateSchedule};
