//! Page Graph
//!
//! This module implements the in-memory directed graph of wiki pages.
//!
//! # Overview
//!
//! - Nodes represent pages: an external id, a title, and a current rank
//! - Edges represent links: if page A links to page B, there is an edge from A to B
//!
//! # Design Decisions
//!
//! 1. Nodes live in an arena addressed by [`NodeIndex`] rather than pointing
//!    at each other. Links form cycles all the time in a wiki, and index
//!    pairs keep ownership flat.
//!
//! 2. Each node stores both outgoing and incoming links. Outgoing links give
//!    the out-degree a page divides its rank by; incoming links are what a
//!    page sums over during its own update.
//!
//! 3. Lookup by id and by name are separate operations ([`PageGraph::find_by_id`],
//!    [`PageGraph::find_by_name`]), with [`PageRef`] for callers that carry
//!    either.

mod node;
mod page_graph;

pub use node::{Links, Node, NodeIndex, PageId, PageRef, DEFAULT_INITIAL_RANK, DEFAULT_TOLERANCE};
pub use page_graph::PageGraph;
