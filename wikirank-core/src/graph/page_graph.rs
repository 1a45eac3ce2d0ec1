//! Page Graph
//!
//! The page graph owns every node and drives rank computation.
//!
//! # Layout
//!
//! Nodes live in an arena and are addressed by [`NodeIndex`]. Links are
//! index pairs stored on both endpoints, so there are no mutual references
//! between nodes and no shared ownership.
//!
//! The collection order (what `nodes()` and reports walk) is kept separately
//! from the arena. It starts as insertion order and becomes rank order after
//! a computation, while indices handed out earlier stay valid.
//!
//! Lookup by id or name returns the first match in collection order. The
//! indexes below are rebuilt whenever that order changes so they always
//! agree with a linear scan.

use indexmap::IndexMap;
use tracing::debug;

use super::node::{Node, NodeIndex, PageId, PageRef, DEFAULT_INITIAL_RANK};
use crate::error::{GraphError, Result};
use crate::rank::{self, RankConfig, RankReport, RankedPage};

/// The page graph. Append-only until cleared.
#[derive(Debug, Clone)]
pub struct PageGraph {
    /// All nodes, indexed by [`NodeIndex`].
    arena: Vec<Node>,

    /// Collection order.
    order: Vec<NodeIndex>,

    /// First node in collection order for each id.
    by_id: IndexMap<PageId, NodeIndex>,

    /// First node in collection order for each name.
    by_name: IndexMap<String, NodeIndex>,

    /// Rank given to new nodes and restored by `reset_ranks`.
    initial_rank: f64,
}

impl PageGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::empty(DEFAULT_INITIAL_RANK)
    }

    /// Create an empty graph whose nodes start at `initial_rank`.
    ///
    /// The rank must be finite and non-negative, otherwise rounds can produce
    /// negative or NaN ranks.
    pub fn with_initial_rank(initial_rank: f64) -> Result<Self> {
        if initial_rank.is_finite() && initial_rank >= 0.0 {
            Ok(Self::empty(initial_rank))
        } else {
            Err(GraphError::InvalidInitialRank(initial_rank))
        }
    }

    fn empty(initial_rank: f64) -> Self {
        Self {
            arena: Vec::new(),
            order: Vec::new(),
            by_id: IndexMap::new(),
            by_name: IndexMap::new(),
            initial_rank,
        }
    }

    /// Drop every node and link.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.order.clear();
        self.by_id.clear();
        self.by_name.clear();
    }

    /// Get the total number of nodes in the graph.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn initial_rank(&self) -> f64 {
        self.initial_rank
    }

    /// Append a node.
    ///
    /// Ids and names are not checked. A duplicate becomes a distinct node
    /// that lookups will not return while an earlier match exists.
    pub fn add_node(&mut self, id: impl Into<PageId>, name: impl Into<String>) -> NodeIndex {
        let id = id.into();
        let name = name.into();
        let idx = NodeIndex::new(self.arena.len());

        self.by_id.entry(id).or_insert(idx);
        self.by_name.entry(name.clone()).or_insert(idx);
        self.arena.push(Node::new(id, name, self.initial_rank));
        self.order.push(idx);
        idx
    }

    /// Append a node, rejecting duplicate ids and names.
    pub fn try_add_node(&mut self, id: impl Into<PageId>, name: impl Into<String>) -> Result<NodeIndex> {
        let id = id.into();
        let name = name.into();
        if self.by_id.contains_key(&id) {
            return Err(GraphError::DuplicateId(id));
        }
        if self.by_name.contains_key(&name) {
            return Err(GraphError::DuplicateName(name));
        }
        Ok(self.add_node(id, name))
    }

    /// Add a link from `from` to `to`, updating both sides.
    ///
    /// Self-links and repeated links are kept; each entry counts toward the
    /// source's out-degree.
    pub fn add_link(&mut self, from: NodeIndex, to: NodeIndex) -> Result<()> {
        for idx in [from, to] {
            if idx.slot() >= self.arena.len() {
                return Err(GraphError::UnknownIndex(idx));
            }
        }
        self.arena[from.slot()].push_outgoing(to);
        self.arena[to.slot()].push_incoming(from);
        Ok(())
    }

    /// Resolve both ends and add a link between them.
    pub fn link_pages(&mut self, from: &PageRef, to: &PageRef) -> Result<()> {
        let source = self.find(from).ok_or_else(|| GraphError::UnknownPage(from.clone()))?;
        let target = self.find(to).ok_or_else(|| GraphError::UnknownPage(to.clone()))?;
        self.add_link(source, target)
    }

    /// First node with the given id.
    pub fn find_by_id(&self, id: impl Into<PageId>) -> Option<NodeIndex> {
        self.by_id.get(&id.into()).copied()
    }

    /// First node with the given name.
    pub fn find_by_name(&self, name: &str) -> Option<NodeIndex> {
        self.by_name.get(name).copied()
    }

    pub fn find(&self, page: &PageRef) -> Option<NodeIndex> {
        match page {
            PageRef::Id(id) => self.find_by_id(*id),
            PageRef::Name(name) => self.find_by_name(name),
        }
    }

    /// Get a reference to a node.
    pub fn node(&self, idx: NodeIndex) -> Option<&Node> {
        self.arena.get(idx.slot())
    }

    /// Look a page up and return its node.
    pub fn page(&self, page: &PageRef) -> Option<&Node> {
        self.find(page).and_then(|idx| self.node(idx))
    }

    /// Nodes in collection order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.order.iter().map(|idx| &self.arena[idx.slot()])
    }

    /// Put every rank back to the initial rank.
    pub fn reset_ranks(&mut self) {
        for node in &mut self.arena {
            node.set_rank(self.initial_rank);
        }
    }

    /// Sum of all ranks.
    pub fn total_rank(&self) -> f64 {
        rank::total_rank(&self.arena)
    }

    /// Run `iterations` update rounds, then order the collection by rank,
    /// highest first.
    ///
    /// Ranks carry over from any previous computation; call
    /// [`reset_ranks`](Self::reset_ranks) to start over. On error the ranks
    /// and order are unchanged.
    pub fn compute_all_ranks(&mut self, iterations: usize, config: &RankConfig) -> Result<RankReport> {
        rank::run_rounds(&mut self.arena, &self.order, iterations, config)?;
        self.sort_by_rank();
        Ok(self.report_with_iterations(iterations))
    }

    /// Report of the current collection order, without computing anything.
    pub fn report(&self) -> RankReport {
        self.report_with_iterations(0)
    }

    fn report_with_iterations(&self, iterations: usize) -> RankReport {
        let pages = self
            .nodes()
            .map(|node| RankedPage {
                id: node.id(),
                name: node.name().to_string(),
                rank: node.rank(),
            })
            .collect();
        RankReport::new(pages, iterations)
    }

    /// Stable sort of the collection by rank, descending.
    fn sort_by_rank(&mut self) {
        let arena = &self.arena;
        self.order
            .sort_by(|a, b| arena[a.slot()].cmp_by_rank_desc(&arena[b.slot()]));
        self.rebuild_indexes();
        debug!(nodes = self.order.len(), "sorted pages by rank");
    }

    fn rebuild_indexes(&mut self) {
        self.by_id.clear();
        self.by_name.clear();
        for &idx in &self.order {
            let node = &self.arena[idx.slot()];
            self.by_id.entry(node.id()).or_insert(idx);
            if !self.by_name.contains_key(node.name()) {
                self.by_name.insert(node.name().to_string(), idx);
            }
        }
    }
}

impl Default for PageGraph {
    fn default() -> Self {
        Self::new()
    }
}
