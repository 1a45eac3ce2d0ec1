//! Graph Nodes
//!
//! This module defines the page node that lives in the page graph, along with
//! the identifier types used to address it.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::{GraphError, Result};
use crate::rank::DanglingPolicy;

/// Rank assigned to a freshly created node.
pub const DEFAULT_INITIAL_RANK: f64 = 1.0;

/// Tolerance used by [`Node::rank_within_default_tolerance`].
pub const DEFAULT_TOLERANCE: f64 = 1e-7;

/// External page identifier, as stored by the wiki.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageId(i64);

impl PageId {
    /// Get the raw ID value.
    pub fn raw(&self) -> i64 {
        self.0
    }
}

impl From<i64> for PageId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<i32> for PageId {
    fn from(id: i32) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Slot of a node in the graph's arena.
///
/// Indices stay valid until the graph is cleared. Sorting by rank reorders
/// the collection, never the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIndex(usize);

impl NodeIndex {
    pub(crate) fn new(slot: usize) -> Self {
        Self(slot)
    }

    /// Position of the node in the arena.
    pub fn slot(&self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A page reference, either by numeric id or by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PageRef {
    Id(PageId),
    Name(String),
}

impl From<PageId> for PageRef {
    fn from(id: PageId) -> Self {
        Self::Id(id)
    }
}

impl From<i64> for PageRef {
    fn from(id: i64) -> Self {
        Self::Id(PageId(id))
    }
}

impl From<i32> for PageRef {
    fn from(id: i32) -> Self {
        Self::Id(id.into())
    }
}

impl From<&str> for PageRef {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for PageRef {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl fmt::Display for PageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "id {}", id),
            Self::Name(name) => write!(f, "name {:?}", name),
        }
    }
}

/// Adjacency list. Most wiki pages have a handful of links.
pub type Links = SmallVec<[NodeIndex; 4]>;

/// A page in the graph.
#[derive(Debug, Clone)]
pub struct Node {
    /// External identifier. Immutable once created.
    id: PageId,

    /// Page title.
    name: String,

    /// Current PageRank score.
    rank: f64,

    /// Pages this page links to, in insertion order. Duplicates allowed.
    outgoing: Links,

    /// Pages linking to this page. Mirrors `outgoing` on the other side.
    incoming: Links,
}

impl Node {
    /// Create a node with no links.
    pub fn new(id: PageId, name: impl Into<String>, initial_rank: f64) -> Self {
        Self {
            id,
            name: name.into(),
            rank: initial_rank,
            outgoing: Links::new(),
            incoming: Links::new(),
        }
    }

    /// Get the page ID.
    pub fn id(&self) -> PageId {
        self.id
    }

    /// Get the page name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the current rank.
    pub fn rank(&self) -> f64 {
        self.rank
    }

    pub(crate) fn set_rank(&mut self, rank: f64) {
        self.rank = rank;
    }

    pub fn outgoing(&self) -> &[NodeIndex] {
        &self.outgoing
    }

    pub fn incoming(&self) -> &[NodeIndex] {
        &self.incoming
    }

    /// Number of outgoing links, counting duplicates.
    pub fn out_degree(&self) -> usize {
        self.outgoing.len()
    }

    pub fn in_degree(&self) -> usize {
        self.incoming.len()
    }

    pub(crate) fn push_outgoing(&mut self, target: NodeIndex) {
        self.outgoing.push(target);
    }

    pub(crate) fn push_incoming(&mut self, source: NodeIndex) {
        self.incoming.push(source);
    }

    /// Compute this node's next rank without mutating anything.
    ///
    /// `contributor` maps each incoming index to that page's `(id, rank, out_degree)`.
    /// Whether it reads the previous round's snapshot or live ranks is up to
    /// the caller.
    ///
    /// `next = (1 - d) + d * sum(rank(p) / out_degree(p))` over incoming `p`.
    pub fn next_rank<F>(&self, damping: f64, dangling: DanglingPolicy, contributor: F) -> Result<f64>
    where
        F: Fn(NodeIndex) -> (PageId, f64, usize),
    {
        let mut sum = 0.0;
        for &source in &self.incoming {
            let (source_id, rank, out_degree) = contributor(source);
            let share = match (out_degree, dangling) {
                (0, DanglingPolicy::ZeroContribution) => 0.0,
                (0, DanglingPolicy::SelfLoop) => rank,
                (0, DanglingPolicy::Fail) => {
                    return Err(GraphError::DanglingContributor(source_id));
                }
                (degree, _) => rank / degree as f64,
            };
            sum += share;
        }

        Ok((1.0 - damping) + damping * sum)
    }

    /// Check whether the rank is within `epsilon` of `expected`.
    pub fn rank_within_tolerance(&self, expected: f64, epsilon: f64) -> bool {
        (self.rank - expected).abs() < epsilon
    }

    pub fn rank_within_default_tolerance(&self, expected: f64) -> bool {
        self.rank_within_tolerance(expected, DEFAULT_TOLERANCE)
    }

    /// Order by rank, highest first. Equal ranks compare equal so a stable
    /// sort keeps their relative order.
    pub fn cmp_by_rank_desc(&self, other: &Self) -> Ordering {
        other.rank.total_cmp(&self.rank)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: i64, name: &str) -> Node {
        Node::new(PageId::from(id), name, DEFAULT_INITIAL_RANK)
    }

    #[test]
    fn new_node_has_default_rank_and_no_links() {
        let n = node(7, "Main_Page");
        assert_eq!(n.id().raw(), 7);
        assert_eq!(n.name(), "Main_Page");
        assert_eq!(n.rank(), 1.0);
        assert!(n.outgoing().is_empty());
        assert!(n.incoming().is_empty());
    }

    #[test]
    fn next_rank_without_incoming_is_base() {
        let n = node(1, "A");
        let rank = n
            .next_rank(0.85, DanglingPolicy::ZeroContribution, |_| unreachable!())
            .unwrap();
        assert!((rank - 0.15).abs() < 1e-12);
    }

    #[test]
    fn next_rank_splits_contributor_rank_by_out_degree() {
        let mut n = node(1, "A");
        n.push_incoming(NodeIndex::new(1));
        n.push_incoming(NodeIndex::new(2));

        let rank = n
            .next_rank(0.85, DanglingPolicy::ZeroContribution, |idx| match idx.slot() {
                1 => (PageId::from(2), 1.0, 2),
                _ => (PageId::from(3), 0.5, 1),
            })
            .unwrap();

        // 0.15 + 0.85 * (0.5 + 0.5)
        assert!((rank - 1.0).abs() < 1e-12);
    }

    #[test]
    fn dangling_policies() {
        let mut n = node(1, "A");
        n.push_incoming(NodeIndex::new(1));
        let dangling = |_| (PageId::from(2), 1.0, 0);

        let zero = n.next_rank(0.5, DanglingPolicy::ZeroContribution, dangling).unwrap();
        assert!((zero - 0.5).abs() < 1e-12);

        let self_loop = n.next_rank(0.5, DanglingPolicy::SelfLoop, dangling).unwrap();
        assert!((self_loop - 1.0).abs() < 1e-12);

        let err = n.next_rank(0.5, DanglingPolicy::Fail, dangling).unwrap_err();
        assert!(matches!(err, GraphError::DanglingContributor(id) if id.raw() == 2));
    }

    #[test]
    fn tolerance_check() {
        let mut n = node(1, "A");
        n.set_rank(0.2608696295025553);
        assert!(n.rank_within_default_tolerance(0.26086956));
        assert!(!n.rank_within_default_tolerance(0.2609));
        assert!(n.rank_within_tolerance(0.2609, 1e-4));
    }

    #[test]
    fn rank_ordering_is_descending() {
        let mut high = node(1, "high");
        high.set_rank(2.0);
        let low = node(2, "low");

        assert_eq!(high.cmp_by_rank_desc(&low), Ordering::Less);
        assert_eq!(low.cmp_by_rank_desc(&high), Ordering::Greater);
        assert_eq!(low.cmp_by_rank_desc(&node(3, "tie")), Ordering::Equal);
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn node_index_keeps_slots_past_u32() {
        let slot = u32::MAX as usize + 1;
        assert_eq!(NodeIndex::new(slot).slot(), slot);
        assert_ne!(NodeIndex::new(slot), NodeIndex::new(0));
    }

    #[test]
    fn page_ref_conversions() {
        assert_eq!(PageRef::from(3), PageRef::Id(PageId::from(3)));
        assert_eq!(PageRef::from("A"), PageRef::Name("A".to_string()));
        assert_eq!(PageRef::from(3).to_string(), "id 3");
    }
}
