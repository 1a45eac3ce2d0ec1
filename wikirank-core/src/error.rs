//! Error Types
//!
//! Every fallible operation in the crate returns [`GraphError`]. Lookup misses
//! on the read side are not errors: `find_*` returns `None` and the caller
//! decides what a miss means.

use thiserror::Error;

use crate::graph::{NodeIndex, PageId, PageRef};

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GraphError>;

/// Errors raised while building a page graph or computing ranks.
#[derive(Debug, Error)]
pub enum GraphError {
    /// Checked construction found a page with the same id.
    #[error("duplicate page id {0}")]
    DuplicateId(PageId),

    /// Checked construction found a page with the same name.
    #[error("duplicate page name {0:?}")]
    DuplicateName(String),

    /// A link endpoint could not be resolved.
    #[error("no page matches {0}")]
    UnknownPage(PageRef),

    /// A node index that does not belong to the current graph.
    #[error("node index {0} is not part of this graph")]
    UnknownIndex(NodeIndex),

    /// Damping factor outside `[0, 1)` or not finite.
    #[error("damping factor must be finite and in [0, 1), got {0}")]
    InvalidDamping(f64),

    /// Initial rank that is negative or not finite.
    #[error("initial rank must be finite and non-negative, got {0}")]
    InvalidInitialRank(f64),

    /// A contributor with no outgoing links was read under `DanglingPolicy::Fail`.
    #[error("page {0} contributes rank but has no outgoing links")]
    DanglingContributor(PageId),

    /// The page source failed to produce rows.
    #[error("page source failed: {0}")]
    Source(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Configuration or source JSON could not be parsed.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
