//! Graph Loading
//!
//! Populates a [`PageGraph`] from page and link rows in the shape a wiki
//! database stores them: pages as `(page_id, page_title)` and links as
//! `(pl_from, pl_title)`, i.e. the source by id and the target by title.
//!
//! Reading the actual store is left to [`PageSource`] implementations. This
//! module only turns rows into graph construction calls, skipping rows that
//! cannot be resolved.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{GraphError, Result};
use crate::graph::{PageGraph, PageId};

/// Boxed error returned by page sources.
pub type SourceError = Box<dyn std::error::Error + Send + Sync>;

/// A page row. Either column may be null in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRow {
    pub id: Option<i64>,
    pub title: Option<String>,
}

impl PageRow {
    pub fn new(id: i64, title: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            title: Some(title.into()),
        }
    }
}

/// A link row: source page id and target page title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRow {
    pub from: i64,
    pub to_title: String,
}

impl LinkRow {
    pub fn new(from: i64, to_title: impl Into<String>) -> Self {
        Self {
            from,
            to_title: to_title.into(),
        }
    }
}

/// Something that can produce page and link rows.
pub trait PageSource {
    /// All page rows.
    fn pages(&self) -> std::result::Result<Vec<PageRow>, SourceError>;

    /// All link rows.
    fn links(&self) -> std::result::Result<Vec<LinkRow>, SourceError>;
}

/// Rows held in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemorySource {
    #[serde(default)]
    pub pages: Vec<PageRow>,
    #[serde(default)]
    pub links: Vec<LinkRow>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, id: i64, title: impl Into<String>) -> Self {
        self.pages.push(PageRow::new(id, title));
        self
    }

    pub fn link(mut self, from: i64, to_title: impl Into<String>) -> Self {
        self.links.push(LinkRow::new(from, to_title));
        self
    }

    /// Parse rows from JSON: `{"pages": [...], "links": [...]}`.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl PageSource for MemorySource {
    fn pages(&self) -> std::result::Result<Vec<PageRow>, SourceError> {
        Ok(self.pages.clone())
    }

    fn links(&self) -> std::result::Result<Vec<LinkRow>, SourceError> {
        Ok(self.links.clone())
    }
}

/// What a load did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadSummary {
    pub pages: usize,
    pub links: usize,
    /// Page rows with a null id or title.
    pub skipped_pages: usize,
    /// Link rows whose source id or target title matched no page.
    pub skipped_links: usize,
}

/// Replace the contents of `graph` with the rows from `source`.
///
/// Pages go through checked construction, so a repeated id or title fails
/// the load with [`GraphError::DuplicateId`] or [`GraphError::DuplicateName`].
/// On error the graph may be partially loaded.
pub fn load_graph<S: PageSource + ?Sized>(graph: &mut PageGraph, source: &S) -> Result<LoadSummary> {
    let pages = source.pages().map_err(GraphError::Source)?;
    let links = source.links().map_err(GraphError::Source)?;

    graph.clear();
    let mut summary = LoadSummary::default();

    for row in pages {
        match row {
            PageRow {
                id: Some(id),
                title: Some(title),
            } => {
                graph.try_add_node(id, title)?;
                summary.pages += 1;
            }
            row => {
                warn!(?row, "skipping page row with missing columns");
                summary.skipped_pages += 1;
            }
        }
    }

    for row in links {
        let from = graph.find_by_id(PageId::from(row.from));
        let to = graph.find_by_name(&row.to_title);
        match (from, to) {
            (Some(from), Some(to)) => {
                graph.add_link(from, to)?;
                summary.links += 1;
            }
            _ => {
                debug!(from = row.from, to = %row.to_title, "skipping unresolved link");
                summary.skipped_links += 1;
            }
        }
    }

    info!(
        pages = summary.pages,
        links = summary.links,
        skipped_pages = summary.skipped_pages,
        skipped_links = summary.skipped_links,
        "loaded page graph"
    );
    Ok(summary)
}
