//! Wiki backend abstraction.
//!
//! The rest of the crate talks to the wiki through [`WikiBackend`]; the
//! transform layer never performs network I/O itself. [`HttpWikiBackend`]
//! speaks the MediaWiki action API; [`MemoryWiki`] is an in-process
//! implementation used by tests and diagnostics.

pub mod http;
pub mod memory;

pub use http::HttpWikiBackend;
pub use memory::MemoryWiki;

use async_trait::async_trait;

use crate::error::Result;

/// A page's content at a specific revision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRevision {
    /// Page title.
    pub title: String,
    /// Revision identifier.
    pub rev_id: u64,
    /// Raw wikitext of the revision.
    pub text: String,
}

/// Outcome of a successful page write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedPage {
    /// Page title as normalized by the backend.
    pub title: String,
    /// Page identifier.
    pub page_id: u64,
    /// Revision created by the write; absent for a null edit.
    pub new_rev_id: Option<u64>,
    /// True when the write created the page.
    pub new_page: bool,
}

/// Parameters for a page write.
#[derive(Debug, Clone)]
pub struct SavePage {
    /// Page title.
    pub title: String,
    /// Full replacement wikitext.
    pub text: String,
    /// Edit summary.
    pub comment: Option<String>,
    /// Revision the edit was based on; lets the backend detect conflicts.
    pub base_revision: Option<u64>,
    /// Fail if the page already exists.
    pub create_only: bool,
}

/// The external wiki collaborator: revision reads and page writes.
///
/// Implementations own all transport concerns. Conflict detection for
/// concurrent edits to the same page is the backend's responsibility, not
/// this crate's.
#[async_trait]
pub trait WikiBackend: Send + Sync {
    /// Fetch the raw wikitext of a single revision.
    async fn fetch_revision(&self, rev_id: u64) -> Result<String>;

    /// Fetch the latest revision of a page by title.
    async fn fetch_page(&self, title: &str) -> Result<PageRevision>;

    /// Create or replace a page.
    async fn save_page(&self, request: SavePage) -> Result<SavedPage>;
}
