//! Request types for MCP page operations

use serde::Deserialize;

/// Request to create a new page
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CreatePageRequest {
    /// Title of the page to create
    pub title: String,
    /// Wikitext content of the page
    pub text: String,
    /// Optional edit summary
    pub comment: Option<String>,
}

/// Request to update an existing page
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct UpdatePageRequest {
    /// Title of the page to update
    pub title: String,
    /// Replacement wikitext for the page
    pub text: String,
    /// Optional edit summary
    pub comment: Option<String>,
    /// Revision id the edit is based on; enables conflict detection and
    /// lets unchanged content pass through unflagged
    pub base_revision: Option<u64>,
}

/// Request to read a page's current wikitext
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetPageRequest {
    /// Title of the page to fetch
    pub title: String,
}
