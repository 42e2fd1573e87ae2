//! Response creation utilities for MCP page operations

use crate::hooks::{ContentBlock, EditOutcome};
use crate::wiki::PageRevision;
use rmcp::model::{Annotated, CallToolResult, RawContent, RawTextContent};

fn text_content(text: String) -> Annotated<RawContent> {
    Annotated::new(RawContent::Text(RawTextContent { text }), None)
}

/// Convert an [`EditOutcome`] into an MCP tool result. Each content block
/// becomes one text item; notes are prefixed so clients can render them
/// apart from the primary result.
pub fn edit_outcome_response(outcome: &EditOutcome) -> CallToolResult {
    let content = outcome
        .blocks
        .iter()
        .map(|block| match block {
            ContentBlock::Text(text) => text_content(text.clone()),
            ContentBlock::Note(note) => text_content(format!("Note: {note}")),
        })
        .collect();

    CallToolResult {
        content,
        is_error: Some(outcome.is_error),
    }
}

/// Create a response carrying a page's wikitext.
pub fn page_revision_response(page: &PageRevision) -> CallToolResult {
    CallToolResult {
        content: vec![text_content(format!(
            "{} (revision {})\n\n{}",
            page.title, page.rev_id, page.text
        ))],
        is_error: Some(false),
    }
}
