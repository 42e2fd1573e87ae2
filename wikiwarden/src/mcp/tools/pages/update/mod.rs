//! Page update tool for MCP operations

use crate::hooks::{EditContext, EditOperation, EditOutcome};
use crate::mcp::responses::edit_outcome_response;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::mcp::types::UpdatePageRequest;
use crate::mcp::{map_pipeline_error, validate_not_empty};
use crate::wiki::SavePage;
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;

/// Tool for updating existing pages
#[derive(Default)]
pub struct UpdatePageTool;

impl UpdatePageTool {
    /// Creates a new instance of the UpdatePageTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for UpdatePageTool {
    fn name(&self) -> &'static str {
        "page_update"
    }

    fn description(&self) -> &'static str {
        "Replace a wiki page's content. Content already present in the base revision passes \
         through unchanged; new claims are flagged as proposed pending human review."
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "title": {
                    "type": "string",
                    "description": "Title of the page to update"
                },
                "text": {
                    "type": "string",
                    "description": "Replacement wikitext for the page"
                },
                "comment": {
                    "type": ["string", "null"],
                    "description": "Optional edit summary"
                },
                "base_revision": {
                    "type": ["integer", "null"],
                    "description": "Revision id the edit is based on"
                }
            },
            "required": ["title", "text"]
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: UpdatePageRequest = BaseToolImpl::parse_arguments(arguments)?;
        validate_not_empty(&request.title, "page title")?;

        tracing::debug!(title = %request.title, base = ?request.base_revision, "updating page");

        let edit = EditContext {
            operation: EditOperation::Update,
            title: request.title,
            text: request.text,
            comment: request.comment,
            base_revision: request.base_revision,
        };
        let edit = context
            .hooks
            .before_edit(edit)
            .await
            .map_err(map_pipeline_error)?;

        let outcome = match context
            .backend
            .save_page(SavePage {
                title: edit.title.clone(),
                text: edit.text.clone(),
                comment: edit.comment.clone(),
                base_revision: edit.base_revision,
                create_only: false,
            })
            .await
        {
            Ok(saved) => {
                tracing::info!(title = %saved.title, rev = ?saved.new_rev_id, "updated page");
                EditOutcome::success(format!(
                    "Updated page '{}' (revision {})",
                    saved.title,
                    saved
                        .new_rev_id
                        .map(|rev| rev.to_string())
                        .unwrap_or_else(|| "unchanged".to_string())
                ))
            }
            Err(error) => {
                tracing::error!(title = %edit.title, %error, "page update failed");
                EditOutcome::failure(error.to_string())
            }
        };

        let outcome = context.hooks.after_edit(&edit, outcome).await;
        Ok(edit_outcome_response(&outcome))
    }
}
