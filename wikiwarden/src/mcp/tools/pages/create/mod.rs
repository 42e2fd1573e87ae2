//! Page creation tool for MCP operations

use crate::hooks::{EditContext, EditOperation, EditOutcome};
use crate::mcp::responses::edit_outcome_response;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::mcp::types::CreatePageRequest;
use crate::mcp::{map_pipeline_error, validate_not_empty};
use crate::wiki::SavePage;
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;

/// Tool for creating new pages
#[derive(Default)]
pub struct CreatePageTool;

impl CreatePageTool {
    /// Creates a new instance of the CreatePageTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for CreatePageTool {
    fn name(&self) -> &'static str {
        "page_create"
    }

    fn description(&self) -> &'static str {
        "Create a new wiki page. New factual claims are flagged as proposed pending human review."
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "title": {
                    "type": "string",
                    "description": "Title of the page to create"
                },
                "text": {
                    "type": "string",
                    "description": "Wikitext content of the page"
                },
                "comment": {
                    "type": ["string", "null"],
                    "description": "Optional edit summary"
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
        let request: CreatePageRequest = BaseToolImpl::parse_arguments(arguments)?;
        validate_not_empty(&request.title, "page title")?;
        validate_not_empty(&request.text, "page text")?;

        tracing::debug!(title = %request.title, "creating page");

        let edit = EditContext {
            operation: EditOperation::Create,
            title: request.title,
            text: request.text,
            comment: request.comment,
            base_revision: None,
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
                base_revision: None,
                create_only: true,
            })
            .await
        {
            Ok(saved) => {
                tracing::info!(title = %saved.title, rev = ?saved.new_rev_id, "created page");
                EditOutcome::success(format!(
                    "Created page '{}' (revision {})",
                    saved.title,
                    saved
                        .new_rev_id
                        .map(|rev| rev.to_string())
                        .unwrap_or_else(|| "unknown".to_string())
                ))
            }
            Err(error) => {
                tracing::error!(title = %edit.title, %error, "page creation failed");
                EditOutcome::failure(error.to_string())
            }
        };

        let outcome = context.hooks.after_edit(&edit, outcome).await;
        Ok(edit_outcome_response(&outcome))
    }
}
