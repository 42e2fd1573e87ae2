//! Page read tool for MCP operations

use crate::mcp::responses::page_revision_response;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::mcp::types::GetPageRequest;
use crate::mcp::{map_backend_error, validate_not_empty};
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;

/// Tool for reading a page's current wikitext
#[derive(Default)]
pub struct GetPageTool;

impl GetPageTool {
    /// Creates a new instance of the GetPageTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for GetPageTool {
    fn name(&self) -> &'static str {
        "page_get"
    }

    fn description(&self) -> &'static str {
        "Fetch the current wikitext and revision id of a page"
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "title": {
                    "type": "string",
                    "description": "Title of the page to fetch"
                }
            },
            "required": ["title"]
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: GetPageRequest = BaseToolImpl::parse_arguments(arguments)?;
        validate_not_empty(&request.title, "page title")?;

        match context.backend.fetch_page(&request.title).await {
            Ok(page) => Ok(page_revision_response(&page)),
            Err(error) => Err(map_backend_error(error, "fetch page")),
        }
    }
}
