//! Model Context Protocol (MCP) server support
//!
//! Exposes the page tools over rmcp and wires the hook pipeline around the
//! wiki backend.

use std::sync::Arc;

use rmcp::model::*;
use rmcp::service::RequestContext;
use rmcp::{Error as McpError, RoleServer, ServerHandler};

use crate::config::WikiConfig;
use crate::error::{Result, WikiwardenError};
use crate::hooks::{HookPipeline, VerificationHook};
use crate::wiki::{HttpWikiBackend, WikiBackend};

pub mod responses;
pub mod tool_registry;
pub mod tools;
pub mod types;

use tool_registry::{ToolContext, ToolRegistry};

/// Map a library error to an MCP error response.
///
/// User input problems become `invalid_params`; everything else is an
/// internal error.
pub fn map_backend_error(error: WikiwardenError, operation: &str) -> McpError {
    tracing::error!("MCP operation '{}' failed: {}", operation, error);

    match error {
        WikiwardenError::PageNotFound(title) => {
            McpError::invalid_params(format!("Page not found: {title}"), None)
        }
        WikiwardenError::RevisionNotFound(rev) => {
            McpError::invalid_params(format!("Revision not found: {rev}"), None)
        }
        WikiwardenError::Config(msg) => {
            McpError::invalid_params(format!("Configuration error: {msg}"), None)
        }
        other => McpError::internal_error(other.to_string(), None),
    }
}

/// Map a hook pipeline failure to an MCP error response.
pub fn map_pipeline_error(error: WikiwardenError) -> McpError {
    map_backend_error(error, "edit hook pipeline")
}

/// Reject empty or whitespace-only required string arguments.
pub fn validate_not_empty(value: &str, what: &str) -> std::result::Result<(), McpError> {
    if value.trim().is_empty() {
        return Err(McpError::invalid_params(
            format!("{what} cannot be empty"),
            None,
        ));
    }
    Ok(())
}

/// MCP server exposing wiki page tools with verification hooks installed.
#[derive(Clone)]
pub struct WardenServer {
    tool_registry: Arc<ToolRegistry>,
    tool_context: Arc<ToolContext>,
}

impl WardenServer {
    /// Create a server talking to the wiki configured in the environment.
    pub fn new(config: &WikiConfig) -> Result<Self> {
        let backend = Arc::new(HttpWikiBackend::new(config)?);
        Ok(Self::with_backend(backend))
    }

    /// Create a server over an arbitrary backend. Used by tests and
    /// diagnostics with the in-memory wiki.
    pub fn with_backend(backend: Arc<dyn WikiBackend>) -> Self {
        let mut hooks = HookPipeline::new();
        hooks.register(Arc::new(VerificationHook::new(backend.clone())));

        let mut tool_registry = ToolRegistry::new();
        tools::pages::register_page_tools(&mut tool_registry);

        let tool_context = Arc::new(ToolContext::new(backend, Arc::new(hooks)));

        Self {
            tool_registry: Arc::new(tool_registry),
            tool_context,
        }
    }

    fn capabilities() -> ServerCapabilities {
        ServerCapabilities {
            prompts: None,
            tools: Some(ToolsCapability {
                list_changed: Some(false),
            }),
            resources: None,
            logging: None,
            completions: None,
            experimental: None,
        }
    }

    fn instructions() -> &'static str {
        "A wiki editing server with content governance. Use page_get to read a page, \
         page_create to create one, and page_update to replace one. New factual claims in \
         submitted content are automatically flagged as proposed and require human review; \
         pass base_revision on updates so previously-accepted content passes through \
         unchanged."
    }
}

impl ServerHandler for WardenServer {
    async fn initialize(
        &self,
        request: InitializeRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<InitializeResult, McpError> {
        tracing::info!(
            "MCP client connecting: {} v{}",
            request.client_info.name,
            request.client_info.version
        );

        Ok(InitializeResult {
            protocol_version: ProtocolVersion::default(),
            capabilities: Self::capabilities(),
            instructions: Some(Self::instructions().into()),
            server_info: Implementation {
                name: "Wikiwarden".into(),
                version: crate::VERSION.into(),
            },
        })
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListToolsResult, McpError> {
        Ok(ListToolsResult {
            tools: self.tool_registry.list_tools(),
            next_cursor: None,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<CallToolResult, McpError> {
        if let Some(tool) = self.tool_registry.get_tool(&request.name) {
            tool.execute(request.arguments.unwrap_or_default(), &self.tool_context)
                .await
        } else {
            Err(McpError::invalid_request(
                format!("Unknown tool: {}", request.name),
                None,
            ))
        }
    }

    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::default(),
            capabilities: Self::capabilities(),
            server_info: Implementation {
                name: "Wikiwarden".into(),
                version: crate::VERSION.into(),
            },
            instructions: Some(Self::instructions().into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_registers_page_tools() {
        let server = WardenServer::with_backend(Arc::new(crate::wiki::MemoryWiki::new()));
        let names = server.tool_registry.list_tool_names();
        assert!(names.contains(&"page_create".to_string()));
        assert!(names.contains(&"page_update".to_string()));
        assert!(names.contains(&"page_get".to_string()));
    }

    #[test]
    fn test_backend_error_mapping() {
        let err = map_backend_error(WikiwardenError::PageNotFound("X".to_string()), "fetch");
        assert!(err.to_string().contains("Page not found"));

        let err = map_backend_error(
            WikiwardenError::Other("backend exploded".to_string()),
            "save",
        );
        assert!(err.to_string().contains("backend exploded"));
    }

    #[test]
    fn test_validate_not_empty() {
        assert!(validate_not_empty("Page", "page title").is_ok());
        assert!(validate_not_empty("  ", "page title").is_err());
    }
}
