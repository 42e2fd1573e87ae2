//! Page management tools for MCP operations
//!
//! Each tool lives in its own submodule with dedicated schema and
//! implementation.

pub mod create;
pub mod get;
pub mod update;

use crate::mcp::tool_registry::ToolRegistry;

/// Register all page-related tools with the registry
pub fn register_page_tools(registry: &mut ToolRegistry) {
    registry.register(create::CreatePageTool::new());
    registry.register(update::UpdatePageTool::new());
    registry.register(get::GetPageTool::new());
}
