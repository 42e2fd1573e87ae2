//! MCP tool implementations, one module per tool.

pub mod pages;
