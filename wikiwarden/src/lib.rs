//! # Wikiwarden
//!
//! Wiki editing tools with a content-governance transform.
//!
//! Wikiwarden exposes page create/update/read operations over the Model
//! Context Protocol and rewrites every submitted edit so that newly
//! introduced factual claims are flagged as proposed pending human review.
//! Previously-accepted content, structural markup, and exempt namespaces
//! pass through untouched.
//!
//! ## Quick Start
//!
//! ```rust
//! use wikiwarden::verification::{transform_text, BaselineIndex};
//!
//! let baseline = BaselineIndex::from_revision_text("The venue opened in 1992.");
//! let submitted = "The venue opened in 1992.\n\nIt closed again last week.";
//! let output = transform_text("The Venue", submitted, Some(&baseline));
//!
//! // The accepted sentence passes through; the new claim is flagged.
//! assert!(output.text.starts_with("The venue opened in 1992."));
//! assert!(output.text.contains("{{Proposed|"));
//! ```

#![warn(missing_docs)]

/// Configuration for the wiki backend connection
pub mod config;

/// Unified error handling
pub mod error;

/// Pre/post hooks around page writes
pub mod hooks;

/// Model Context Protocol (MCP) server support
pub mod mcp;

/// The verification transform and its components
pub mod verification;

/// Wiki backend abstraction and implementations
pub mod wiki;

pub use config::WikiConfig;
pub use error::{ErrorContext, Result, WikiwardenError};
pub use hooks::{ContentBlock, EditContext, EditOperation, EditOutcome, HookPipeline, VerificationHook};
pub use mcp::WardenServer;
pub use verification::{transform_text, BaselineIndex, TransformOutcome, TransformOutput};
pub use wiki::{HttpWikiBackend, MemoryWiki, PageRevision, SavePage, SavedPage, WikiBackend};

/// Crate version, reported to MCP clients.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
