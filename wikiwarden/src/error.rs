//! Unified error handling for the Wikiwarden library.

use std::fmt;
use std::io;
use thiserror::Error;

/// The main error type for the Wikiwarden library
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum WikiwardenError {
    /// IO operation failed
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP transport failure talking to the wiki backend
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The wiki API returned an error payload
    #[error("Wiki API error '{code}': {info}")]
    Api {
        /// Machine-readable error code from the API
        code: String,
        /// Human-readable description from the API
        info: String,
    },

    /// Page not found
    #[error("Page not found: {0}")]
    PageNotFound(String),

    /// Revision not found
    #[error("Revision not found: {0}")]
    RevisionNotFound(u64),

    /// The backend rejected a write because the base revision is stale
    #[error("Edit conflict on '{title}': {info}")]
    EditConflict {
        /// Title of the page being written
        title: String,
        /// Conflict details from the backend
        info: String,
    },

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Other errors
    #[error("{0}")]
    Other(String),

    /// Generic error with context
    #[error("{message}")]
    Context {
        /// Description of what was being attempted
        message: String,
        /// Underlying error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Result type alias for Wikiwarden operations
pub type Result<T> = std::result::Result<T, WikiwardenError>;

/// Extension trait for adding context to errors
pub trait ErrorContext<T> {
    /// Add context to an error
    fn context<S: Into<String>>(self, msg: S) -> Result<T>;

    /// Add context with a closure that's only called on error
    fn with_context<F, S>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context<S: Into<String>>(self, msg: S) -> Result<T> {
        self.map_err(|e| WikiwardenError::Context {
            message: msg.into(),
            source: Box::new(e),
        })
    }

    fn with_context<F, S>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| WikiwardenError::Context {
            message: f().into(),
            source: Box::new(e),
        })
    }
}

/// Error chain formatter for detailed error reporting
pub struct ErrorChain<'a>(&'a dyn std::error::Error);

impl fmt::Display for ErrorChain<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Error: {}", self.0)?;

        let mut current = self.0.source();
        let mut level = 1;

        while let Some(err) = current {
            writeln!(f, "{:indent$}Caused by: {}", "", err, indent = level * 2)?;
            current = err.source();
            level += 1;
        }

        Ok(())
    }
}

/// Extension trait for error types to format the full error chain
pub trait ErrorChainExt {
    /// Format the full error chain
    fn error_chain(&self) -> ErrorChain<'_>;
}

impl<E: std::error::Error> ErrorChainExt for E {
    fn error_chain(&self) -> ErrorChain<'_> {
        ErrorChain(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_context() {
        let err: Result<()> = Err(io::Error::new(io::ErrorKind::NotFound, "file not found").into());
        let err_with_context = err.context("Failed to read credentials file");

        assert!(err_with_context.is_err());
        let msg = err_with_context.unwrap_err().to_string();
        assert!(msg.contains("Failed to read credentials file"));
    }

    #[test]
    fn test_error_chain_display() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err = WikiwardenError::Context {
            message: "Failed to load configuration".to_string(),
            source: Box::new(io_err),
        };

        let chain = err.error_chain().to_string();
        assert!(chain.contains("Failed to load configuration"));
        assert!(chain.contains("file not found"));
    }

    #[test]
    fn test_api_error_display() {
        let err = WikiwardenError::Api {
            code: "badtoken".to_string(),
            info: "Invalid CSRF token".to_string(),
        };
        assert_eq!(err.to_string(), "Wiki API error 'badtoken': Invalid CSRF token");
    }
}
