//! Configuration for the wiki backend connection.
//!
//! All settings load from `WIKIWARDEN_*` environment variables with
//! sensible defaults, so the server can be dropped into an MCP client
//! configuration with nothing but the endpoint set.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use url::Url;

use crate::error::{Result, WikiwardenError};

/// Environment variable prefix for all settings.
const ENV_PREFIX: &str = "WIKIWARDEN";

const DEFAULT_API_URL: &str = "http://localhost/w/api.php";
const DEFAULT_USER_AGENT: &str = concat!("wikiwarden/", env!("CARGO_PKG_VERSION"));
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Connection settings for the wiki's action API.
#[derive(Debug, Clone)]
pub struct WikiConfig {
    /// Endpoint of the wiki's action API (`.../api.php`).
    pub api_url: String,
    /// Bot account name, when authenticated editing is configured.
    pub username: Option<String>,
    /// Bot password paired with `username`.
    pub bot_password: Option<String>,
    /// User agent sent with every request.
    pub user_agent: String,
    /// Timeout applied to every HTTP call.
    pub http_timeout_secs: u64,
}

impl Default for WikiConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            username: None,
            bot_password: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
        }
    }
}

impl WikiConfig {
    /// Load configuration from `WIKIWARDEN_*` environment variables,
    /// falling back to defaults for anything unset.
    pub fn from_env() -> Self {
        Self {
            api_url: load_string("API_URL", DEFAULT_API_URL),
            username: load_optional("USERNAME"),
            bot_password: load_optional("BOT_PASSWORD"),
            user_agent: load_string("USER_AGENT", DEFAULT_USER_AGENT),
            http_timeout_secs: load_parsed("HTTP_TIMEOUT_SECS", DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }

    /// Validate the configuration, returning a descriptive error for the
    /// first problem found.
    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.api_url).map_err(|e| {
            WikiwardenError::Config(format!("invalid API URL '{}': {e}", self.api_url))
        })?;
        if self.http_timeout_secs == 0 {
            return Err(WikiwardenError::Config(
                "HTTP timeout must be greater than zero".to_string(),
            ));
        }
        if self.username.is_some() != self.bot_password.is_some() {
            return Err(WikiwardenError::Config(
                "username and bot password must be set together".to_string(),
            ));
        }
        Ok(())
    }

    /// HTTP timeout as a [`Duration`].
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    /// True when bot credentials are configured.
    pub fn has_credentials(&self) -> bool {
        self.username.is_some() && self.bot_password.is_some()
    }
}

fn load_string(suffix: &str, default: &str) -> String {
    env::var(format!("{ENV_PREFIX}_{suffix}")).unwrap_or_else(|_| default.to_string())
}

fn load_optional<T: FromStr>(suffix: &str) -> Option<T> {
    env::var(format!("{ENV_PREFIX}_{suffix}"))
        .ok()
        .and_then(|v| v.parse().ok())
}

fn load_parsed<T: FromStr>(suffix: &str, default: T) -> T {
    env::var(format!("{ENV_PREFIX}_{suffix}"))
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
