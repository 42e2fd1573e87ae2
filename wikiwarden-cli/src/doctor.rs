//! Diagnostics for configuration and wiki connectivity.

use crate::exit_codes::{EXIT_ERROR, EXIT_SUCCESS, EXIT_WARNING};
use wikiwarden::WikiConfig;

#[derive(Debug, PartialEq, Eq)]
enum CheckStatus {
    Ok,
    Warning,
    Error,
}

struct Check {
    name: &'static str,
    status: CheckStatus,
    message: String,
}

/// Run all diagnostics and return the process exit code: 0 when everything
/// passed, 1 on warnings, 2 on errors.
pub async fn run_diagnostics() -> i32 {
    let config = WikiConfig::from_env();
    let mut checks = vec![check_config(&config), check_credentials(&config)];
    if checks.iter().all(|check| check.status != CheckStatus::Error) {
        checks.push(check_endpoint(&config).await);
    }

    for check in &checks {
        let marker = match check.status {
            CheckStatus::Ok => "ok",
            CheckStatus::Warning => "warning",
            CheckStatus::Error => "error",
        };
        println!("[{marker}] {}: {}", check.name, check.message);
    }

    if checks.iter().any(|check| check.status == CheckStatus::Error) {
        EXIT_ERROR
    } else if checks.iter().any(|check| check.status == CheckStatus::Warning) {
        EXIT_WARNING
    } else {
        EXIT_SUCCESS
    }
}

fn check_config(config: &WikiConfig) -> Check {
    match config.validate() {
        Ok(()) => Check {
            name: "configuration",
            status: CheckStatus::Ok,
            message: format!("API endpoint is {}", config.api_url),
        },
        Err(error) => Check {
            name: "configuration",
            status: CheckStatus::Error,
            message: error.to_string(),
        },
    }
}

fn check_credentials(config: &WikiConfig) -> Check {
    if config.has_credentials() {
        Check {
            name: "credentials",
            status: CheckStatus::Ok,
            message: "bot credentials configured".to_string(),
        }
    } else {
        Check {
            name: "credentials",
            status: CheckStatus::Warning,
            message: "no bot credentials set, edits will be anonymous".to_string(),
        }
    }
}

async fn check_endpoint(config: &WikiConfig) -> Check {
    let client = match reqwest::Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(config.http_timeout())
        .build()
    {
        Ok(client) => client,
        Err(error) => {
            return Check {
                name: "endpoint",
                status: CheckStatus::Error,
                message: format!("failed to build HTTP client: {error}"),
            }
        }
    };

    let result = client
        .get(&config.api_url)
        .query(&[
            ("action", "query"),
            ("meta", "siteinfo"),
            ("format", "json"),
        ])
        .send()
        .await;

    match result {
        Ok(response) if response.status().is_success() => Check {
            name: "endpoint",
            status: CheckStatus::Ok,
            message: "wiki action API answered the siteinfo query".to_string(),
        },
        Ok(response) => Check {
            name: "endpoint",
            status: CheckStatus::Warning,
            message: format!("wiki answered with HTTP {}", response.status()),
        },
        Err(error) => Check {
            name: "endpoint",
            status: CheckStatus::Warning,
            message: format!("wiki is unreachable: {error}"),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_config_passes() {
        let check = check_config(&WikiConfig::default());
        assert_eq!(check.status, CheckStatus::Ok);
    }

    #[test]
    fn test_invalid_url_is_an_error() {
        let config = WikiConfig {
            api_url: "definitely not a url".to_string(),
            ..WikiConfig::default()
        };
        let check = check_config(&config);
        assert_eq!(check.status, CheckStatus::Error);
    }

    #[test]
    fn test_missing_credentials_is_a_warning() {
        let check = check_credentials(&WikiConfig::default());
        assert_eq!(check.status, CheckStatus::Warning);
    }
}
