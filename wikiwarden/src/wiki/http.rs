//! MediaWiki action API client.

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Mutex;

use crate::config::WikiConfig;
use crate::error::{Result, WikiwardenError};

use super::{PageRevision, SavePage, SavedPage, WikiBackend};

/// [`WikiBackend`] over the MediaWiki action API (`api.php`).
///
/// Reads go through `action=query`; writes fetch a CSRF token and post
/// `action=edit`. When bot credentials are configured the client logs in
/// lazily before the first write and relies on the cookie store afterwards.
pub struct HttpWikiBackend {
    client: reqwest::Client,
    api_url: String,
    credentials: Option<(String, String)>,
    logged_in: Mutex<bool>,
}

impl HttpWikiBackend {
    /// Build a client from validated configuration.
    pub fn new(config: &WikiConfig) -> Result<Self> {
        config.validate()?;
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.http_timeout())
            .cookie_store(true)
            .build()?;
        let credentials = match (&config.username, &config.bot_password) {
            (Some(user), Some(password)) => Some((user.clone(), password.clone())),
            _ => None,
        };
        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            credentials,
            logged_in: Mutex::new(false),
        })
    }

    async fn query(&self, params: &[(&str, &str)]) -> Result<Value> {
        let mut query = vec![("format", "json"), ("formatversion", "2")];
        query.extend_from_slice(params);
        let response: Value = self
            .client
            .get(&self.api_url)
            .query(&query)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        check_api_error(&response)?;
        Ok(response)
    }

    async fn post_form(&self, form: &[(&str, &str)]) -> Result<Value> {
        let mut body = vec![("format", "json"), ("formatversion", "2")];
        body.extend_from_slice(form);
        let response: Value = self
            .client
            .post(&self.api_url)
            .form(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(response)
    }

    async fn ensure_logged_in(&self) -> Result<()> {
        let Some((username, password)) = &self.credentials else {
            return Ok(());
        };
        let mut logged_in = self.logged_in.lock().await;
        if *logged_in {
            return Ok(());
        }

        let tokens = self.query(&[("action", "query"), ("meta", "tokens"), ("type", "login")]).await?;
        let login_token = tokens
            .pointer("/query/tokens/logintoken")
            .and_then(Value::as_str)
            .ok_or_else(|| WikiwardenError::Other("login token missing from response".to_string()))?
            .to_string();

        let response = self
            .post_form(&[
                ("action", "login"),
                ("lgname", username),
                ("lgpassword", password),
                ("lgtoken", &login_token),
            ])
            .await?;
        let result = response
            .pointer("/login/result")
            .and_then(Value::as_str)
            .unwrap_or("Unknown");
        if result != "Success" {
            return Err(WikiwardenError::Api {
                code: "loginfailed".to_string(),
                info: format!("login for '{username}' returned {result}"),
            });
        }

        tracing::debug!(username, "logged in to wiki backend");
        *logged_in = true;
        Ok(())
    }

    async fn csrf_token(&self) -> Result<String> {
        let response = self.query(&[("action", "query"), ("meta", "tokens")]).await?;
        response
            .pointer("/query/tokens/csrftoken")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| WikiwardenError::Other("CSRF token missing from response".to_string()))
    }
}

#[async_trait]
impl WikiBackend for HttpWikiBackend {
    async fn fetch_revision(&self, rev_id: u64) -> Result<String> {
        let revids = rev_id.to_string();
        let response = self
            .query(&[
                ("action", "query"),
                ("prop", "revisions"),
                ("revids", &revids),
                ("rvprop", "content"),
                ("rvslots", "main"),
            ])
            .await?;

        if response.pointer("/query/badrevids").is_some() {
            return Err(WikiwardenError::RevisionNotFound(rev_id));
        }
        response
            .pointer("/query/pages/0/revisions/0/slots/main/content")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or(WikiwardenError::RevisionNotFound(rev_id))
    }

    async fn fetch_page(&self, title: &str) -> Result<PageRevision> {
        let response = self
            .query(&[
                ("action", "query"),
                ("prop", "revisions"),
                ("titles", title),
                ("rvprop", "content|ids"),
                ("rvslots", "main"),
            ])
            .await?;

        let page = response
            .pointer("/query/pages/0")
            .ok_or_else(|| WikiwardenError::PageNotFound(title.to_string()))?;
        if page.get("missing").and_then(Value::as_bool).unwrap_or(false) {
            return Err(WikiwardenError::PageNotFound(title.to_string()));
        }

        let rev_id = page
            .pointer("/revisions/0/revid")
            .and_then(Value::as_u64)
            .ok_or_else(|| WikiwardenError::PageNotFound(title.to_string()))?;
        let text = page
            .pointer("/revisions/0/slots/main/content")
            .and_then(Value::as_str)
            .ok_or_else(|| WikiwardenError::PageNotFound(title.to_string()))?;

        Ok(PageRevision {
            title: page
                .get("title")
                .and_then(Value::as_str)
                .unwrap_or(title)
                .to_string(),
            rev_id,
            text: text.to_string(),
        })
    }

    async fn save_page(&self, request: SavePage) -> Result<SavedPage> {
        self.ensure_logged_in().await?;
        let token = self.csrf_token().await?;

        let base_revision = request.base_revision.map(|rev| rev.to_string());
        let mut form: Vec<(&str, &str)> = vec![
            ("action", "edit"),
            ("title", &request.title),
            ("text", &request.text),
            ("token", &token),
        ];
        if let Some(comment) = &request.comment {
            form.push(("summary", comment));
        }
        if let Some(base) = &base_revision {
            form.push(("baserevid", base));
        }
        if request.create_only {
            form.push(("createonly", "true"));
        }

        let response = self.post_form(&form).await?;
        if let Some(error) = response.get("error") {
            return Err(map_edit_error(&request.title, error));
        }

        let edit = response
            .get("edit")
            .ok_or_else(|| WikiwardenError::Other("edit response missing payload".to_string()))?;
        let result = edit.get("result").and_then(Value::as_str).unwrap_or("Unknown");
        if result != "Success" {
            return Err(WikiwardenError::Api {
                code: "editfailed".to_string(),
                info: format!("edit of '{}' returned {result}", request.title),
            });
        }

        Ok(SavedPage {
            title: edit
                .get("title")
                .and_then(Value::as_str)
                .unwrap_or(&request.title)
                .to_string(),
            page_id: edit.get("pageid").and_then(Value::as_u64).unwrap_or(0),
            new_rev_id: edit.get("newrevid").and_then(Value::as_u64),
            new_page: edit.get("new").is_some(),
        })
    }
}

fn check_api_error(response: &Value) -> Result<()> {
    if let Some(error) = response.get("error") {
        return Err(WikiwardenError::Api {
            code: error
                .get("code")
                .and_then(Value::as_str)
                .unwrap_or("unknown")
                .to_string(),
            info: error
                .get("info")
                .and_then(Value::as_str)
                .unwrap_or("no details")
                .to_string(),
        });
    }
    Ok(())
}

fn map_edit_error(title: &str, error: &Value) -> WikiwardenError {
    let code = error
        .get("code")
        .and_then(Value::as_str)
        .unwrap_or("unknown")
        .to_string();
    let info = error
        .get("info")
        .and_then(Value::as_str)
        .unwrap_or("no details")
        .to_string();
    if code == "editconflict" {
        return WikiwardenError::EditConflict {
            title: title.to_string(),
            info,
        };
    }
    WikiwardenError::Api { code, info }
}
