//! In-memory wiki backend for tests and diagnostics.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{Result, WikiwardenError};

use super::{PageRevision, SavePage, SavedPage, WikiBackend};

#[derive(Debug, Clone)]
struct StoredRevision {
    rev_id: u64,
    text: String,
}

#[derive(Debug, Default)]
struct StoredPage {
    page_id: u64,
    revisions: Vec<StoredRevision>,
}

/// A complete [`WikiBackend`] over process memory. Revisions accumulate per
/// page; conflict detection mirrors the real backend's stale-base check.
#[derive(Default)]
pub struct MemoryWiki {
    pages: RwLock<HashMap<String, StoredPage>>,
    next_id: AtomicU64,
}

impl MemoryWiki {
    /// Create an empty wiki.
    pub fn new() -> Self {
        Self {
            pages: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Seed a page with initial content, returning its revision id.
    pub async fn seed(&self, title: &str, text: &str) -> u64 {
        let rev_id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let mut pages = self.pages.write().await;
        let page_id = pages.len() as u64 + 1;
        let page = pages.entry(title.to_string()).or_insert_with(|| StoredPage {
            page_id,
            revisions: Vec::new(),
        });
        page.revisions.push(StoredRevision {
            rev_id,
            text: text.to_string(),
        });
        rev_id
    }
}

#[async_trait]
impl WikiBackend for MemoryWiki {
    async fn fetch_revision(&self, rev_id: u64) -> Result<String> {
        let pages = self.pages.read().await;
        pages
            .values()
            .flat_map(|page| page.revisions.iter())
            .find(|revision| revision.rev_id == rev_id)
            .map(|revision| revision.text.clone())
            .ok_or(WikiwardenError::RevisionNotFound(rev_id))
    }

    async fn fetch_page(&self, title: &str) -> Result<PageRevision> {
        let pages = self.pages.read().await;
        let page = pages
            .get(title)
            .ok_or_else(|| WikiwardenError::PageNotFound(title.to_string()))?;
        let latest = page
            .revisions
            .last()
            .ok_or_else(|| WikiwardenError::PageNotFound(title.to_string()))?;
        Ok(PageRevision {
            title: title.to_string(),
            rev_id: latest.rev_id,
            text: latest.text.clone(),
        })
    }

    async fn save_page(&self, request: SavePage) -> Result<SavedPage> {
        let mut pages = self.pages.write().await;
        let exists = pages.contains_key(&request.title);

        if request.create_only && exists {
            return Err(WikiwardenError::Api {
                code: "articleexists".to_string(),
                info: format!("The article '{}' already exists", request.title),
            });
        }

        if let (Some(base), true) = (request.base_revision, exists) {
            let latest = pages[&request.title]
                .revisions
                .last()
                .map(|revision| revision.rev_id);
            if latest != Some(base) {
                return Err(WikiwardenError::EditConflict {
                    title: request.title.clone(),
                    info: format!(
                        "base revision {base} is not the latest revision {latest:?}"
                    ),
                });
            }
        }

        let rev_id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let page_id = pages.len() as u64 + 1;
        let page = pages
            .entry(request.title.clone())
            .or_insert_with(|| StoredPage {
                page_id,
                revisions: Vec::new(),
            });
        page.revisions.push(StoredRevision {
            rev_id,
            text: request.text,
        });

        Ok(SavedPage {
            title: request.title,
            page_id: page.page_id,
            new_rev_id: Some(rev_id),
            new_page: !exists,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn save(title: &str, text: &str) -> SavePage {
        SavePage {
            title: title.to_string(),
            text: text.to_string(),
            comment: None,
            base_revision: None,
            create_only: false,
        }
    }

    #[tokio::test]
    async fn test_create_fetch_round_trip() {
        let wiki = MemoryWiki::new();
        let saved = wiki.save_page(save("Page", "content")).await.unwrap();
        assert!(saved.new_page);

        let page = wiki.fetch_page("Page").await.unwrap();
        assert_eq!(page.text, "content");
        assert_eq!(Some(page.rev_id), saved.new_rev_id);
    }

    #[tokio::test]
    async fn test_create_only_rejects_existing() {
        let wiki = MemoryWiki::new();
        wiki.seed("Page", "v1").await;

        let mut request = save("Page", "v2");
        request.create_only = true;
        let err = wiki.save_page(request).await.unwrap_err();
        assert!(matches!(err, WikiwardenError::Api { code, .. } if code == "articleexists"));
    }

    #[tokio::test]
    async fn test_stale_base_revision_conflicts() {
        let wiki = MemoryWiki::new();
        let first = wiki.seed("Page", "v1").await;
        wiki.seed("Page", "v2").await;

        let mut request = save("Page", "v3");
        request.base_revision = Some(first);
        let err = wiki.save_page(request).await.unwrap_err();
        assert!(matches!(err, WikiwardenError::EditConflict { .. }));
    }

    #[tokio::test]
    async fn test_fetch_revision_by_id() {
        let wiki = MemoryWiki::new();
        let rev = wiki.seed("Page", "old text").await;
        wiki.seed("Page", "new text").await;

        assert_eq!(wiki.fetch_revision(rev).await.unwrap(), "old text");
        assert!(matches!(
            wiki.fetch_revision(999).await,
            Err(WikiwardenError::RevisionNotFound(999))
        ));
    }
}
