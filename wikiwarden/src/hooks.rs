//! Pre/post hooks around every page write.
//!
//! Hooks nest like an onion around the backend call: `before_edit` runs in
//! registration order on the way in, `after_edit` in reverse order on the
//! way out. The verification transform is installed as the innermost hook.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;
use crate::verification::{
    transform_text, BaselineIndex, TransformOutcome, REVIEW_NOTE,
};
use crate::verification::namespace::is_exempt_title;
use crate::wiki::WikiBackend;

/// Whether an edit creates a page or replaces an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOperation {
    /// Create a new page; fails if it exists.
    Create,
    /// Replace an existing page.
    Update,
}

/// Everything known about one submitted edit. Built per tool call,
/// threaded through the hook pipeline, discarded after the edit.
#[derive(Debug, Clone)]
pub struct EditContext {
    /// Create vs update.
    pub operation: EditOperation,
    /// Target page title.
    pub title: String,
    /// Submitted wikitext; hooks may rewrite it.
    pub text: String,
    /// Edit summary.
    pub comment: Option<String>,
    /// Revision the update is based on, when the caller knows it.
    pub base_revision: Option<u64>,
}

/// One block of a tool result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentBlock {
    /// Ordinary result text.
    Text(String),
    /// An advisory note appended by a hook.
    Note(String),
}

/// Result of an edit as reported back to the caller: content blocks plus an
/// error flag.
#[derive(Debug, Clone)]
pub struct EditOutcome {
    /// Result blocks in display order.
    pub blocks: Vec<ContentBlock>,
    /// True when the backend rejected the write.
    pub is_error: bool,
}

impl EditOutcome {
    /// A successful result with one text block.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            blocks: vec![ContentBlock::Text(message.into())],
            is_error: false,
        }
    }

    /// A failed result carrying the upstream error message.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            blocks: vec![ContentBlock::Text(message.into())],
            is_error: true,
        }
    }
}

/// A two-stage hook around the backend write.
#[async_trait]
pub trait EditHook: Send + Sync {
    /// Hook name for logs.
    fn name(&self) -> &'static str;

    /// Input stage; may rewrite the context before the write.
    async fn before_edit(&self, context: EditContext) -> Result<EditContext>;

    /// Output stage; may decorate the result after the write.
    async fn after_edit(&self, context: &EditContext, outcome: EditOutcome) -> EditOutcome;
}

/// Ordered collection of hooks forming the onion around an edit.
#[derive(Default)]
pub struct HookPipeline {
    hooks: Vec<Arc<dyn EditHook>>,
}

impl HookPipeline {
    /// An empty pipeline.
    pub fn new() -> Self {
        Self { hooks: Vec::new() }
    }

    /// Append a hook. Pre-hooks run in this order, post-hooks in reverse.
    pub fn register(&mut self, hook: Arc<dyn EditHook>) {
        self.hooks.push(hook);
    }

    /// Number of registered hooks.
    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    /// True when no hooks are registered.
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Run all input stages in registration order.
    pub async fn before_edit(&self, mut context: EditContext) -> Result<EditContext> {
        for hook in &self.hooks {
            tracing::debug!(hook = hook.name(), title = %context.title, "running pre-edit hook");
            context = hook.before_edit(context).await?;
        }
        Ok(context)
    }

    /// Run all output stages in reverse registration order.
    pub async fn after_edit(&self, context: &EditContext, mut outcome: EditOutcome) -> EditOutcome {
        for hook in self.hooks.iter().rev() {
            tracing::debug!(hook = hook.name(), title = %context.title, "running post-edit hook");
            outcome = hook.after_edit(context, outcome).await;
        }
        outcome
    }
}

/// The content-governance hook: rewrites submitted text so new claims carry
/// the provenance marker, and appends the review note to successful
/// results.
pub struct VerificationHook {
    backend: Arc<dyn WikiBackend>,
}

impl VerificationHook {
    /// Build the hook over the backend used for baseline fetches.
    pub fn new(backend: Arc<dyn WikiBackend>) -> Self {
        Self { backend }
    }

    /// Fetch the prior revision for an update, degrading to no baseline on
    /// any failure.
    async fn load_baseline(&self, context: &EditContext) -> Option<BaselineIndex> {
        let rev_id = match (context.operation, context.base_revision) {
            (EditOperation::Update, Some(rev_id)) => rev_id,
            _ => return None,
        };
        match self.backend.fetch_revision(rev_id).await {
            Ok(text) => Some(BaselineIndex::from_revision_text(&text)),
            Err(error) => {
                tracing::warn!(
                    title = %context.title,
                    rev_id,
                    %error,
                    "baseline fetch failed, treating all content as new"
                );
                None
            }
        }
    }
}

#[async_trait]
impl EditHook for VerificationHook {
    fn name(&self) -> &'static str {
        "verification"
    }

    async fn before_edit(&self, mut context: EditContext) -> Result<EditContext> {
        if is_exempt_title(&context.title) {
            tracing::debug!(title = %context.title, "exempt namespace, skipping verification");
            return Ok(context);
        }

        let baseline = self.load_baseline(&context).await;
        let output = transform_text(&context.title, &context.text, baseline.as_ref());
        match output.outcome {
            TransformOutcome::AlreadyFlagged => {
                tracing::debug!(title = %context.title, "document already flagged");
            }
            TransformOutcome::Rewritten => {
                tracing::debug!(title = %context.title, "flagged new content as proposed");
            }
            TransformOutcome::Exempt => {}
        }
        context.text = output.text;
        Ok(context)
    }

    async fn after_edit(&self, context: &EditContext, mut outcome: EditOutcome) -> EditOutcome {
        if !outcome.is_error && !is_exempt_title(&context.title) {
            outcome.blocks.push(ContentBlock::Note(REVIEW_NOTE.to_string()));
        }
        outcome
    }
}
