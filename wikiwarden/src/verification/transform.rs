//! The verification transform: the end-to-end rewrite applied to every
//! submitted document before it is committed.

use super::baseline::BaselineIndex;
use super::{infobox, markers, namespace, segment};

/// Advisory note appended to successful results for non-exempt titles.
pub const REVIEW_NOTE: &str =
    "New content was automatically flagged as proposed and requires human review \
     before it is treated as verified.";

/// What the transform decided to do with the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformOutcome {
    /// The title is in an exempt namespace; nothing was touched.
    Exempt,
    /// The document already carries provenance markers; nothing to do.
    AlreadyFlagged,
    /// New content was flagged.
    Rewritten,
}

/// Result of [`transform_text`].
#[derive(Debug, Clone)]
pub struct TransformOutput {
    /// The (possibly rewritten) document.
    pub text: String,
    /// What happened.
    pub outcome: TransformOutcome,
}

/// Rewrite a submitted document so that newly introduced claims carry the
/// provenance marker.
///
/// Pure and deterministic: no I/O, no state across calls. The optional
/// baseline distinguishes previously-accepted lines from new ones; without
/// it everything is treated as new.
pub fn transform_text(
    title: &str,
    text: &str,
    baseline: Option<&BaselineIndex>,
) -> TransformOutput {
    if namespace::is_exempt_title(title) {
        tracing::debug!(title, "title is exempt, leaving document untouched");
        return TransformOutput {
            text: text.to_string(),
            outcome: TransformOutcome::Exempt,
        };
    }

    if markers::is_flagged(text) {
        tracing::debug!(title, "document already flagged, no action needed");
        return TransformOutput {
            text: text.to_string(),
            outcome: TransformOutcome::AlreadyFlagged,
        };
    }

    let rewritten = match infobox::inject_status(text, baseline) {
        Some(with_status) => with_status,
        None => segment::segment_and_wrap(text, baseline),
    };

    TransformOutput {
        text: restore_trailing_newline(text, rewritten),
        outcome: TransformOutcome::Rewritten,
    }
}

/// Line iteration drops a final newline; put it back so the rewrite stays
/// byte-faithful outside the wrapped blocks.
fn restore_trailing_newline(input: &str, mut output: String) -> String {
    if input.ends_with('\n') && !output.ends_with('\n') {
        output.push('\n');
    }
    output
}
