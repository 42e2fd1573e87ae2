//! Normalized-line index over a prior revision.

use std::collections::HashSet;

use super::markers;
use super::segment::LIST_MARKERS;

/// Existence oracle over the lines of a previously-accepted revision.
///
/// Each non-blank line is stored with its list-marker prefix removed and any
/// provenance wrapper stripped (the payload unescaped), then trimmed. List
/// items index their payload because that is what the wrapper looks up when
/// deciding whether a resubmitted item is unchanged. Lookup is exact string
/// equality on the normalized form; there is no fuzzy matching and no move
/// detection.
#[derive(Debug, Default)]
pub struct BaselineIndex {
    lines: HashSet<String>,
}

impl BaselineIndex {
    /// Build the index from a prior revision's full wikitext.
    pub fn from_revision_text(text: &str) -> Self {
        let mut lines = HashSet::new();
        for raw in text.lines() {
            let trimmed = raw.trim().trim_start_matches(LIST_MARKERS).trim();
            if trimmed.is_empty() {
                continue;
            }
            let normalized = match markers::strip_proposed(trimmed) {
                Some(payload) => payload.trim().to_string(),
                None => trimmed.to_string(),
            };
            lines.insert(normalized);
        }
        Self { lines }
    }

    /// True if the payload's normalized form was present in the prior
    /// revision.
    pub fn contains_normalized(&self, payload: &str) -> bool {
        self.lines.contains(payload.trim())
    }

    /// Number of distinct normalized lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// True if the prior revision had no usable lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_lines_are_skipped() {
        let index = BaselineIndex::from_revision_text("first\n\n\nsecond\n");
        assert_eq!(index.len(), 2);
        assert!(index.contains_normalized("first"));
        assert!(index.contains_normalized("second"));
    }

    #[test]
    fn test_wrapped_lines_are_stripped_to_payload() {
        let revision = "{{Proposed|Local band played a show.|by=agent}}\nplain line";
        let index = BaselineIndex::from_revision_text(revision);
        assert!(index.contains_normalized("Local band played a show."));
        assert!(index.contains_normalized("plain line"));
        assert!(!index.contains_normalized("{{Proposed|Local band played a show.|by=agent}}"));
    }

    #[test]
    fn test_escaped_pipes_are_restored() {
        let revision = "{{Proposed|Opened 1999 {{!}} closed 2005|by=agent}}";
        let index = BaselineIndex::from_revision_text(revision);
        assert!(index.contains_normalized("Opened 1999 | closed 2005"));
    }

    #[test]
    fn test_lookup_trims_whitespace() {
        let index = BaselineIndex::from_revision_text("  padded line  ");
        assert!(index.contains_normalized("padded line"));
        assert!(index.contains_normalized("  padded line\t"));
    }

    #[test]
    fn test_list_items_index_their_payload() {
        let revision = "* old fact\n* {{Proposed|pending fact|by=agent}}";
        let index = BaselineIndex::from_revision_text(revision);
        assert!(index.contains_normalized("old fact"));
        assert!(index.contains_normalized("pending fact"));
        assert!(!index.contains_normalized("* old fact"));
    }

    #[test]
    fn test_empty_revision() {
        let index = BaselineIndex::from_revision_text("");
        assert!(index.is_empty());
        assert!(!index.contains_normalized("anything"));
    }
}
