//! Wrapping decisions for paragraphs and list items.

use once_cell::sync::Lazy;
use regex::Regex;

use super::baseline::BaselineIndex;
use super::markers;
use super::segment::LIST_MARKERS;

/// A payload that is exactly one bracketed link with nothing around it is a
/// bare reference, not a claim.
static BARE_LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[\[[^\[\]]+\]\]$").expect("bare link pattern is valid"));

/// Wrap a paragraph payload in the provenance marker, or return it
/// unchanged when it is empty, already flagged, verified, a bare link, or
/// present in the baseline.
pub fn wrap_block(payload: &str, baseline: Option<&BaselineIndex>) -> String {
    let payload = payload.trim();
    if should_skip(payload, baseline) {
        return payload.to_string();
    }
    markers::wrap_proposed(payload)
}

/// Wrap a list item's payload, preserving its marker prefix. Items whose
/// payload is skipped are emitted byte-identical to the input line.
pub fn wrap_list_item(line: &str, baseline: Option<&BaselineIndex>) -> String {
    let trimmed = line.trim();
    let prefix_end = trimmed
        .find(|c| !LIST_MARKERS.contains(&c))
        .unwrap_or(trimmed.len());
    let (prefix, payload) = trimmed.split_at(prefix_end);
    let payload = payload.trim();
    if should_skip(payload, baseline) {
        return line.to_string();
    }
    format!("{prefix} {}", markers::wrap_proposed(payload))
}

fn should_skip(payload: &str, baseline: Option<&BaselineIndex>) -> bool {
    if payload.is_empty() || markers::is_flagged(payload) || markers::is_verified(payload) {
        return true;
    }
    if BARE_LINK_RE.is_match(payload) {
        return true;
    }
    baseline.is_some_and(|index| index.contains_normalized(payload))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_prose_is_wrapped() {
        assert_eq!(
            wrap_block("Local band played a show.", None),
            "{{Proposed|Local band played a show.|by=agent}}"
        );
    }

    #[test]
    fn test_empty_payload_passes_through() {
        assert_eq!(wrap_block("", None), "");
        assert_eq!(wrap_block("   ", None), "");
    }

    #[test]
    fn test_already_wrapped_payload_is_not_double_wrapped() {
        let wrapped = markers::wrap_proposed("claim");
        assert_eq!(wrap_block(&wrapped, None), wrapped);
    }

    #[test]
    fn test_verified_payload_is_never_wrapped() {
        let cited = "The venue opened in 1992.{{Source|city-records}}";
        assert_eq!(wrap_block(cited, None), cited);
    }

    #[test]
    fn test_bare_link_is_not_a_claim() {
        assert_eq!(wrap_block("[[Jane Doe]]", None), "[[Jane Doe]]");
        // Surrounding text makes it a claim again.
        let claim = "[[Jane Doe]] founded the band.";
        assert_eq!(wrap_block(claim, None), markers::wrap_proposed(claim));
    }

    #[test]
    fn test_baseline_match_passes_through() {
        let index = BaselineIndex::from_revision_text("Local band played a show.");
        assert_eq!(
            wrap_block("Local band played a show.", Some(&index)),
            "Local band played a show."
        );
        assert_eq!(
            wrap_block("Local band played two shows.", Some(&index)),
            markers::wrap_proposed("Local band played two shows.")
        );
    }

    #[test]
    fn test_list_item_bare_link_unchanged() {
        assert_eq!(wrap_list_item("* [[Jane Doe]]", None), "* [[Jane Doe]]");
    }

    #[test]
    fn test_list_item_claim_keeps_prefix() {
        assert_eq!(
            wrap_list_item("** Jane joined in 2003", None),
            "** {{Proposed|Jane joined in 2003|by=agent}}"
        );
    }

    #[test]
    fn test_list_item_baseline_match_unchanged() {
        let index = BaselineIndex::from_revision_text("old fact");
        assert_eq!(wrap_list_item("* old fact", Some(&index)), "* old fact");
    }

    #[test]
    fn test_bare_list_marker_unchanged() {
        assert_eq!(wrap_list_item("*", None), "*");
    }
}
