//! Provenance-marker syntax and detection.
//!
//! This module is the single source of truth for the wrapper's delimiter
//! syntax: the template name, the attribution field, the pipe-escape
//! convention, and the pattern checks that decide whether text is already
//! flagged or already verified. Every other component goes through these
//! functions so that wrapping and unwrapping stay exact inverses.

use once_cell::sync::Lazy;
use regex::Regex;

/// Template name of the provenance marker.
pub const PROPOSED_TEMPLATE: &str = "Proposed";

/// Fixed attribution field appended to every wrapped block.
pub const ATTRIBUTION_FIELD: &str = "by=agent";

/// MediaWiki escape sequence for a literal pipe inside a template argument.
const PIPE_ESCAPE: &str = "{{!}}";

static FLAGGED_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\{\{\s*proposed\s*[|}]|\|\s*status\s*=\s*(?:proposed|unverified)\b")
        .expect("flagged pattern is valid")
});

static VERIFIED_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\{\{\s*(?:verified|source)\s*[|}]").expect("verified pattern is valid")
});

/// True if the document or fragment already carries a provenance marker or a
/// `status` field set to proposed/unverified. On whole documents this check
/// short-circuits the transform; on fragments it prevents double-wrapping.
pub fn is_flagged(text: &str) -> bool {
    FLAGGED_RE.is_match(text)
}

/// True if the fragment cites a verification or source template. Verified
/// fragments are never wrapped, even when absent from the baseline.
pub fn is_verified(text: &str) -> bool {
    VERIFIED_RE.is_match(text)
}

/// Escape every literal pipe in a payload so it survives as a single
/// template argument.
pub fn escape_payload(payload: &str) -> String {
    payload.replace('|', PIPE_ESCAPE)
}

/// Reverse of [`escape_payload`].
pub fn unescape_payload(payload: &str) -> String {
    payload.replace(PIPE_ESCAPE, "|")
}

/// Wrap a content payload in the provenance marker with the fixed
/// attribution field.
pub fn wrap_proposed(payload: &str) -> String {
    format!(
        "{{{{{PROPOSED_TEMPLATE}|{}|{ATTRIBUTION_FIELD}}}}}",
        escape_payload(payload)
    )
}

/// If `line` is exactly a wrapped block, extract and unescape its payload.
/// Returns `None` for anything that is not a full marker invocation.
pub fn strip_proposed(line: &str) -> Option<String> {
    let trimmed = line.trim();
    let open = format!("{{{{{PROPOSED_TEMPLATE}|");
    let close = format!("|{ATTRIBUTION_FIELD}}}}}");
    let inner = trimmed.strip_prefix(open.as_str())?.strip_suffix(close.as_str())?;
    Some(unescape_payload(inner))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_then_strip_round_trips() {
        let payload = "Local band played a show.";
        let wrapped = wrap_proposed(payload);
        assert_eq!(wrapped, "{{Proposed|Local band played a show.|by=agent}}");
        assert_eq!(strip_proposed(&wrapped).as_deref(), Some(payload));
    }

    #[test]
    fn test_pipe_escaping_round_trips() {
        let payload = "Opened in 1999 | closed in 2005";
        let wrapped = wrap_proposed(payload);
        assert!(!wrapped[2..wrapped.len() - 2].contains("| closed"));
        assert_eq!(strip_proposed(&wrapped).as_deref(), Some(payload));
        assert_eq!(unescape_payload(&escape_payload(payload)), payload);
    }

    #[test]
    fn test_flagged_on_marker_invocation() {
        assert!(is_flagged("{{Proposed|anything|by=agent}}"));
        assert!(is_flagged("text before {{proposed|x|by=agent}} after"));
        assert!(!is_flagged("A proposed change to the setlist."));
    }

    #[test]
    fn test_flagged_on_status_field() {
        assert!(is_flagged("{{Show\n|status=proposed\n|name=X\n}}"));
        assert!(is_flagged("|status = unverified"));
        assert!(!is_flagged("|status=verified"));
        assert!(!is_flagged("the status= field is documented here"));
    }

    #[test]
    fn test_verified_fragments() {
        assert!(is_verified("The venue opened in 1992.{{Verified|ref=123}}"));
        assert!(is_verified("{{source|https://example.org}}"));
        assert!(!is_verified("An unsourced claim."));
    }

    #[test]
    fn test_strip_rejects_partial_markers() {
        assert!(strip_proposed("{{Proposed|missing close").is_none());
        assert!(strip_proposed("plain prose line").is_none());
        assert!(strip_proposed("{{Verified|x|by=agent}}").is_none());
    }
}
