//! Status injection for documents that open with a recognized structured
//! template.

use once_cell::sync::Lazy;
use regex::Regex;

use super::baseline::BaselineIndex;
use super::braces;
use super::segment;

/// Structured templates known to accept a `status` field. Matched
/// case-insensitively against the template name that opens the document.
pub const RECOGNIZED_TEMPLATES: &[&str] = &["Infobox", "Band", "Show", "Venue", "Album", "Event"];

/// Field injected into a recognized template pending review.
const STATUS_FIELD: &str = "|status=proposed";

static STATUS_PRESENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\|\s*status\s*=\s*proposed\b").expect("status pattern is valid"));

/// If the document opens with a recognized template, inject
/// `|status=proposed` as its first field and run the remainder of the
/// document through segmentation. Returns `None` when the document does not
/// open with a recognized template, in which case the caller segments the
/// whole document instead.
pub fn inject_status(text: &str, baseline: Option<&BaselineIndex>) -> Option<String> {
    let brace_start = text.len() - text.trim_start().len();
    let name_end = recognized_template_name_end(&text[brace_start..])? + brace_start;

    let template_end = braces::find_template_end(text, brace_start);
    let template_span = &text[brace_start..template_end];

    let mut result = String::with_capacity(text.len() + STATUS_FIELD.len() + 1);
    result.push_str(&text[..brace_start]);
    if STATUS_PRESENT_RE.is_match(template_span) {
        result.push_str(template_span);
    } else {
        result.push_str(&text[brace_start..name_end]);
        // Keep the status as the first field: on its own line when the
        // template is written one field per line, inline otherwise.
        if !text[name_end..].starts_with('|') {
            result.push('\n');
        }
        result.push_str(STATUS_FIELD);
        result.push_str(&text[name_end..template_end]);
    }

    let rest = &text[template_end..];
    if !rest.is_empty() {
        result.push_str(&segment::segment_and_wrap(rest, baseline));
    }
    Some(result)
}

/// Byte offset just past the template name when the text opens with
/// `{{<RecognizedName>` followed immediately by a newline or field
/// separator.
fn recognized_template_name_end(text: &str) -> Option<usize> {
    let after_braces = text.strip_prefix("{{")?;
    for name in RECOGNIZED_TEMPLATES {
        let matches_name = after_braces
            .get(..name.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(name));
        if matches_name {
            let next = after_braces[name.len()..].chars().next();
            if matches!(next, Some('\n') | Some('\r') | Some('|')) {
                return Some(2 + name.len());
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_injected_as_first_field() {
        let out = inject_status("{{Show\n|name=X\n}}", None).unwrap();
        assert_eq!(out, "{{Show\n|status=proposed\n|name=X\n}}");
    }

    #[test]
    fn test_inline_template_keeps_status_first() {
        let out = inject_status("{{Venue|city=Olympia}}", None).unwrap();
        assert_eq!(out, "{{Venue|status=proposed|city=Olympia}}");
    }

    #[test]
    fn test_existing_status_is_not_duplicated() {
        let text = "{{Show\n|status=proposed\n|name=X\n}}";
        assert_eq!(inject_status(text, None).unwrap(), text);
    }

    #[test]
    fn test_unrecognized_template_is_not_touched() {
        assert!(inject_status("{{Reflist}}", None).is_none());
        assert!(inject_status("{{Showcase|name=X}}", None).is_none());
        assert!(inject_status("plain prose", None).is_none());
    }

    #[test]
    fn test_remainder_is_segmented_and_wrapped() {
        let out = inject_status("{{Band\n|name=X\n}}\nFormed last year.", None).unwrap();
        assert_eq!(
            out,
            "{{Band\n|status=proposed\n|name=X\n}}\n{{Proposed|Formed last year.|by=agent}}"
        );
    }

    #[test]
    fn test_unterminated_template_swallows_remainder() {
        let text = "{{Show\n|name=X\nThis prose is inside the broken template.";
        let out = inject_status(text, None).unwrap();
        assert_eq!(
            out,
            "{{Show\n|status=proposed\n|name=X\nThis prose is inside the broken template."
        );
    }

    #[test]
    fn test_leading_whitespace_is_preserved() {
        let out = inject_status("  {{Album\n|title=Y\n}}", None).unwrap();
        assert_eq!(out, "  {{Album\n|status=proposed\n|title=Y\n}}");
    }

    #[test]
    fn test_case_insensitive_template_name() {
        let out = inject_status("{{show\n|name=X\n}}", None).unwrap();
        assert_eq!(out, "{{show\n|status=proposed\n|name=X\n}}");
    }

    #[test]
    fn test_nested_template_end_is_balanced() {
        let text = "{{Show\n|date={{Start date|2024}}\n}}\nNew claim.";
        let out = inject_status(text, None).unwrap();
        assert_eq!(
            out,
            "{{Show\n|status=proposed\n|date={{Start date|2024}}\n}}\n{{Proposed|New claim.|by=agent}}"
        );
    }
}
