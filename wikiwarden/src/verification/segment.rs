//! Line classification and paragraph segmentation.

use super::baseline::BaselineIndex;
use super::wrapper;

/// Characters that open a list item. One or more of these form the item's
/// prefix; the payload after them is wrapped independently.
pub(crate) const LIST_MARKERS: &[char] = &['*', '#', ';', ':'];

/// Classification of a single raw line of wikitext.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Empty or whitespace-only line.
    Blank,
    /// Section heading (`== Title ==`).
    Heading,
    /// Category membership link (`[[Category:...]]`).
    Category,
    /// Table open/close/row/header syntax (`{|`, `|}`, `|-`, `|...`, `!...`).
    TableSyntax,
    /// Template invocation braces (`{{...` opening, or a bare `}}` close
    /// line of a multi-line invocation).
    TemplateOpen,
    /// List item (`*`, `#`, `;`, `:` prefixes).
    ListItem,
    /// Anything else; accumulated into paragraphs.
    Prose,
}

/// Classify one line. Checks run in a fixed order so overlapping prefixes
/// resolve deterministically (`{{` is tested before `{|`).
pub fn classify_line(line: &str) -> LineKind {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return LineKind::Blank;
    }
    if trimmed.starts_with('=') {
        return LineKind::Heading;
    }
    if trimmed
        .get(..11)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("[[category:"))
    {
        return LineKind::Category;
    }
    if trimmed.starts_with("{{") || trimmed.starts_with("}}") {
        return LineKind::TemplateOpen;
    }
    if trimmed.starts_with("{|") || trimmed.starts_with('|') || trimmed.starts_with('!') {
        return LineKind::TableSyntax;
    }
    if trimmed.starts_with(LIST_MARKERS) {
        return LineKind::ListItem;
    }
    LineKind::Prose
}

/// Walk the document line by line, passing structural lines through
/// unchanged, handing list items to the wrapper, and accumulating prose
/// into paragraphs that are wrapped as single blocks.
///
/// Paragraph lines are trimmed and joined with single spaces before
/// wrapping: multi-line prose becomes one logical block. This lossy
/// normalization is what the baseline index compares against.
pub fn segment_and_wrap(text: &str, baseline: Option<&BaselineIndex>) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut paragraph: Vec<&str> = Vec::new();

    for line in text.lines() {
        match classify_line(line) {
            LineKind::Blank
            | LineKind::Heading
            | LineKind::Category
            | LineKind::TableSyntax
            | LineKind::TemplateOpen => {
                flush_paragraph(&mut paragraph, &mut out, baseline);
                out.push(line.to_string());
            }
            LineKind::ListItem => {
                flush_paragraph(&mut paragraph, &mut out, baseline);
                out.push(wrapper::wrap_list_item(line, baseline));
            }
            LineKind::Prose => paragraph.push(line),
        }
    }
    flush_paragraph(&mut paragraph, &mut out, baseline);

    out.join("\n")
}

fn flush_paragraph(paragraph: &mut Vec<&str>, out: &mut Vec<String>, baseline: Option<&BaselineIndex>) {
    if paragraph.is_empty() {
        return;
    }
    let joined = paragraph
        .iter()
        .map(|line| line.trim())
        .collect::<Vec<_>>()
        .join(" ");
    out.push(wrapper::wrap_block(&joined, baseline));
    paragraph.clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_structural_lines() {
        assert_eq!(classify_line(""), LineKind::Blank);
        assert_eq!(classify_line("   "), LineKind::Blank);
        assert_eq!(classify_line("== History =="), LineKind::Heading);
        assert_eq!(classify_line("[[Category:Venues]]"), LineKind::Category);
        assert_eq!(classify_line("[[category:venues]]"), LineKind::Category);
        assert_eq!(classify_line("{| class=\"wikitable\""), LineKind::TableSyntax);
        assert_eq!(classify_line("|-"), LineKind::TableSyntax);
        assert_eq!(classify_line("| cell"), LineKind::TableSyntax);
        assert_eq!(classify_line("! header"), LineKind::TableSyntax);
        assert_eq!(classify_line("|}"), LineKind::TableSyntax);
        assert_eq!(classify_line("{{Reflist}}"), LineKind::TemplateOpen);
        assert_eq!(classify_line("}}"), LineKind::TemplateOpen);
    }

    #[test]
    fn test_mid_document_template_passes_through() {
        let text = "{{Reflist\n|group=notes\n}}";
        assert_eq!(segment_and_wrap(text, None), text);
    }

    #[test]
    fn test_classify_list_and_prose() {
        assert_eq!(classify_line("* item"), LineKind::ListItem);
        assert_eq!(classify_line("## nested"), LineKind::ListItem);
        assert_eq!(classify_line("; term"), LineKind::ListItem);
        assert_eq!(classify_line(": indented"), LineKind::ListItem);
        assert_eq!(classify_line("Just some prose."), LineKind::Prose);
        assert_eq!(classify_line("[[Jane Doe]] toured."), LineKind::Prose);
    }

    #[test]
    fn test_structural_lines_pass_through_byte_identical() {
        let text = "== History ==\n[[Category:Venues]]\n{| class=\"x\"\n|-\n| cell\n|}";
        assert_eq!(segment_and_wrap(text, None), text);
    }

    #[test]
    fn test_prose_paragraph_is_wrapped() {
        let out = segment_and_wrap("Local band played a show.", None);
        assert_eq!(out, "{{Proposed|Local band played a show.|by=agent}}");
    }

    #[test]
    fn test_multiline_paragraph_collapses_to_one_block() {
        let out = segment_and_wrap("First sentence\nwraps onto a second line.", None);
        assert_eq!(
            out,
            "{{Proposed|First sentence wraps onto a second line.|by=agent}}"
        );
    }

    #[test]
    fn test_blank_line_separates_paragraphs() {
        let out = segment_and_wrap("One.\n\nTwo.", None);
        assert_eq!(
            out,
            "{{Proposed|One.|by=agent}}\n\n{{Proposed|Two.|by=agent}}"
        );
    }

    #[test]
    fn test_heading_flushes_paragraph_in_order() {
        let out = segment_and_wrap("Intro prose.\n== Shows ==\nMore prose.", None);
        assert_eq!(
            out,
            "{{Proposed|Intro prose.|by=agent}}\n== Shows ==\n{{Proposed|More prose.|by=agent}}"
        );
    }
}
