//! Exempt-namespace classification for page titles.

/// Namespace prefixes that are excluded from verification. Discussion,
/// administrative, and meta content is edited without provenance flagging.
const EXEMPT_NAMESPACES: &[&str] = &[
    "talk",
    "user",
    "project",
    "template",
    "category",
    "help",
    "file",
    "mediawiki",
    "special",
];

/// Suffix marking the talk namespace of any other namespace, e.g.
/// `User_talk:Jane`.
const TALK_SUFFIX: &str = "_talk";

/// Decide whether a page title is exempt from verification.
///
/// Titles without a colon live in the main content namespace and are never
/// exempt. Otherwise the prefix before the first colon is matched
/// case-insensitively against the exemption list and the talk suffix.
pub fn is_exempt_title(title: &str) -> bool {
    let Some((prefix, _)) = title.split_once(':') else {
        return false;
    };
    let prefix = prefix.trim().to_ascii_lowercase();
    EXEMPT_NAMESPACES.contains(&prefix.as_str()) || prefix.ends_with(TALK_SUFFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_main_namespace_is_not_exempt() {
        assert!(!is_exempt_title("The Crocodile Cafe"));
        assert!(!is_exempt_title("Jane Doe (musician)"));
    }

    #[test]
    fn test_talk_pages_are_exempt() {
        assert!(is_exempt_title("Talk:Foo"));
        assert!(is_exempt_title("talk:Foo"));
        assert!(is_exempt_title("User_talk:Jane"));
        assert!(is_exempt_title("TEMPLATE_TALK:Infobox Band"));
    }

    #[test]
    fn test_meta_namespaces_are_exempt() {
        assert!(is_exempt_title("User:Jane"));
        assert!(is_exempt_title("Template:Band"));
        assert!(is_exempt_title("Category:Venues"));
        assert!(is_exempt_title("MediaWiki:Sidebar"));
    }

    #[test]
    fn test_colon_in_title_body_is_not_a_namespace() {
        // A colon whose prefix is not a known namespace stays in main space.
        assert!(!is_exempt_title("Album: The Early Years"));
        assert!(!is_exempt_title("7:00 Club"));
    }
}
