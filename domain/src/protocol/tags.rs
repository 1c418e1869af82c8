//! Tag grammar primitives.
//!
//! Every structured field in the protocol is encoded as `<tag>value</tag>`
//! inside otherwise free-form text. [`extract_between_tags`] is the single
//! reader used for tool names, parameter values and result regions.

/// Outer wrapper of an invocation request.
pub const FUNCTION_CALLS: &str = "function_calls";
/// One tool call inside [`FUNCTION_CALLS`].
pub const INVOKE: &str = "invoke";
/// Tool name inside an invocation, a tool description or a result.
pub const TOOL_NAME: &str = "tool_name";
/// Parameter list inside an invocation or a tool description.
pub const PARAMETERS: &str = "parameters";
/// Wrapper of injected results.
pub const FUNCTION_RESULTS: &str = "function_results";
/// One result inside [`FUNCTION_RESULTS`].
pub const RESULT: &str = "result";
/// Tool output inside a [`RESULT`].
pub const STDOUT: &str = "stdout";

/// `<name>`
pub fn open_tag(name: &str) -> String {
    format!("<{}>", name)
}

/// `</name>`
pub fn close_tag(name: &str) -> String {
    format!("</{}>", name)
}

/// `<name>content</name>`
pub fn wrap_tag(name: &str, content: &str) -> String {
    format!("<{name}>{content}</{name}>")
}

/// Return every substring enclosed by `<tag>` … `</tag>` in `text`.
///
/// Matching is non-greedy and left to right: each opening tag pairs with the
/// nearest closing tag after it, and scanning resumes after that closing tag.
/// Values may span lines. An opening tag with no closing tag after it yields
/// nothing. With `strip`, surrounding whitespace is trimmed from each value.
pub fn extract_between_tags(tag: &str, text: &str, strip: bool) -> Vec<String> {
    let open = open_tag(tag);
    let close = close_tag(tag);

    let mut matches = Vec::new();
    let mut rest = text;
    while let Some(start) = rest.find(&open) {
        let inner = &rest[start + open.len()..];
        let Some(end) = inner.find(&close) else {
            break;
        };
        let value = &inner[..end];
        matches.push(if strip { value.trim() } else { value }.to_string());
        rest = &inner[end + close.len()..];
    }
    matches
}

/// First match of `tag`, if any.
pub fn first_between_tags(tag: &str, text: &str, strip: bool) -> Option<String> {
    extract_between_tags(tag, text, strip).into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_then_extract_returns_original() {
        for s in ["7", "hello world", "", "  padded  ", "line one\nline two\n", "a < b"] {
            let text = wrap_tag("value", s);
            assert_eq!(extract_between_tags("value", &text, false), vec![s.to_string()]);
        }
    }

    #[test]
    fn test_missing_tag_is_empty() {
        assert!(extract_between_tags("operator", "no tags here", false).is_empty());
        assert!(extract_between_tags("operator", "<other>x</other>", false).is_empty());
    }

    #[test]
    fn test_unclosed_tag_yields_nothing() {
        assert!(extract_between_tags("a", "<a>never closed", false).is_empty());
        assert_eq!(
            extract_between_tags("a", "<a>one</a><a>dangling", false),
            vec!["one".to_string()]
        );
    }

    #[test]
    fn test_multiple_matches_in_order() {
        let text = "<x>1</x> filler <x>2</x>\n<x>3</x>";
        assert_eq!(extract_between_tags("x", text, false), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_non_greedy_across_lines() {
        let text = "<stdout>\nfirst\n</stdout>\n<stdout>\nsecond\n</stdout>";
        assert_eq!(
            extract_between_tags("stdout", text, false),
            vec!["\nfirst\n", "\nsecond\n"]
        );
        assert_eq!(
            extract_between_tags("stdout", text, true),
            vec!["first", "second"]
        );
    }

    #[test]
    fn test_tag_name_is_matched_exactly() {
        let text = "<operand>1</operand><first_operand>2</first_operand>";
        assert_eq!(extract_between_tags("operand", text, false), vec!["1"]);
        assert_eq!(extract_between_tags("first_operand", text, false), vec!["2"]);
    }

    #[test]
    fn test_first_between_tags() {
        assert_eq!(
            first_between_tags("tool_name", "<tool_name> calc </tool_name>", true),
            Some("calc".to_string())
        );
        assert_eq!(first_between_tags("tool_name", "", true), None);
    }
}
