//! Invocation parsing: finds the tool calls in a halted completion.

use super::tags::{
    FUNCTION_CALLS, INVOKE, TOOL_NAME, extract_between_tags, first_between_tags, open_tag,
};
use crate::tool::value_objects::InvocationRequest;

/// Extract every `<invoke>` block from the model's output, in order.
///
/// The tool name is the first `<tool_name>` inside the block, trimmed; a
/// block without one gets an empty name and is resolved by the caller.
///
/// When the output opens `<function_calls>` but contains no closed
/// `<invoke>` block, everything after the opening tag is read as a single
/// invocation. Returns an empty vec only when no call block was opened.
pub fn parse_invocations(text: &str) -> Vec<InvocationRequest> {
    let invocations: Vec<_> = extract_between_tags(INVOKE, text, false)
        .into_iter()
        .map(invocation_from)
        .collect();
    if !invocations.is_empty() {
        return invocations;
    }

    let open = open_tag(FUNCTION_CALLS);
    match text.find(&open) {
        Some(start) => vec![invocation_from(text[start + open.len()..].to_string())],
        None => Vec::new(),
    }
}

fn invocation_from(body: String) -> InvocationRequest {
    let tool_name = first_between_tags(TOOL_NAME, &body, true).unwrap_or_default();
    InvocationRequest::new(tool_name, body)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HALTED: &str = "I'll compute that.\n\n<function_calls>\n<invoke>\n<tool_name>calculator</tool_name>\n<parameters>\n<first_operand>3</first_operand>\n<second_operand>4</second_operand>\n<operator>+</operator>\n</parameters>\n</invoke>\n";

    #[test]
    fn test_parse_single_invocation() {
        let invocations = parse_invocations(HALTED);
        assert_eq!(invocations.len(), 1);
        assert_eq!(invocations[0].tool_name, "calculator");
        assert!(invocations[0].body.contains("<operator>+</operator>"));
    }

    #[test]
    fn test_parse_multiple_invocations_in_order() {
        let text = "<function_calls><invoke><tool_name>a</tool_name></invoke>\
                    <invoke><tool_name> b </tool_name></invoke>";
        let names: Vec<String> = parse_invocations(text)
            .into_iter()
            .map(|i| i.tool_name)
            .collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_plain_answer_has_no_invocations() {
        let text = "The capital of France is Paris.";
        assert!(parse_invocations(text).is_empty());
    }

    #[test]
    fn test_unclosed_invoke_read_as_one_invocation() {
        let text = "<function_calls>\n<invoke>\n<tool_name>calculator</tool_name>\n<parameters>\n<first_operand>3</first_operand>\n</parameters>\n";
        let invocations = parse_invocations(text);
        assert_eq!(invocations.len(), 1);
        assert_eq!(invocations[0].tool_name, "calculator");
        assert!(invocations[0].body.contains("<first_operand>3</first_operand>"));
    }

    #[test]
    fn test_open_call_block_without_invoke_has_empty_name() {
        let invocations = parse_invocations("Sure.\n<function_calls>\n<operator>+</operator>");
        assert_eq!(invocations.len(), 1);
        assert_eq!(invocations[0].tool_name, "");
        assert_eq!(invocations[0].body, "\n<operator>+</operator>");
    }

    #[test]
    fn test_missing_tool_name_is_empty() {
        let invocations = parse_invocations("<invoke><parameters></parameters></invoke>");
        assert_eq!(invocations.len(), 1);
        assert_eq!(invocations[0].tool_name, "");
    }
}
