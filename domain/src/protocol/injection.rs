//! Result injection: tool output back into the tag grammar.

use super::tags::{
    FUNCTION_CALLS, FUNCTION_RESULTS, RESULT, STDOUT, TOOL_NAME, close_tag, open_tag, wrap_tag,
};
use crate::tool::value_objects::ToolResult;

/// Render results as a `<function_results>` block, one `<result>` per
/// entry in execution order.
pub fn format_function_results(results: &[ToolResult]) -> String {
    let blocks = results
        .iter()
        .map(|res| {
            format!(
                "{}\n{}\n{}\n{}\n{}\n{}",
                open_tag(RESULT),
                wrap_tag(TOOL_NAME, &res.tool_name),
                open_tag(STDOUT),
                res.result,
                close_tag(STDOUT),
                close_tag(RESULT),
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "{}\n{}\n{}",
        open_tag(FUNCTION_RESULTS),
        blocks,
        close_tag(FUNCTION_RESULTS)
    )
}

/// Build the assistant turn replayed to the model: the output generated
/// before the stop sequence, the closing tag the stop sequence swallowed,
/// then the results.
pub fn partial_assistant_message(truncated_output: &str, results: &[ToolResult]) -> String {
    format!(
        "{}{}{}",
        truncated_output,
        close_tag(FUNCTION_CALLS),
        format_function_results(results)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::tags::extract_between_tags;

    #[test]
    fn test_single_result_layout() {
        let block = format_function_results(&[ToolResult::new("calculator", "7")]);
        assert_eq!(
            block,
            "<function_results>\n<result>\n<tool_name>calculator</tool_name>\n<stdout>\n7\n</stdout>\n</result>\n</function_results>"
        );
    }

    #[test]
    fn test_results_joined_in_execution_order() {
        let block = format_function_results(&[
            ToolResult::new("first", "1"),
            ToolResult::new("second", "2"),
        ]);
        assert_eq!(
            extract_between_tags("tool_name", &block, false),
            vec!["first", "second"]
        );
        assert_eq!(extract_between_tags("stdout", &block, true), vec!["1", "2"]);
    }

    #[test]
    fn test_partial_message_closes_function_calls() {
        let message = partial_assistant_message(
            "<function_calls>\n<invoke>...</invoke>\n",
            &[ToolResult::new("calculator", "7")],
        );
        assert!(message.starts_with(
            "<function_calls>\n<invoke>...</invoke>\n</function_calls><function_results>"
        ));
        assert!(message.ends_with("</function_results>"));
    }

    #[test]
    fn test_result_text_is_injected_verbatim() {
        let text = "Error: unsupported operation.";
        let message = partial_assistant_message("", &[ToolResult::new("calculator", text)]);
        assert_eq!(extract_between_tags("stdout", &message, true), vec![text]);
    }
}
