//! Shared helpers for tool use cases.

use toolcall_domain::ToolArguments;

/// Render tool arguments as a short one-line preview for logs.
///
/// `name=value` pairs in declaration order; long string values are
/// shortened with an ellipsis.
pub(crate) fn tool_args_preview(arguments: &ToolArguments) -> String {
    arguments
        .iter()
        .map(|(name, value)| {
            let value = value.to_string().replace('\n', " ");
            format!("{}={}", name, truncate_preview(&value, 50))
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn truncate_preview(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(1)).collect();
        format!("{}…", truncated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use toolcall_domain::ParamValue;

    #[test]
    fn test_preview_in_declaration_order() {
        let args = ToolArguments::new()
            .with("first_operand", ParamValue::Integer(3))
            .with("second_operand", ParamValue::Integer(4))
            .with("operator", ParamValue::String("+".to_string()));
        assert_eq!(
            tool_args_preview(&args),
            "first_operand=3, second_operand=4, operator=+"
        );
    }

    #[test]
    fn test_preview_flattens_newlines() {
        let args = ToolArguments::new().with("body", ParamValue::String("a\nb".to_string()));
        assert_eq!(tool_args_preview(&args), "body=a b");
    }

    #[test]
    fn test_long_value_truncated() {
        let long = "x".repeat(100);
        let args = ToolArguments::new().with("s", ParamValue::String(long));
        let preview = tool_args_preview(&args);
        assert!(preview.ends_with('…'));
        assert_eq!(preview.chars().count(), "s=".len() + 50);
    }

    #[test]
    fn test_empty_arguments() {
        assert_eq!(tool_args_preview(&ToolArguments::new()), "");
    }
}
