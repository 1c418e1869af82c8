//! System prompt compilation for tool use

use crate::protocol::tags::{PARAMETERS, TOOL_NAME, close_tag, open_tag, wrap_tag};
use crate::tool::entities::{ToolDefinition, ToolParameter};

/// Protocol instructions placed before the tool list.
const INSTRUCTIONS: &str = r#"In this environment you have access to a set of tools you can use to answer the user's question.

You may call them like this:
<function_calls>
<invoke>
<tool_name>$TOOL_NAME</tool_name>
<parameters>
<$PARAMETER_NAME>$PARAMETER_VALUE</$PARAMETER_NAME>
...
</parameters>
</invoke>
</function_calls>

Here are the tools available:
"#;

/// Templates for the tool-use system prompt.
///
/// Output is a pure function of the input: the same definitions in the
/// same order always compile to the same bytes.
pub struct ToolUsePromptTemplate;

impl ToolUsePromptTemplate {
    /// Full system prompt: instructions followed by a `<tools>` block with
    /// one description per tool, in input order.
    ///
    /// Duplicate names are rendered as given.
    pub fn system_prompt<'a>(tools: impl IntoIterator<Item = &'a ToolDefinition>) -> String {
        let descriptions = tools
            .into_iter()
            .map(Self::tool_description)
            .collect::<Vec<_>>()
            .join("\n");

        format!("{INSTRUCTIONS}<tools>\n{descriptions}\n</tools>")
    }

    /// `<tool_description>` block for a single tool.
    pub fn tool_description(tool: &ToolDefinition) -> String {
        format!(
            "<tool_description>\n{}\n<description>\n{}\n</description>\n{}\n{}\n{}\n</tool_description>",
            wrap_tag(TOOL_NAME, &tool.name),
            tool.description,
            open_tag(PARAMETERS),
            Self::parameters(&tool.parameters),
            close_tag(PARAMETERS),
        )
    }

    fn parameters(parameters: &[ToolParameter]) -> String {
        parameters
            .iter()
            .map(|p| {
                format!(
                    "<parameter>\n{}\n{}\n{}\n</parameter>",
                    wrap_tag("name", &p.name),
                    wrap_tag("type", p.param_type.as_str()),
                    wrap_tag("description", &p.description),
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::entities::ToolParameter;

    fn calculator() -> ToolDefinition {
        ToolDefinition::new("calculator", "A calculator for basic arithmetic.")
            .with_parameter(ToolParameter::integer("first_operand", "First operand"))
            .with_parameter(ToolParameter::string("operator", "One of +, -, *, /"))
    }

    #[test]
    fn test_tool_description_layout() {
        let block = ToolUsePromptTemplate::tool_description(&calculator());
        assert_eq!(
            block,
            "<tool_description>\n\
             <tool_name>calculator</tool_name>\n\
             <description>\n\
             A calculator for basic arithmetic.\n\
             </description>\n\
             <parameters>\n\
             <parameter>\n<name>first_operand</name>\n<type>integer</type>\n<description>First operand</description>\n</parameter>\n\
             <parameter>\n<name>operator</name>\n<type>string</type>\n<description>One of +, -, *, /</description>\n</parameter>\n\
             </parameters>\n\
             </tool_description>"
        );
    }

    #[test]
    fn test_system_prompt_is_deterministic() {
        let tools = vec![calculator(), ToolDefinition::new("echo", "Echo input")];
        let first = ToolUsePromptTemplate::system_prompt(&tools);
        let second = ToolUsePromptTemplate::system_prompt(&tools);
        assert_eq!(first, second);
    }

    #[test]
    fn test_system_prompt_contains_grammar_and_tools_in_order() {
        let tools = vec![ToolDefinition::new("zeta", "z"), calculator()];
        let prompt = ToolUsePromptTemplate::system_prompt(&tools);

        assert!(prompt.starts_with("In this environment"));
        assert!(prompt.contains("<function_calls>\n<invoke>\n<tool_name>$TOOL_NAME</tool_name>"));
        assert!(prompt.ends_with("</tool_description>\n</tools>"));

        let zeta = prompt.find("<tool_name>zeta</tool_name>").unwrap();
        let calc = prompt.find("<tool_name>calculator</tool_name>").unwrap();
        assert!(zeta < calc);
    }

    #[test]
    fn test_duplicates_are_not_removed() {
        let tools = vec![calculator(), calculator()];
        let prompt = ToolUsePromptTemplate::system_prompt(&tools);
        assert_eq!(prompt.matches("<tool_name>calculator</tool_name>").count(), 2);
    }
}
