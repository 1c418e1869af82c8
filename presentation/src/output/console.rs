//! Console output formatter for cycle results

use colored::Colorize;
use toolcall_application::{CycleOutcome, RunToolCycleOutput};
use toolcall_domain::protocol::tags::{FUNCTION_CALLS, FUNCTION_RESULTS, close_tag, open_tag};
use toolcall_domain::ToolDefinition;

/// Formats cycle results and tool listings for console display.
///
/// Colours go through `colored`, so `colored::control::set_override(false)`
/// turns every method into plain text.
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Turn colours off for everything printed afterwards.
    pub fn disable_color() {
        colored::control::set_override(false);
    }

    /// The whole transcript, with protocol blocks dimmed.
    pub fn format(output: &RunToolCycleOutput) -> String {
        let mut out = Self::highlight_protocol(output.text());
        if !out.ends_with('\n') {
            out.push('\n');
        }

        if let CycleOutcome::ToolsInvoked { results } = &output.outcome {
            out.push_str(&format!(
                "\n{} {}\n",
                "Tools:".cyan().bold(),
                results
                    .iter()
                    .map(|r| format!("{} → {}", r.tool_name, r.result))
                    .collect::<Vec<_>>()
                    .join(", ")
            ));
        }
        out
    }

    /// Only the model's answer: the continuation after the injected
    /// results, or the whole text of a direct answer.
    pub fn format_answer(output: &RunToolCycleOutput) -> String {
        let text = output.text();
        let answer = match &output.outcome {
            CycleOutcome::DirectAnswer => text,
            CycleOutcome::ToolsInvoked { .. } => {
                let marker = close_tag(FUNCTION_RESULTS);
                text.rfind(&marker)
                    .map(|i| &text[i + marker.len()..])
                    .unwrap_or(text)
            }
        };
        format!("{}\n", answer.trim())
    }

    /// Format as JSON
    pub fn format_json(query: &str, output: &RunToolCycleOutput) -> String {
        let (outcome, results) = match &output.outcome {
            CycleOutcome::ToolsInvoked { results } => ("tools_invoked", results.as_slice()),
            CycleOutcome::DirectAnswer => ("direct_answer", &[][..]),
        };
        let value = serde_json::json!({
            "query": query,
            "outcome": outcome,
            "results": results,
            "transcript": output.text(),
        });
        serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string())
    }

    /// One line per tool, with its parameters indented below.
    pub fn format_tools(definitions: &[ToolDefinition]) -> String {
        if definitions.is_empty() {
            return format!("{}\n", "No tools registered".yellow());
        }

        let mut out = String::new();
        for definition in definitions {
            out.push_str(&format!(
                "{}  {}\n",
                definition.name.green().bold(),
                definition.description
            ));
            for param in &definition.parameters {
                out.push_str(&format!(
                    "    {} ({}) {}\n",
                    param.name.cyan(),
                    param.param_type,
                    param.description.dimmed()
                ));
            }
        }
        out
    }

    pub fn format_error(message: &str) -> String {
        format!("{} {}", "Error:".red().bold(), message)
    }

    /// Dim everything from `<function_calls>` through `</function_results>`.
    fn highlight_protocol(text: &str) -> String {
        let open = open_tag(FUNCTION_CALLS);
        let close = close_tag(FUNCTION_RESULTS);

        let mut out = String::with_capacity(text.len());
        let mut rest = text;
        while let Some(start) = rest.find(&open) {
            out.push_str(&rest[..start]);
            let block = &rest[start..];
            let end = block
                .find(&close)
                .map(|i| i + close.len())
                .unwrap_or(block.len());
            out.push_str(&block[..end].dimmed().to_string());
            rest = &block[end..];
        }
        out.push_str(rest);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use toolcall_domain::{ToolParameter, ToolResult, Transcript};

    fn no_colour() {
        ConsoleFormatter::disable_color();
    }

    fn tools_output() -> RunToolCycleOutput {
        let mut transcript = Transcript::new("what is 3 plus 4");
        transcript.set_partial_assistant(
            "Let me check.\n<function_calls>\n<invoke>...</invoke>\n</function_calls><function_results>\n<result>\n<tool_name>calculator</tool_name>\n<stdout>\n7\n</stdout>\n</result>\n</function_results>",
        );
        transcript.push_assistant_text("\n\nThe answer is 7.");
        RunToolCycleOutput {
            transcript,
            outcome: CycleOutcome::ToolsInvoked {
                results: vec![ToolResult::new("calculator", "7")],
            },
            system_prompt: String::new(),
        }
    }

    #[test]
    fn test_answer_is_continuation_only() {
        no_colour();
        assert_eq!(
            ConsoleFormatter::format_answer(&tools_output()),
            "The answer is 7.\n"
        );
    }

    #[test]
    fn test_direct_answer() {
        no_colour();
        let mut transcript = Transcript::new("q");
        transcript.set_partial_assistant("Paris.");
        let output = RunToolCycleOutput {
            transcript,
            outcome: CycleOutcome::DirectAnswer,
            system_prompt: String::new(),
        };
        assert_eq!(ConsoleFormatter::format_answer(&output), "Paris.\n");
        assert!(ConsoleFormatter::format_json("q", &output).contains("\"direct_answer\""));
    }

    #[test]
    fn test_full_format_keeps_transcript() {
        no_colour();
        let text = ConsoleFormatter::format(&tools_output());
        assert!(text.starts_with("Let me check.\n<function_calls>"));
        assert!(text.contains("The answer is 7."));
        assert!(text.contains("calculator → 7"));
    }

    #[test]
    fn test_json_format() {
        let json: serde_json::Value =
            serde_json::from_str(&ConsoleFormatter::format_json("3+4", &tools_output())).unwrap();
        assert_eq!(json["query"], "3+4");
        assert_eq!(json["outcome"], "tools_invoked");
        assert_eq!(json["results"][0]["result"], "7");
    }

    #[test]
    fn test_tools_listing() {
        no_colour();
        let definitions = vec![
            ToolDefinition::new("calculator", "Arithmetic")
                .with_parameter(ToolParameter::integer("first_operand", "First")),
        ];
        let text = ConsoleFormatter::format_tools(&definitions);
        assert!(text.contains("calculator  Arithmetic"));
        assert!(text.contains("first_operand (integer) First"));
        assert!(ConsoleFormatter::format_tools(&[]).contains("No tools"));
    }
}
