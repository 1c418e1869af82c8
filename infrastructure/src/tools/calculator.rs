//! Calculator tool: one binary arithmetic operation on two integers.

use async_trait::async_trait;
use toolcall_application::{HandlerError, ToolHandler};
use toolcall_domain::util::format_float;
use toolcall_domain::{ToolArguments, ToolDefinition, ToolParameter};

/// Tool name constant
pub const CALCULATOR: &str = "calculator";

/// Returned as a normal result for operators other than `+ - * /`
pub const UNSUPPORTED_OPERATION: &str = "Error: unsupported operation.";

/// Get the tool definition for calculator
pub fn calculator_definition() -> ToolDefinition {
    ToolDefinition::new(
        CALCULATOR,
        "A calculator function for doing basic arithmetic. Supports addition, subtraction, multiplication and division.",
    )
    .with_parameters(vec![
        ToolParameter::integer("first_operand", "First operand (before the operator)"),
        ToolParameter::integer("second_operand", "Second operand (after the operator)"),
        ToolParameter::string(
            "operator",
            "The operation to perform. Must be one of +, -, *, /",
        ),
    ])
}

/// `+ - *` produce integers; `/` always produces a float (`8 / 2` is `4.0`).
pub struct CalculatorTool;

impl CalculatorTool {
    fn evaluate(a: i64, b: i64, operator: &str) -> Result<String, HandlerError> {
        let overflow = || HandlerError::ExecutionFailed(format!("integer overflow in {a} {operator} {b}"));
        match operator.trim() {
            "+" => a.checked_add(b).map(|n| n.to_string()).ok_or_else(overflow),
            "-" => a.checked_sub(b).map(|n| n.to_string()).ok_or_else(overflow),
            "*" => a.checked_mul(b).map(|n| n.to_string()).ok_or_else(overflow),
            "/" => {
                if b == 0 {
                    return Err(HandlerError::ExecutionFailed("division by zero".to_string()));
                }
                Ok(format_float(a as f64 / b as f64))
            }
            _ => Ok(UNSUPPORTED_OPERATION.to_string()),
        }
    }
}

#[async_trait]
impl ToolHandler for CalculatorTool {
    async fn call(&self, arguments: &ToolArguments) -> Result<String, HandlerError> {
        let a = arguments.get_i64("first_operand").unwrap_or_default();
        let b = arguments.get_i64("second_operand").unwrap_or_default();
        let operator = arguments.get_str("operator").unwrap_or_default();
        Self::evaluate(a, b, operator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use toolcall_domain::{ParamValue, coerce_parameters};

    async fn calc(a: i64, b: i64, op: &str) -> Result<String, HandlerError> {
        let args = ToolArguments::new()
            .with("first_operand", ParamValue::Integer(a))
            .with("second_operand", ParamValue::Integer(b))
            .with("operator", ParamValue::String(op.to_string()));
        CalculatorTool.call(&args).await
    }

    #[tokio::test]
    async fn test_integer_operations() {
        assert_eq!(calc(3, 4, "+").await.unwrap(), "7");
        assert_eq!(calc(3, 4, "-").await.unwrap(), "-1");
        assert_eq!(calc(6, 7, "*").await.unwrap(), "42");
    }

    #[tokio::test]
    async fn test_division_is_float() {
        assert_eq!(calc(7, 2, "/").await.unwrap(), "3.5");
        assert_eq!(calc(8, 2, "/").await.unwrap(), "4.0");
    }

    #[tokio::test]
    async fn test_unsupported_operator_is_a_result() {
        assert_eq!(calc(3, 4, "%").await.unwrap(), UNSUPPORTED_OPERATION);
        assert_eq!(calc(3, 4, "").await.unwrap(), UNSUPPORTED_OPERATION);
    }

    #[tokio::test]
    async fn test_division_by_zero_fails() {
        assert!(matches!(
            calc(1, 0, "/").await,
            Err(HandlerError::ExecutionFailed(m)) if m == "division by zero"
        ));
    }

    #[tokio::test]
    async fn test_overflow_fails() {
        assert!(calc(i64::MAX, 1, "+").await.is_err());
    }

    #[tokio::test]
    async fn test_from_invocation_text() {
        let body = "<tool_name>calculator</tool_name><parameters>\
                    <first_operand> 12 </first_operand>\
                    <second_operand>30</second_operand>\
                    <operator>+</operator></parameters>";
        let args = coerce_parameters(&calculator_definition().parameters, body).unwrap();
        assert_eq!(CalculatorTool.call(&args).await.unwrap(), "42");
    }

    #[test]
    fn test_definition_is_valid() {
        let definition = calculator_definition();
        assert!(definition.validate().is_ok());
        assert_eq!(
            definition.parameter_names().collect::<Vec<_>>(),
            vec!["first_operand", "second_operand", "operator"]
        );
    }
}
