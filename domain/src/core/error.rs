//! Domain error types

use thiserror::Error;

/// Domain-level errors raised while building tool descriptors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid tool name: '{0}'")]
    InvalidToolName(String),

    #[error("Unknown parameter type '{0}' (expected one of: integer, string)")]
    UnknownParamType(String),

    #[error("Invalid parameter name: '{0}'")]
    InvalidParameterName(String),

    #[error("Duplicate parameter '{parameter}' in tool '{tool}'")]
    DuplicateParameter { tool: String, parameter: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_param_type_display() {
        let error = DomainError::UnknownParamType("float".to_string());
        assert_eq!(
            error.to_string(),
            "Unknown parameter type 'float' (expected one of: integer, string)"
        );
    }

    #[test]
    fn test_duplicate_parameter_display() {
        let error = DomainError::DuplicateParameter {
            tool: "calculator".to_string(),
            parameter: "operator".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Duplicate parameter 'operator' in tool 'calculator'"
        );
    }
}
