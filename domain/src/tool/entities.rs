//! Tool domain entities

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Declared type of a tool parameter.
///
/// The set is closed: a type name outside it is rejected with
/// [`DomainError::UnknownParamType`] rather than treated as a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    Integer,
    String,
}

impl ParamType {
    pub fn as_str(&self) -> &str {
        match self {
            ParamType::Integer => "integer",
            ParamType::String => "string",
        }
    }
}

impl std::fmt::Display for ParamType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ParamType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "integer" | "int" => Ok(ParamType::Integer),
            "string" | "str" => Ok(ParamType::String),
            _ => Err(DomainError::UnknownParamType(s.to_string())),
        }
    }
}

/// Parameter specification for a tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolParameter {
    /// Parameter name, also used as the tag name in invocations
    pub name: String,
    /// Declared type
    #[serde(rename = "type")]
    pub param_type: ParamType,
    /// Parameter description shown to the model
    pub description: String,
}

impl ToolParameter {
    pub fn new(
        name: impl Into<String>,
        param_type: ParamType,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            param_type,
            description: description.into(),
        }
    }

    pub fn integer(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(name, ParamType::Integer, description)
    }

    pub fn string(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(name, ParamType::String, description)
    }
}

/// Definition of a tool that can be offered to the model.
///
/// Pure data: the executable binding lives next to it in the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Unique name of the tool (e.g., "calculator")
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// Parameter specifications, in declaration order
    pub parameters: Vec<ToolParameter>,
}

impl ToolDefinition {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: Vec::new(),
        }
    }

    pub fn with_parameter(mut self, param: ToolParameter) -> Self {
        self.parameters.push(param);
        self
    }

    pub fn with_parameters(mut self, params: impl IntoIterator<Item = ToolParameter>) -> Self {
        self.parameters.extend(params);
        self
    }

    pub fn parameter(&self, name: &str) -> Option<&ToolParameter> {
        self.parameters.iter().find(|p| p.name == name)
    }

    pub fn parameter_names(&self) -> impl Iterator<Item = &str> {
        self.parameters.iter().map(|p| p.name.as_str())
    }

    /// Check the structural rules a definition must satisfy before it can
    /// be registered.
    ///
    /// Tool and parameter names double as tag names, so they are limited to
    /// ASCII alphanumerics, `_` and `-`. Parameter names must be unique.
    pub fn validate(&self) -> Result<(), DomainError> {
        if !is_tag_safe(&self.name) {
            return Err(DomainError::InvalidToolName(self.name.clone()));
        }

        let mut seen = HashSet::new();
        for param in &self.parameters {
            if !is_tag_safe(&param.name) {
                return Err(DomainError::InvalidParameterName(param.name.clone()));
            }
            if !seen.insert(param.name.as_str()) {
                return Err(DomainError::DuplicateParameter {
                    tool: self.name.clone(),
                    parameter: param.name.clone(),
                });
            }
        }
        Ok(())
    }
}

fn is_tag_safe(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calculator() -> ToolDefinition {
        ToolDefinition::new("calculator", "Basic arithmetic")
            .with_parameter(ToolParameter::integer("first_operand", "Left operand"))
            .with_parameter(ToolParameter::integer("second_operand", "Right operand"))
            .with_parameter(ToolParameter::string("operator", "One of + - * /"))
    }

    #[test]
    fn test_param_type_parse_aliases() {
        assert_eq!("int".parse::<ParamType>().unwrap(), ParamType::Integer);
        assert_eq!("Integer".parse::<ParamType>().unwrap(), ParamType::Integer);
        assert_eq!("str".parse::<ParamType>().unwrap(), ParamType::String);
        assert_eq!(" string ".parse::<ParamType>().unwrap(), ParamType::String);
    }

    #[test]
    fn test_param_type_unknown_is_error() {
        let err = "float".parse::<ParamType>().unwrap_err();
        assert_eq!(err, DomainError::UnknownParamType("float".to_string()));
    }

    #[test]
    fn test_tool_definition() {
        let tool = calculator();
        assert_eq!(tool.name, "calculator");
        assert_eq!(tool.parameters.len(), 3);
        assert_eq!(
            tool.parameter_names().collect::<Vec<_>>(),
            vec!["first_operand", "second_operand", "operator"]
        );
        assert_eq!(
            tool.parameter("operator").unwrap().param_type,
            ParamType::String
        );
        assert!(tool.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_duplicate_parameter() {
        let tool = calculator().with_parameter(ToolParameter::string("operator", "again"));
        assert!(matches!(
            tool.validate(),
            Err(DomainError::DuplicateParameter { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_names_unusable_as_tags() {
        let tool = ToolDefinition::new("bad name", "spaces");
        assert_eq!(
            tool.validate(),
            Err(DomainError::InvalidToolName("bad name".to_string()))
        );

        let tool = ToolDefinition::new("ok", "x").with_parameter(ToolParameter::string("a>b", ""));
        assert_eq!(
            tool.validate(),
            Err(DomainError::InvalidParameterName("a>b".to_string()))
        );
    }

    #[test]
    fn test_parameter_serializes_type_field() {
        let json = serde_json::to_value(ToolParameter::integer("n", "count")).unwrap();
        assert_eq!(json["type"], "integer");
        assert_eq!(json["name"], "n");
    }
}
