//! Parameter coercion: raw tag text to typed values.
//!
//! Policy per declared parameter:
//!
//! | Declared | Tag present | Tag absent |
//! |----------|-------------|------------|
//! | integer  | parsed (error if not numeric) | `0` |
//! | string   | verbatim first match | `""` |

use crate::tool::entities::{ParamType, ToolParameter};
use crate::tool::value_objects::{InvocationRequest, ParamValue, ToolArguments};
use thiserror::Error;

/// A parameter was present but could not be converted to its declared type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoercionError {
    #[error("Parameter '{parameter}' expects an integer, got '{value}'")]
    InvalidInteger { parameter: String, value: String },
}

/// Coerce the declared parameters out of `raw_text`.
///
/// The result contains every declared parameter, in declaration order,
/// whatever order (if any) the tags appear in. Tags that do not name a
/// declared parameter are never read.
pub fn coerce_parameters(
    parameters: &[ToolParameter],
    raw_text: &str,
) -> Result<ToolArguments, CoercionError> {
    coerce_invocation(parameters, &InvocationRequest::new("", raw_text))
}

/// Coerce the declared parameters from an invocation's raw values.
pub fn coerce_invocation(
    parameters: &[ToolParameter],
    invocation: &InvocationRequest,
) -> Result<ToolArguments, CoercionError> {
    let mut raw = invocation.raw_params(parameters.iter().map(|p| p.name.as_str()));
    let mut arguments = ToolArguments::new();
    for param in parameters {
        let value = coerce_value(param, raw.remove(&param.name))?;
        arguments.insert(param.name.clone(), value);
    }
    Ok(arguments)
}

/// Coerce a single optional raw value for `param`.
pub fn coerce_value(
    param: &ToolParameter,
    raw: Option<String>,
) -> Result<ParamValue, CoercionError> {
    match (param.param_type, raw) {
        (ParamType::Integer, None) => Ok(ParamValue::Integer(0)),
        (ParamType::Integer, Some(text)) => text
            .trim()
            .parse::<i64>()
            .map(ParamValue::Integer)
            .map_err(|_| CoercionError::InvalidInteger {
                parameter: param.name.clone(),
                value: text,
            }),
        (ParamType::String, raw) => Ok(ParamValue::String(raw.unwrap_or_default())),
    }
}
