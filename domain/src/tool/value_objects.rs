//! Tool domain value objects: invocation inputs and outputs
//!
//! These types carry one tool call through a cycle:
//! [`InvocationRequest`] (raw text from the model) → [`ToolArguments`]
//! (coerced values) → [`ToolResult`] (handler output, ready for injection).

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashMap;

/// A coerced parameter value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Integer(i64),
    String(String),
}

impl ParamValue {
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ParamValue::Integer(n) => Some(*n),
            ParamValue::String(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::String(s) => Some(s),
            ParamValue::Integer(_) => None,
        }
    }
}

impl std::fmt::Display for ParamValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamValue::Integer(n) => write!(f, "{}", n),
            ParamValue::String(s) => write!(f, "{}", s),
        }
    }
}

/// Fully populated arguments for one tool call.
///
/// Holds exactly one entry per declared parameter, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolArguments {
    values: Vec<(String, ParamValue)>,
}

impl ToolArguments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: ParamValue) -> Self {
        self.insert(name, value);
        self
    }

    /// Insert or replace a value, keeping the position of an existing key.
    pub fn insert(&mut self, name: impl Into<String>, value: ParamValue) {
        let name = name.into();
        match self.values.iter_mut().find(|(k, _)| *k == name) {
            Some(slot) => slot.1 = value,
            None => self.values.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    pub fn get_i64(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(ParamValue::as_i64)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(ParamValue::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Serialize for ToolArguments {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (name, value) in &self.values {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// The model's request to run a tool, as extracted from one completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationRequest {
    /// Tool name from the `<tool_name>` tag; empty when the tag is absent
    pub tool_name: String,
    /// Text of the `<invoke>` region the parameters are read from
    pub body: String,
}

impl InvocationRequest {
    pub fn new(tool_name: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            body: body.into(),
        }
    }

    /// Raw (uncoerced) value of every named tag present in the body, first
    /// match wins.
    ///
    /// Only the names passed in are looked up; other tags are ignored.
    pub fn raw_params<'a>(
        &self,
        names: impl IntoIterator<Item = &'a str>,
    ) -> HashMap<String, String> {
        names
            .into_iter()
            .filter_map(|name| {
                crate::protocol::tags::first_between_tags(name, &self.body, false)
                    .map(|value| (name.to_string(), value))
            })
            .collect()
    }
}

/// Output of one tool execution, ready to be injected back into the
/// conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolResult {
    pub tool_name: String,
    pub result: String,
}

impl ToolResult {
    pub fn new(tool_name: impl Into<String>, result: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            result: result.into(),
        }
    }
}
