//! Model value object representing a completion model

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Model identifiers understood by the completion API (Value Object)
///
/// Known identifiers map to named variants; anything else is carried
/// through unchanged as [`Model::Custom`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Model {
    Claude3Haiku,
    Claude35Haiku,
    ClaudeHaiku45,
    ClaudeSonnet4,
    ClaudeSonnet45,
    ClaudeOpus45,
    Custom(String),
}

impl Model {
    /// Get the API identifier for this model
    pub fn as_str(&self) -> &str {
        match self {
            Model::Claude3Haiku => "claude-3-haiku-20240307",
            Model::Claude35Haiku => "claude-3-5-haiku-latest",
            Model::ClaudeHaiku45 => "claude-haiku-4-5",
            Model::ClaudeSonnet4 => "claude-sonnet-4-0",
            Model::ClaudeSonnet45 => "claude-sonnet-4-5",
            Model::ClaudeOpus45 => "claude-opus-4-5",
            Model::Custom(s) => s,
        }
    }
}

impl Default for Model {
    /// Returns the default model (Claude 3 Haiku)
    fn default() -> Self {
        Model::Claude3Haiku
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Model {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "claude-3-haiku-20240307" => Model::Claude3Haiku,
            "claude-3-5-haiku-latest" => Model::Claude35Haiku,
            "claude-haiku-4-5" => Model::ClaudeHaiku45,
            "claude-sonnet-4-0" => Model::ClaudeSonnet4,
            "claude-sonnet-4-5" => Model::ClaudeSonnet45,
            "claude-opus-4-5" => Model::ClaudeOpus45,
            other => Model::Custom(other.to_string()),
        })
    }
}

impl From<&str> for Model {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(model) => model,
            Err(never) => match never {},
        }
    }
}

impl Serialize for Model {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Model {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Model::from(s.as_str()))
    }
}
