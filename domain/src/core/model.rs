//! Model value object representing an LLM model

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Available LLM models (Value Object)
///
/// A domain concept naming the backends a debate participant may run on.
/// The Solver and Critic are each bound to one model at configuration time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Model {
    // GPT models
    Gpt4Turbo,
    Gpt4o,
    Gpt4oMini,
    // Claude models
    ClaudeSonnet35,
    ClaudeSonnet37,
    ClaudeHaiku35,
    // Custom
    Custom(String),
}

impl Model {
    /// Get the string identifier for this model
    pub fn as_str(&self) -> &str {
        match self {
            Model::Gpt4Turbo => "gpt-4-turbo-preview",
            Model::Gpt4o => "gpt-4o",
            Model::Gpt4oMini => "gpt-4o-mini",
            Model::ClaudeSonnet35 => "claude-3-5-sonnet-20241022",
            Model::ClaudeSonnet37 => "claude-3-7-sonnet-20250219",
            Model::ClaudeHaiku35 => "claude-3-5-haiku-20241022",
            Model::Custom(s) => s,
        }
    }

    /// Default Solver model
    pub fn default_solver() -> Model {
        Model::Gpt4Turbo
    }

    /// Default Critic model
    pub fn default_critic() -> Model {
        Model::ClaudeSonnet35
    }

    /// Check if this is a GPT model
    pub fn is_gpt(&self) -> bool {
        matches!(self, Model::Gpt4Turbo | Model::Gpt4o | Model::Gpt4oMini)
    }

    /// Check if this is a Claude model
    pub fn is_claude(&self) -> bool {
        matches!(
            self,
            Model::ClaudeSonnet35 | Model::ClaudeSonnet37 | Model::ClaudeHaiku35
        )
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
            "gpt-4-turbo-preview" => Model::Gpt4Turbo,
            "gpt-4o" => Model::Gpt4o,
            "gpt-4o-mini" => Model::Gpt4oMini,
            "claude-3-5-sonnet-20241022" => Model::ClaudeSonnet35,
            "claude-3-7-sonnet-20250219" => Model::ClaudeSonnet37,
            "claude-3-5-haiku-20241022" => Model::ClaudeHaiku35,
            other => Model::Custom(other.to_string()),
        })
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
        // Parsing is infallible; unknown identifiers become Custom
        Ok(match s.parse() {
            Ok(model) => model,
            Err(never) => match never {},
        })
    }
}
