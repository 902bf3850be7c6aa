//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! Every field is optional in the file; defaults match the built-in pacing
//! profiles and protocol limits.

use crate::providers::ProviderKind;
use duel_application::DebateConfig;
use duel_domain::{Model, PaceMode, PacingProfile};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Figment(#[from] Box<figment::Error>),

    #[error("Invalid pace mode: {0}")]
    InvalidPace(String),

    #[error("Invalid provider: {0}")]
    InvalidProvider(String),

    #[error("jitter_percentage must be between 0.0 and 1.0, got {0}")]
    InvalidJitter(f64),

    #[error("max_rounds must be at least 1")]
    InvalidMaxRounds,

    #[error("[pacing.{mode}] {field} must be positive, got {value}")]
    InvalidPacingOverride {
        mode: &'static str,
        field: &'static str,
        value: f64,
    },

    #[error("No API key for {provider}: set it in the config file or the {env_var} environment variable")]
    MissingApiKey {
        provider: ProviderKind,
        env_var: &'static str,
    },
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Solver participant settings
    pub solver: FileParticipantConfig,
    /// Critic participant settings
    pub critic: FileParticipantConfig,
    /// Protocol settings
    pub debate: FileDebateConfig,
    /// Per-mode pacing overrides
    pub pacing: FilePacingConfig,
    /// Telemetry sink settings
    pub telemetry: FileTelemetryConfig,
}

impl FileConfig {
    /// Validate cross-field constraints that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.debate.jitter_percentage) {
            return Err(ConfigError::InvalidJitter(self.debate.jitter_percentage));
        }
        if self.debate.max_rounds == 0 {
            return Err(ConfigError::InvalidMaxRounds);
        }
        self.debate.pace_mode()?;
        self.pacing.validate()?;
        Ok(())
    }

    /// Build the orchestrator configuration from the file settings.
    pub fn debate_config(&self) -> Result<DebateConfig, ConfigError> {
        let mode = self.debate.pace_mode()?;
        Ok(DebateConfig::for_mode(mode)
            .with_max_rounds(self.debate.max_rounds)
            .with_profile(self.pacing.profile_for(mode))
            .with_jitter(self.debate.jitter_percentage))
    }
}

/// One debate participant: which provider, which model, which key.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileParticipantConfig {
    /// "openai" or "anthropic"; inferred from the model when omitted
    pub provider: Option<String>,
    pub model: Option<String>,
    pub api_key: Option<String>,
    pub temperature: Option<f64>,
}

impl FileParticipantConfig {
    const DEFAULT_TEMPERATURE: f64 = 0.7;

    /// The configured model, or the given fallback.
    ///
    /// Model parsing is infallible; unknown identifiers become custom models
    /// passed through to the provider verbatim.
    pub fn resolved_model(&self, fallback: Model) -> Model {
        match &self.model {
            Some(id) => match Model::from_str(id) {
                Ok(model) => model,
                Err(never) => match never {},
            },
            None => fallback,
        }
    }

    pub fn provider_kind(&self, model: &Model) -> Result<ProviderKind, ConfigError> {
        match &self.provider {
            Some(name) => name.parse().map_err(ConfigError::InvalidProvider),
            None => Ok(ProviderKind::for_model(model)),
        }
    }

    pub fn temperature(&self) -> f64 {
        self.temperature.unwrap_or(Self::DEFAULT_TEMPERATURE)
    }

    /// API key from the config file, falling back to the provider's
    /// conventional environment variable.
    pub fn resolve_api_key(&self, kind: ProviderKind) -> Result<String, ConfigError> {
        if let Some(key) = &self.api_key
            && !key.is_empty()
        {
            return Ok(key.clone());
        }
        let env_var = match kind {
            ProviderKind::OpenAi => "OPENAI_API_KEY",
            ProviderKind::Anthropic => "ANTHROPIC_API_KEY",
        };
        std::env::var(env_var).map_err(|_| ConfigError::MissingApiKey {
            provider: kind,
            env_var,
        })
    }
}

/// Protocol settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDebateConfig {
    pub max_rounds: u32,
    pub pace: String,
    pub jitter_percentage: f64,
}

impl Default for FileDebateConfig {
    fn default() -> Self {
        Self {
            max_rounds: 12,
            pace: PaceMode::default().as_str().to_string(),
            jitter_percentage: duel_domain::pacing::DEFAULT_JITTER_PERCENTAGE,
        }
    }
}

impl FileDebateConfig {
    pub fn pace_mode(&self) -> Result<PaceMode, ConfigError> {
        self.pace
            .parse()
            .map_err(|_| ConfigError::InvalidPace(self.pace.clone()))
    }
}

/// Per-mode pacing overrides, applied on top of the built-in profiles.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePacingConfig {
    pub slow: FilePacingOverrides,
    pub medium: FilePacingOverrides,
    pub fast: FilePacingOverrides,
}

impl FilePacingConfig {
    pub fn profile_for(&self, mode: PaceMode) -> PacingProfile {
        let overrides = match mode {
            PaceMode::Slow => &self.slow,
            PaceMode::Medium => &self.medium,
            PaceMode::Fast => &self.fast,
        };
        overrides.apply_to(PacingProfile::for_mode(mode))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.slow.validate("slow")?;
        self.medium.validate("medium")?;
        self.fast.validate("fast")?;
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePacingOverrides {
    pub min_turn_seconds: Option<f64>,
    pub inter_turn_gap_seconds: Option<f64>,
    pub typeout_rate_chars_per_sec: Option<f64>,
    pub max_tokens_per_turn: Option<u32>,
}

impl FilePacingOverrides {
    fn apply_to(&self, mut profile: PacingProfile) -> PacingProfile {
        if let Some(v) = self.min_turn_seconds {
            profile.min_turn_seconds = v;
        }
        if let Some(v) = self.inter_turn_gap_seconds {
            profile.inter_turn_gap_seconds = v;
        }
        if let Some(v) = self.typeout_rate_chars_per_sec {
            profile.typeout_rate_chars_per_sec = v;
        }
        if let Some(v) = self.max_tokens_per_turn {
            profile.max_tokens_per_turn = v;
        }
        profile
    }

    fn validate(&self, mode: &'static str) -> Result<(), ConfigError> {
        let positive = [
            ("min_turn_seconds", self.min_turn_seconds),
            ("inter_turn_gap_seconds", self.inter_turn_gap_seconds),
            ("typeout_rate_chars_per_sec", self.typeout_rate_chars_per_sec),
        ];
        for (field, value) in positive {
            if let Some(v) = value
                && v <= 0.0
            {
                return Err(ConfigError::InvalidPacingOverride {
                    mode,
                    field,
                    value: v,
                });
            }
        }
        if self.max_tokens_per_turn == Some(0) {
            return Err(ConfigError::InvalidPacingOverride {
                mode,
                field: "max_tokens_per_turn",
                value: 0.0,
            });
        }
        Ok(())
    }
}

/// Telemetry sink settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileTelemetryConfig {
    pub enabled: bool,
    pub path: String,
}

impl Default for FileTelemetryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: "debate_telemetry.jsonl".to_string(),
        }
    }
}
