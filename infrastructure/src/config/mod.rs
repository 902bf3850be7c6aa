//! Configuration loading and raw TOML data types

mod file_config;
mod loader;

pub use file_config::{
    ConfigError, FileConfig, FileDebateConfig, FilePacingConfig, FilePacingOverrides,
    FileParticipantConfig, FileTelemetryConfig,
};
pub use loader::ConfigLoader;
