//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for debate results
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Full transcript with timing summary
    Full,
    /// Only the final answer
    Answer,
    /// JSON output
    Json,
}

/// CLI arguments for duel
#[derive(Parser, Debug)]
#[command(name = "duel")]
#[command(author, version, about = "Adversarial debate - two LLMs argue a calculation to consensus")]
#[command(long_about = r#"
Duel runs an adversarial debate between two LLMs over a mathematical
expression. The Solver proposes and defends an answer; the Critic must
open with disagreement and only concedes when genuinely convinced. The
final answer is revealed only after explicit agreement.

Turns are paced to feel like a real conversation: each one lasts at least
a profile-defined minimum (with jitter), regardless of how fast the model
responds.

Configuration files are loaded from (in priority order):
1. --config <path>   Explicit config file
2. ./duel.toml       Project-level config
3. ~/.config/duel/config.toml   Global config

Example:
  duel "2 + 3 * 4"
  duel --pace fast --rounds 6 "sqrt(144) / 3"
  duel --output json --quiet "17 % 5"
"#)]
pub struct Cli {
    /// The expression to debate
    pub expression: Option<String>,

    /// Conversation pace (slow, medium, fast)
    #[arg(short, long, value_name = "MODE")]
    pub pace: Option<String>,

    /// Maximum debate rounds before timing out
    #[arg(short, long, value_name = "N")]
    pub rounds: Option<u32>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "full")]
    pub output: OutputFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators and the live transcript
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
