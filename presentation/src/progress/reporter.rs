//! Progress reporting for debate execution

use colored::Colorize;
use duel_application::ProgressNotifier;
use duel_domain::{Speaker, Turn};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

/// Animates the debate in the terminal: a spinner while a participant is
/// "thinking", replaced by the finished turn when it lands.
pub struct DebateReporter {
    spinner: Mutex<Option<ProgressBar>>,
    show_timing: bool,
}

impl DebateReporter {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
            show_timing: false,
        }
    }

    /// Also print per-turn timing lines under each turn.
    pub fn with_timing(mut self, show_timing: bool) -> Self {
        self.show_timing = show_timing;
        self
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn set_message(&self, message: String) {
        let mut guard = match self.spinner.lock() {
            Ok(g) => g,
            Err(_) => return,
        };
        match guard.as_ref() {
            Some(pb) => pb.set_message(message),
            None => {
                let pb = ProgressBar::new_spinner();
                pb.set_style(Self::spinner_style());
                pb.enable_steady_tick(Duration::from_millis(100));
                pb.set_message(message);
                *guard = Some(pb);
            }
        }
    }

    fn clear(&self) {
        if let Ok(mut guard) = self.spinner.lock()
            && let Some(pb) = guard.take()
        {
            pb.finish_and_clear();
        }
    }

    fn speaker_label(speaker: Speaker) -> String {
        match speaker {
            Speaker::Solver => format!("── {speaker} ──").yellow().bold().to_string(),
            Speaker::Critic => format!("── {speaker} ──").magenta().bold().to_string(),
        }
    }
}

impl Default for DebateReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for DebateReporter {
    fn on_thinking(&self, speaker: Speaker) {
        self.set_message(format!("{speaker} is thinking..."));
    }

    fn on_finalizing(&self, speaker: Speaker) {
        self.set_message(format!("{speaker} is composing a reply..."));
    }

    fn on_transitioning(&self) {
        self.set_message("...".to_string());
    }

    fn on_turn_complete(&self, turn: &Turn) {
        self.clear();
        println!("\n{}", Self::speaker_label(turn.speaker));
        println!("{}", turn.content);
        if self.show_timing
            && let Some(timing) = &turn.timing
        {
            println!(
                "{}",
                format!(
                    "  [model {:.2}s + padding {:.2}s = {:.2}s]",
                    timing.model_latency.as_secs_f64(),
                    timing.padding_time.as_secs_f64(),
                    timing.total_time.as_secs_f64()
                )
                .dimmed()
            );
        }
    }
}

/// Simple text-based progress (no spinner, for dumb terminals and logs)
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_thinking(&self, speaker: Speaker) {
        println!("{} {speaker} is thinking...", "->".cyan());
    }

    fn on_turn_complete(&self, turn: &Turn) {
        println!("\n{}", DebateReporter::speaker_label(turn.speaker));
        println!("{}", turn.content);
    }
}
