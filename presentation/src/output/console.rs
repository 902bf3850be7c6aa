//! Console output formatter for debate results

use colored::Colorize;
use duel_domain::{DebateResult, DebateStatus, Speaker};

/// Formats debate results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete debate result: transcript, outcome, timing.
    pub fn format(result: &DebateResult) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Adversarial Debate Results"));
        output.push('\n');

        output.push_str(&format!(
            "{} {}\n",
            "Expression:".cyan().bold(),
            result.expression
        ));
        output.push_str(&format!(
            "{} {} ({} rounds, pace: {})\n\n",
            "Status:".cyan().bold(),
            Self::status_label(result.status),
            result.rounds,
            result.pace_mode
        ));

        output.push_str(&Self::section_header("Transcript"));
        for turn in &result.turns {
            let label = match turn.speaker {
                Speaker::Solver => format!("── {} ──", turn.speaker).yellow().bold(),
                Speaker::Critic => format!("── {} ──", turn.speaker).magenta().bold(),
            };
            output.push_str(&format!("\n{label}\n{}\n", turn.content));
            if let Some(timing) = &turn.timing {
                output.push_str(
                    &format!(
                        "  [model {:.2}s + padding {:.2}s = {:.2}s]",
                        timing.model_latency.as_secs_f64(),
                        timing.padding_time.as_secs_f64(),
                        timing.total_time.as_secs_f64()
                    )
                    .dimmed()
                    .to_string(),
                );
                output.push('\n');
            }
        }

        output.push_str(&Self::section_header("Outcome"));
        match &result.final_answer {
            Some(answer) => {
                output.push_str(&format!("\n{} {}\n", "Final answer:".green().bold(), answer));
                if result.short_circuited {
                    output.push_str(
                        &"(Solver revealed the answer before the Critic agreed)\n"
                            .yellow()
                            .to_string(),
                    );
                }
            }
            None => {
                output.push_str(&format!("\n{}\n", "No final answer.".red().bold()));
            }
        }
        if let Some(message) = &result.error_message {
            output.push_str(&format!("{} {}\n", "Detail:".red().bold(), message));
        }

        let summary = &result.timing_summary;
        if summary.total_turns > 0 {
            output.push_str(&Self::section_header("Timing"));
            output.push_str(&format!(
                "\n  Turns: {}  Total: {:.2}s\n",
                summary.total_turns,
                result.total_time.as_secs_f64()
            ));
            output.push_str(&format!(
                "  Model time: {:.2}s  Padding: {:.2}s ({:.1}%)\n",
                summary.total_model_time.as_secs_f64(),
                summary.total_padding_time.as_secs_f64(),
                summary.padding_percentage
            ));
            output.push_str(&format!(
                "  Avg model latency: {:.2}s  Avg padding: {:.2}s\n",
                summary.avg_model_latency.as_secs_f64(),
                summary.avg_padding_time.as_secs_f64()
            ));
        }

        output.push_str(&Self::footer());

        output
    }

    /// Format as JSON
    pub fn format_json(result: &DebateResult) -> String {
        serde_json::to_string_pretty(result).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format the final answer only (concise output)
    pub fn format_answer_only(result: &DebateResult) -> String {
        match &result.final_answer {
            Some(answer) => answer.clone(),
            None => format!(
                "{}: {}",
                result.status,
                result
                    .error_message
                    .as_deref()
                    .unwrap_or("no answer produced")
            ),
        }
    }

    fn status_label(status: DebateStatus) -> String {
        let label = status.to_string();
        match status {
            DebateStatus::Completed => label.green().bold().to_string(),
            DebateStatus::Timeout | DebateStatus::Cancelled => label.yellow().bold().to_string(),
            DebateStatus::Error => label.red().bold().to_string(),
            DebateStatus::NotStarted | DebateStatus::InProgress => label.cyan().to_string(),
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}
