//! CLI entrypoint for duel
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Result, bail};
use clap::Parser;
use duel_application::{NoTelemetry, RunDebateInput, RunDebateUseCase, TelemetrySink};
use duel_domain::{DebateStatus, Model};
use duel_infrastructure::{ConfigLoader, FileConfig, JsonlTelemetrySink, StaticPromptProvider, build_client};
use duel_presentation::{Cli, ConsoleFormatter, DebateReporter, OutputFormat, typeout};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    let expression = match &cli.expression {
        Some(e) if !e.trim().is_empty() => e.clone(),
        _ => bail!("An expression is required. Try: duel \"2 + 3 * 4\""),
    };

    // Load config, then let CLI flags override it
    let mut config: FileConfig = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())?
    };
    if let Some(pace) = &cli.pace {
        config.debate.pace = pace.clone();
    }
    if let Some(rounds) = cli.rounds {
        config.debate.max_rounds = rounds;
    }
    config.validate()?;
    let debate_config = config.debate_config()?;

    info!("Starting debate: {}", expression);

    // === Dependency Injection ===
    let solver_model = config.solver.resolved_model(Model::default_solver());
    let solver_kind = config.solver.provider_kind(&solver_model)?;
    let solver_name = solver_model.to_string();
    let solver = build_client(
        solver_kind,
        solver_model,
        config.solver.resolve_api_key(solver_kind)?,
        config.solver.temperature(),
    );

    let critic_model = config.critic.resolved_model(Model::default_critic());
    let critic_kind = config.critic.provider_kind(&critic_model)?;
    let critic_name = critic_model.to_string();
    let critic = build_client(
        critic_kind,
        critic_model,
        config.critic.resolve_api_key(critic_kind)?,
        config.critic.temperature(),
    );

    let telemetry: Arc<dyn TelemetrySink> = if config.telemetry.enabled {
        match JsonlTelemetrySink::new(&config.telemetry.path) {
            Some(sink) => Arc::new(sink),
            None => {
                warn!("Telemetry disabled: could not open {}", config.telemetry.path);
                Arc::new(NoTelemetry)
            }
        }
    } else {
        Arc::new(NoTelemetry)
    };

    let use_case = RunDebateUseCase::new(solver, critic, Arc::new(StaticPromptProvider::new()))
        .with_telemetry(telemetry);

    // Ctrl-C cancels at the next suspension point
    let cancellation = CancellationToken::new();
    {
        let cancellation = cancellation.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                eprintln!("\nCancelling debate...");
                cancellation.cancel();
            }
        });
    }

    if !cli.quiet {
        println!();
        println!("Expression: {expression}");
        println!(
            "Solver: {solver_name}  Critic: {critic_name}  Pace: {}",
            debate_config.pace_mode
        );
        println!();
    }

    let input = RunDebateInput::new(expression.as_str(), debate_config);
    let result = if cli.quiet {
        use_case
            .execute_with_progress(input, &duel_application::NoProgress, Some(cancellation))
            .await
    } else {
        let progress = DebateReporter::new().with_timing(cli.verbose > 0);
        use_case
            .execute_with_progress(input, &progress, Some(cancellation))
            .await
    };

    // Output results
    let typeout_rate = debate_config.profile.typeout_rate_chars_per_sec;
    match cli.output {
        OutputFormat::Json => println!("{}", ConsoleFormatter::format_json(&result)),
        OutputFormat::Answer => match (&result.final_answer, cli.quiet) {
            (Some(answer), false) => {
                print!("Final answer: ");
                typeout(answer, typeout_rate).await;
            }
            _ => println!("{}", ConsoleFormatter::format_answer_only(&result)),
        },
        OutputFormat::Full => {
            if !cli.quiet
                && let Some(answer) = &result.final_answer
            {
                print!("\nFinal answer: ");
                typeout(answer, typeout_rate).await;
            }
            println!("{}", ConsoleFormatter::format(&result));
        }
    }

    if result.status != DebateStatus::Completed {
        std::process::exit(1);
    }
    Ok(())
}
