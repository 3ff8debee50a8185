use clap::Parser;
use renovation_quote::app::{collaborators, replay, report::EstimateReport};
use renovation_quote::config::{Command, OutputFormat};
use renovation_quote::domain::ports::ConfigProvider;
use renovation_quote::utils::error::{ErrorSeverity, QuoteError};
use renovation_quote::utils::logger;
use renovation_quote::{CliConfig, FormState, PricingEngine, QuoteConfig, QuoteSession};
use std::path::Path;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::debug!("CLI arguments: {:?}", cli);

    let config = match cli.load_quote_config() {
        Ok(config) => config,
        Err(e) => exit_with(e),
    };

    let outcome = match cli.command {
        Command::Estimate { form, format, .. } => estimate(&config, &form, format),
        Command::Replay {
            script, submit_dir, ..
        } => run_replay(&config, &script, submit_dir.as_deref()).await,
    };

    if let Err(e) = outcome {
        exit_with(e);
    }
    Ok(())
}

fn estimate(
    config: &QuoteConfig,
    form_path: &Path,
    format: OutputFormat,
) -> renovation_quote::Result<()> {
    let content = std::fs::read_to_string(form_path)?;
    let state: FormState = serde_json::from_str(&content)?;
    let engine = PricingEngine::new(config.pricing.clone());

    let report = EstimateReport::build(&engine, &state);
    tracing::info!("Estimated {}: {}", form_path.display(), report.price_label);

    let output = match format {
        OutputFormat::Text => report.to_text(),
        OutputFormat::Json => report.to_json()?,
        OutputFormat::Csv => report.to_csv()?,
    };
    print!("{}", output);
    Ok(())
}

async fn run_replay(
    config: &QuoteConfig,
    script_path: &Path,
    submit_dir: Option<&Path>,
) -> renovation_quote::Result<()> {
    let commands = replay::load_script(script_path)?;
    tracing::info!("Replaying {} commands from {}", commands.len(), script_path.display());

    let mut session = QuoteSession::new(PricingEngine::new(config.pricing.clone()));
    for step in replay::replay(&mut session, commands) {
        let position = step.position.to_string();
        let price = step.price_label.as_deref().unwrap_or("-");
        match &step.blocked {
            Some(reason) => {
                println!("{:>3}  {:<14} {:<16} blocked: {}", step.index, position, price, reason)
            }
            None => println!("{:>3}  {:<14} {}", step.index, position, price),
        }
    }

    if let Some(lookup) = collaborators::distance_lookup(config) {
        if let Some(distance) = replay::annotate_distance(&mut session, lookup.as_ref()).await {
            let kind = if distance.is_estimate { "estimated" } else { "geocoded" };
            println!(
                "Distance: {} km ({}){}",
                distance.distance_km,
                kind,
                if distance.outside_service_area { ", outside service area" } else { "" }
            );
        }
    }

    if let Some(sink) = collaborators::lead_sink(config, submit_dir) {
        let receipt =
            replay::submit_if_complete(&mut session, sink.as_ref(), config.lead_source()).await?;
        match receipt {
            Some(receipt) => println!("Lead submitted: {}", receipt),
            None => println!("Lead not submitted: replay did not reach the submit step"),
        }
    }
    Ok(())
}

fn exit_with(e: QuoteError) -> ! {
    tracing::error!(
        "{} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("{}", e.user_friendly_message());
    eprintln!("Suggestion: {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
