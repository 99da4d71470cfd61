use clap::{Parser, Subcommand};
use colored::Colorize;

use compare_client::Dispatcher;
use compare_core::{available_models, label_for, Config, SlotUpdate, AUTO_MODEL};

#[derive(Parser)]
#[command(name = "compare-cli")]
#[command(about = "Send one prompt to several models and compare the answers")]
#[command(version)]
struct Cli {
    /// Comparison server base URL; defaults to compare.toml / environment
    #[arg(long)]
    server_url: Option<String>,

    /// Enable debug mode
    #[arg(long, short, default_value = "false")]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the selectable models
    Models,
    /// Run one comparison
    Run {
        /// Prompt to send
        prompt: String,
        /// Model for each slot, repeatable; empty or missing slots use the
        /// auto sentinel
        #[arg(long = "model", short = 'm')]
        models: Vec<String>,
        /// Number of slots when fewer models than slots are given
        #[arg(long, default_value = "2")]
        slots: usize,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if cli.debug {
        eprintln!("{}", "[DEBUG] Debug mode enabled".dimmed());
    }

    match cli.command {
        Commands::Models => {
            list_models();
            Ok(())
        }
        Commands::Run {
            prompt,
            models,
            slots,
        } => run_comparison(cli.server_url, &prompt, models, slots, cli.debug).await,
    }
}

fn list_models() {
    for option in available_models() {
        println!("{}  {}", option.value.bold(), option.label.dimmed());
    }
}

/// Pad the selection out to `slots` entries and replace blanks with the
/// auto sentinel; the engine treats empty identifiers as a caller bug.
fn fill_slots(mut models: Vec<String>, slots: usize) -> Vec<String> {
    while models.len() < slots {
        models.push(AUTO_MODEL.to_string());
    }
    for model in &mut models {
        if model.trim().is_empty() {
            *model = AUTO_MODEL.to_string();
        }
    }
    models
}

async fn run_comparison(
    server_url: Option<String>,
    prompt: &str,
    models: Vec<String>,
    slots: usize,
    debug: bool,
) -> anyhow::Result<()> {
    let config = match server_url {
        Some(url) => Config::with_api_base(url),
        None => Config::new(),
    };
    if debug {
        eprintln!(
            "{}",
            format!("[DEBUG] Server URL: {}", config.api_base).dimmed()
        );
    }

    let models = fill_slots(models, slots);
    for (index, model) in models.iter().enumerate() {
        println!(
            "Slot {}: {}",
            index + 1,
            label_for(model).bold()
        );
    }
    println!();

    let dispatcher = Dispatcher::new(config);
    let report = dispatcher
        .dispatch(prompt, models, print_update)
        .await?;

    println!();
    println!("{}", "Model Evaluation".bold());
    for row in &report.evaluation.rows {
        let time = row
            .response_time_ms
            .map(|ms| format!("{ms}ms"))
            .unwrap_or_else(|| "N/A".to_string());
        let tokens = row
            .token_count
            .map(|count| count.to_string())
            .unwrap_or_else(|| "0".to_string());
        println!(
            "  Slot {} ({}): {} / {} tokens",
            row.slot_index + 1,
            label_for(&row.model),
            time,
            tokens
        );
    }
    match &report.evaluation.best_model {
        Some(model) => println!("Best Model: {}", label_for(model).blue().bold()),
        None => println!("Best Model: {}", "Unable to Identify".dimmed()),
    }

    Ok(())
}

fn print_update(update: SlotUpdate) {
    let model = update
        .resolved_model
        .as_deref()
        .unwrap_or(&update.requested_model);
    let header = format!("Slot {} [{}]", update.slot_index + 1, label_for(model));
    if update.is_error {
        println!("{}: {}", header.red().bold(), update.text.red());
    } else {
        println!("{}: {}", header.green().bold(), update.text);
    }
}
