mod config;
mod generate;
mod profile;
mod prompt;
mod ui;
mod web;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::{ApiKey, AppConfig};
use generate::{GeminiClient, PlanGenerator};

#[derive(Parser)]
#[command(author, version, about = "Healthy Meal Planner: nutrient-rich meal plans from a generative model")]
struct Cli {
    /// TOML file with [generation] and [server] settings
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Gemini API key
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true, global = true)]
    api_key: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the meal planner form over HTTP (default)
    Serve {
        /// Address to listen on, overrides the config file
        #[arg(long)]
        bind: Option<SocketAddr>,
    },
    /// Fill in the form in the terminal
    Plan {
        /// Print the prompt instead of calling the generation service
        #[arg(long, default_value_t = false)]
        dry_run: bool,
    },
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "meal_planner=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn build_generator(config: &AppConfig, api_key: Option<String>) -> Result<Arc<dyn PlanGenerator>> {
    let api_key = ApiKey::new(api_key.unwrap_or_default())?;
    let client = GeminiClient::new(config.generation.clone(), api_key)
        .context("failed to build generation client")?;
    info!(
        "Using model {} (temperature {}, top_p {}, top_k {}, max_output_tokens {})",
        config.generation.model,
        config.generation.temperature,
        config.generation.top_p,
        config.generation.top_k,
        config.generation.max_output_tokens
    );
    Ok(Arc::new(client))
}

async fn run_terminal(config: &AppConfig, api_key: Option<String>, dry_run: bool) -> Result<()> {
    let generator = if dry_run {
        None
    } else {
        Some(build_generator(config, api_key)?)
    };

    ui::display_welcome();

    loop {
        let profile = ui::read_profile()?;

        match &generator {
            None => ui::display_prompt(&prompt::build_prompt(&profile)),
            Some(generator) => {
                let spinner = ui::generation_spinner();
                let plan = generate::dispatch(generator.as_ref(), &profile).await;
                spinner.finish_and_clear();
                ui::display_plan(&plan);
            }
        }

        if !ui::ask_generate_again()? {
            println!("\nGoodbye! Eat smart, live well!");
            break;
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref())?;

    match cli.command.unwrap_or(Command::Serve { bind: None }) {
        Command::Serve { bind } => {
            let generator = build_generator(&config, cli.api_key)?;
            let addr = bind.unwrap_or(config.server.bind);
            web::serve(addr, web::AppState::new(generator)).await
        }
        Command::Plan { dry_run } => run_terminal(&config, cli.api_key, dry_run).await,
    }
}
