use clap::{Parser, Subcommand};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

mod application;
mod domain;
mod infrastructure;

use application::commands::{register_builtins, CommandRegistry};
use application::messaging::Dispatcher;
use infrastructure::adapters::console::ConsoleTransport;
use infrastructure::config::{self, Config};
use infrastructure::watermark::WatermarkStore;

#[derive(Parser)]
#[command(name = "herald-bot")]
#[command(about = "A direct-message command bot", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.txt")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the bot
    Run,
    /// Show version
    Version,
    /// Generate default config
    InitConfig,
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run => {
            run_bot(cli.config);
        }
        Commands::Version => {
            println!("herald-bot v{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::InitConfig => {
            init_config(&cli.config);
        }
    }
}

fn run_bot(config_path: String) {
    let config = match Config::load(&config_path) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load config from {}: {}", config_path, e);
            std::process::exit(1);
        }
    };

    tracing::info!("Starting {}", config.bot_name);
    if !config.credentials.is_complete() {
        tracing::warn!("Platform credentials are incomplete; only the console transport will work");
    }
    tracing::info!("Authorized users: {}", config.authorized_users.join(","));

    let stop = Arc::new(AtomicBool::new(false));
    let mut registry = CommandRegistry::new();
    register_builtins(&mut registry, Arc::clone(&stop));

    let store = WatermarkStore::new(&config.watermark_file);
    let transport = ConsoleTransport::new(&config.bot_name);

    let rt = tokio::runtime::Runtime::new().unwrap();
    rt.block_on(async {
        match Dispatcher::new(
            transport,
            registry,
            store,
            config.authorized_users.clone(),
            config.poll_interval,
            stop,
        ) {
            Ok(mut dispatcher) => {
                if let Err(e) = dispatcher.run().await {
                    tracing::error!("Dispatcher exited with an error: {}", e);
                }
            }
            Err(e) => {
                tracing::error!("Failed to start dispatcher: {}", e);
            }
        }
    });
}

fn init_config(path: &str) {
    if std::path::Path::new(path).exists() {
        tracing::warn!("Config file {} already exists, not overwriting", path);
        return;
    }
    match std::fs::write(path, config::TEMPLATE) {
        Ok(()) => tracing::info!("Wrote default config to {}", path),
        Err(e) => tracing::error!("Failed to write config: {}", e),
    }
}
