mod affiliate;
mod commands;
mod gateway;
mod replies;

use clap::{Parser, Subcommand};
use dealbot_channels::telegram::TelegramChannel;
use dealbot_core::{
    config::{self, shellexpand, Config},
    traits::Channel,
};
use dealbot_store::Tracker;
use std::collections::HashMap;
use std::sync::Arc;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(
    name = "dealbot",
    version,
    about = "Telegram bot for affiliate shopping links and tracked products"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file.
    #[arg(short, long, default_value = "config.toml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the bot.
    Start,
    /// Show configuration and check that the store is reachable.
    Status,
    /// Print affiliate links for a product without starting the bot.
    Links {
        /// Product to search for.
        #[arg(trailing_var_arg = true)]
        query: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // A missing .env is fine; real deployments set the environment directly.
    dotenvy::dotenv().ok();

    let mut cfg = config::load(&cli.config)?;
    cfg.apply_env()?;

    let _log_guard = init_tracing(&cfg.bot.log_dir);

    match cli.command {
        Commands::Start => {
            cfg.validate()?;

            let tracker = Tracker::from_config(&cfg.store)?;

            let mut channels: HashMap<String, Arc<dyn Channel>> = HashMap::new();
            let telegram = TelegramChannel::new(&cfg.telegram).with_menu(commands::menu());
            channels.insert("telegram".to_string(), Arc::new(telegram));

            println!("dealbot — starting {}...", cfg.bot.name);
            let gw = Arc::new(gateway::Gateway::new(
                channels,
                tracker,
                cfg.affiliate.clone(),
            ));
            gw.run().await?;
        }
        Commands::Status => print_status(&cli.config, &cfg).await,
        Commands::Links { query } => {
            let query = query.join(" ");
            if query.trim().is_empty() {
                anyhow::bail!("no product provided. Usage: dealbot links <product>");
            }
            let links = affiliate::generate_affiliate_links(query.trim(), &cfg.affiliate);
            println!("{links}");
        }
    }

    Ok(())
}

/// Install the stderr subscriber, plus a daily rolling file when `log_dir` is set.
/// The returned guard must live until exit so buffered lines are flushed.
fn init_tracing(log_dir: &str) -> Option<WorkerGuard> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let (file_layer, guard) = if log_dir.is_empty() {
        (None, None)
    } else {
        let appender = tracing_appender::rolling::daily(shellexpand(log_dir), "dealbot.log");
        let (writer, guard) = tracing_appender::non_blocking(appender);
        let layer = fmt::layer().with_writer(writer).with_ansi(false);
        (Some(layer), Some(guard))
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer())
        .with(file_layer)
        .init();

    guard
}

async fn print_status(config_path: &str, cfg: &Config) {
    println!("dealbot — Status Check\n");
    println!("Config: {config_path}");
    println!(
        "  telegram: {}",
        if cfg.telegram.bot_token.is_empty() {
            "missing bot_token"
        } else {
            "configured"
        }
    );
    println!("  amazon tag: {}", cfg.affiliate.amazon_tag);
    println!(
        "  aliexpress id: {}",
        if cfg.affiliate.aliexpress_id.is_empty() {
            "(missing)"
        } else {
            cfg.affiliate.aliexpress_id.as_str()
        }
    );
    println!("  store: {}", cfg.store.backend.display_name());
    println!();

    if let Err(e) = cfg.validate() {
        println!("  config: {e}");
        return;
    }

    match Tracker::from_config(&cfg.store) {
        Ok(tracker) => match tracker.health_check().await {
            Ok(()) => println!("  store check: reachable"),
            Err(e) => println!("  store check: {e}"),
        },
        Err(e) => println!("  store check: {e}"),
    }
}
