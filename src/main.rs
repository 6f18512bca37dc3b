use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use families_bot::application::errors::BotError;
use families_bot::application::messaging::MessageDispatcher;
use families_bot::domain::traits::Bot;
use families_bot::infrastructure::adapters::{ConsoleAdapter, TelegramAdapter};
use families_bot::infrastructure::config::{AdapterKind, Config};
use families_bot::infrastructure::storage::MemoryRosterStore;

#[derive(Parser)]
#[command(name = "families-bot")]
#[command(about = "Find people to share a subscription family with", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.yaml")]
    config: String,

    /// Bot token (overrides config)
    #[arg(short, long)]
    token: Option<String>,
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
    let cli = Cli::parse();

    match cli.command {
        Commands::Run => {
            if let Err(e) = run_bot(&cli.config, cli.token) {
                tracing::error!("Bot stopped: {}", e);
                std::process::exit(1);
            }
        }
        Commands::Version => {
            println!("families-bot v{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::InitConfig => {
            if let Err(e) = init_config() {
                eprintln!("{}", e);
                std::process::exit(1);
            }
        }
    }
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(filter)
        .init();
}

fn load_config(config_path: &str) -> (Config, Option<String>) {
    if !std::path::Path::new(config_path).exists() {
        return (Config::load_env(), None);
    }
    match Config::load(config_path) {
        Ok(mut config) => {
            config.apply_env();
            (config, None)
        }
        Err(e) => (Config::load_env(), Some(format!("Failed to load config: {}, using defaults", e))),
    }
}

fn run_bot(config_path: &str, token_override: Option<String>) -> Result<(), BotError> {
    let (mut config, load_warning) = load_config(config_path);
    if let Some(token) = token_override {
        config.set_token(token);
    }

    init_logging(&config.logging.level);
    if let Some(warning) = load_warning {
        tracing::warn!("{}", warning);
    }
    config.validate()?;

    tracing::info!("Starting {}", config.bot.name);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| BotError::Internal(format!("Failed to start runtime: {}", e)))?;

    match config.adapter()? {
        AdapterKind::Telegram(token) => rt.block_on(run_telegram_bot(token, &config)),
        AdapterKind::Console => rt.block_on(run_console_bot(&config)),
    }
}

async fn run_telegram_bot(token: String, config: &Config) -> Result<(), BotError> {
    let (poll_timeout, backoff) = config.adapters.telegram
        .as_ref()
        .map(|t| (t.poll_timeout_seconds, t.error_backoff_seconds))
        .unwrap_or((30, 5));

    let mut bot = TelegramAdapter::new(token);
    bot.fetch_bot_info().await?;
    bot.start().await?;

    let bot = Arc::new(bot);
    let dispatcher = MessageDispatcher::new(&config.bot.prefix, MemoryRosterStore::new(), Arc::clone(&bot));

    if let Err(e) = bot.register_commands(&dispatcher.commands().menu()).await {
        tracing::warn!("Failed to register commands: {}", e);
    }

    tracing::info!("Bot started: @{}", bot.bot_info().username);

    let mut offset: i64 = 0;

    tracing::info!("Starting message loop...");

    loop {
        let updates = tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutting down");
                return Ok(());
            }
            updates = bot.get_updates(offset, poll_timeout) => updates,
        };

        match updates {
            Ok(updates) => {
                if !updates.is_empty() {
                    tracing::debug!("Received {} updates", updates.len());
                }
                for update in &updates {
                    let Some((chat_id, sender, text)) = update.inbound_text() else {
                        continue;
                    };
                    if let Err(e) = dispatcher.process_text(chat_id, text, sender).await {
                        tracing::error!("[{}] Failed to process message: {}", chat_id, e);
                    }
                }
                offset = TelegramAdapter::get_next_offset(&updates, offset);
            }
            Err(e) => {
                tracing::error!("Failed to get updates: {}", e);
                tokio::time::sleep(tokio::time::Duration::from_secs(backoff)).await;
            }
        }
    }
}

async fn run_console_bot(config: &Config) -> Result<(), BotError> {
    let bot = Arc::new(ConsoleAdapter::new());
    bot.start().await?;

    let dispatcher = MessageDispatcher::new(&config.bot.prefix, MemoryRosterStore::new(), Arc::clone(&bot));

    tracing::info!("Bot started: @{}", bot.bot_info().username);
    println!("Type \"<name>: <message>\" to speak as <name>, e.g. \"alice: Join Netflix\"");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await
        .map_err(|e| BotError::Internal(format!("Failed to read stdin: {}", e)))?
    {
        let Some((chat_id, sender, text)) = bot.parse_line(&line)? else {
            continue;
        };
        if let Err(e) = dispatcher.process_text(chat_id, &text, Some(sender)).await {
            tracing::error!("[{}] Failed to process message: {}", chat_id, e);
        }
    }

    Ok(())
}

fn init_config() -> Result<(), BotError> {
    let yaml = Config::default().to_yaml()?;
    println!("{}", yaml);
    println!("\nSave this to config.yaml and adjust as needed.");
    Ok(())
}
