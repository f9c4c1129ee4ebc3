use clap::{Parser, Subcommand};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use majed_bot::application::errors::{BotError, ConfigError};
use majed_bot::application::messaging::MessageParser;
use majed_bot::application::services::CommandService;
use majed_bot::domain::entities::ChatTarget;
use majed_bot::domain::traits::{AdminAuthorizer, Bot, SystemClock};
use majed_bot::infrastructure::adapters::telegram::TelegramAdapter;
use majed_bot::infrastructure::config::{self, Settings};
use majed_bot::infrastructure::tasks::InFlight;

/// Long-polling timeout for getUpdates
const POLL_TIMEOUT_SECS: i64 = 30;
/// Pause after a failed poll
const POLL_BACKOFF: Duration = Duration::from_secs(5);
/// Added to the dispatch timeout so a handler can still post its reply
const SHUTDOWN_SLACK: Duration = Duration::from_secs(5);

#[derive(Parser)]
#[command(name = "majed-bot")]
#[command(about = "Posts branded trade alerts to a premium Telegram channel", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.json")]
    config: String,

    /// Bot token (overrides BOT_TOKEN)
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

#[derive(Error, Debug)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Bot(#[from] BotError),

    #[error("Runtime error: {0}")]
    Runtime(#[from] std::io::Error),
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
            if let Err(e) = run_bot(&cli.config, cli.token) {
                tracing::error!("Fatal: {}", e);
                std::process::exit(1);
            }
        }
        Commands::Version => {
            println!("majed-bot v{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::InitConfig => {
            if let Err(e) = init_config() {
                tracing::error!("Failed to render config: {}", e);
                std::process::exit(1);
            }
        }
    }
}

fn run_bot(config_path: &str, token_override: Option<String>) -> Result<(), StartupError> {
    let settings = Settings::load(config_path)?;
    let token = config::load_token(token_override)?;

    tracing::info!(
        "Starting {} bot, broadcasting to {}",
        settings.display_name,
        settings
            .destination_channel
            .as_ref()
            .map(ChatTarget::to_string)
            .unwrap_or_default(),
    );

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(run_telegram_bot(TelegramAdapter::new(token), settings))
}

async fn run_telegram_bot(mut bot: TelegramAdapter, settings: Settings) -> Result<(), StartupError> {
    bot.fetch_bot_info().await?;
    let info = bot.bot_info();
    tracing::info!("Bot started: @{}", info.username);

    if let Err(e) = bot.drop_pending_updates().await {
        tracing::warn!("Failed to drop pending updates: {}", e);
    }

    let parser = MessageParser::new("/").with_bot_username(&info.username);
    let bot = Arc::new(bot);
    let service = Arc::new(CommandService::new(
        &settings,
        Arc::clone(&bot),
        Arc::new(AdminAuthorizer::new(settings.admin_user_id)),
        Arc::new(SystemClock),
    )?);

    if let Err(e) = bot.register_commands(service.registry()).await {
        tracing::warn!("Failed to register commands: {}", e);
    }

    let mut offset: i64 = 0;
    let mut in_flight = InFlight::new();
    tracing::info!("Starting message loop...");

    loop {
        let polled = tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutting down");
                break;
            }
            polled = bot.get_updates(offset, POLL_TIMEOUT_SECS) => polled,
        };

        match polled {
            Ok(updates) => {
                if !updates.is_empty() {
                    tracing::debug!("Received {} updates", updates.len());
                }
                for update in &updates {
                    let Some(msg) = &update.message else {
                        continue;
                    };
                    let message = msg.to_domain(&parser);
                    let service = Arc::clone(&service);
                    let bot = Arc::clone(&bot);

                    // Each command runs on its own task
                    in_flight.spawn(async move {
                        let Some(reply) = service.handle(&message).await else {
                            return;
                        };
                        let chat = ChatTarget::Id(message.chat_id);
                        if let Err(e) = bot.send_message(&chat, &reply.text, reply.keyboard.as_ref()).await {
                            tracing::error!("Failed to reply to chat {}: {}", message.chat_id, e);
                        }
                    });
                }

                offset = TelegramAdapter::get_next_offset(&updates, offset);
                in_flight.reap();
            }
            Err(BotError::Api { retry_after: Some(secs), .. }) => {
                tracing::warn!("Rate limited by Telegram, retrying in {}s", secs);
                tokio::time::sleep(Duration::from_secs(secs)).await;
            }
            Err(e) => {
                tracing::error!("Failed to get updates: {}", e);
                tokio::time::sleep(POLL_BACKOFF).await;
            }
        }
    }

    let aborted = in_flight.drain(settings.dispatch_timeout() + SHUTDOWN_SLACK).await;
    if aborted > 0 {
        tracing::warn!("{} handlers did not finish before shutdown", aborted);
    }

    Ok(())
}

fn init_config() -> Result<(), serde_json::Error> {
    let settings = Settings::default();
    let json = serde_json::to_string_pretty(&settings)?;
    println!("{}", json);
    println!("\nSave this to config.json and set PREMIUM_CHANNEL_ID, SALLA_URL and ADMIN_USER_ID.");
    Ok(())
}
