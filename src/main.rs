use clap::{Parser, Subcommand};
use std::sync::Arc;
use std::time::Duration;

mod domain;
mod application;
mod infrastructure;

#[cfg(test)]
mod test_utils;

use application::errors::BotError;
use application::messaging::Dispatcher;
use application::services::EventLoop;
use domain::entities::Command;
use domain::traits::{Bot, UserStore};
use infrastructure::adapters::TelegramAdapter;
use infrastructure::config::Config;
use infrastructure::database::SqliteUserStore;
use infrastructure::weather::OpenWeatherClient;

#[derive(Parser)]
#[command(name = "weather-bot")]
#[command(about = "Telegram bot reporting the current temperature in your city", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.yaml")]
    config: String,

    /// Bot token (overrides config and BOT_TOKEN)
    #[arg(short, long)]
    token: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the bot
    Run,
    /// Show version
    Version,
    /// Print a default config
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
            if let Err(e) = run_bot(&cli.config, cli.token) {
                tracing::error!("{}", e);
                std::process::exit(1);
            }
        }
        Commands::Version => {
            println!("weather-bot v{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::InitConfig => {
            init_config();
        }
    }
}

fn load_config(config_path: &str, token_override: Option<String>) -> Result<Config, BotError> {
    if dotenvy::dotenv().is_ok() {
        tracing::info!("Loaded .env");
    }

    let config = if std::path::Path::new(config_path).exists() {
        Config::load(config_path)?
    } else {
        tracing::info!("No config file at {}, using defaults", config_path);
        Config::default()
    };

    let mut config = config.apply_env();
    if let Some(token) = token_override {
        config.telegram.token = Some(token);
    }

    Ok(config)
}

fn run_bot(config_path: &str, token_override: Option<String>) -> Result<(), BotError> {
    let config = load_config(config_path, token_override)?;
    let secrets = config.secrets()?;

    tracing::info!("Starting {}", config.bot.name);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| BotError::Network(format!("Failed to start runtime: {}", e)))?;

    rt.block_on(async {
        let store = SqliteUserStore::open(secrets.database_url)?;
        store.ping().await?;
        tracing::info!("Database initialized");

        let weather = OpenWeatherClient::new(secrets.weather_api_key)
            .with_base_urls(&config.weather.geo_url, &config.weather.data_url);

        let mut bot = TelegramAdapter::new(secrets.telegram_token)
            .with_base_url(&config.telegram.api_url);
        bot.fetch_bot_info().await?;
        let info = bot.bot_info();
        tracing::info!("Authorized on account @{} ({}, id {})", info.username, info.name, info.id);

        if let Err(e) = bot.register_commands(&Command::KNOWN).await {
            tracing::warn!("Failed to register commands: {}", e);
        }

        let bot: Arc<dyn Bot> = Arc::new(bot);
        let dispatcher = Dispatcher::new(Arc::new(store), Arc::new(weather), bot.clone());

        let mut event_loop = EventLoop::new(bot, dispatcher)
            .with_poll_timeout(config.bot.poll_timeout_seconds)
            .with_error_delay(Duration::from_secs(config.bot.poll_error_delay_seconds));

        event_loop
            .run(async {
                if let Err(e) = tokio::signal::ctrl_c().await {
                    tracing::error!("Failed to listen for shutdown signal: {}", e);
                    std::future::pending::<()>().await;
                }
                tracing::info!("Shutdown requested");
            })
            .await;

        Ok::<(), BotError>(())
    })
}

fn init_config() {
    match Config::default().to_yaml() {
        Ok(yaml) => {
            println!("{}", yaml);
            println!("\nSave this to config.yaml and adjust as needed.");
        }
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    }
}
