use crate::bot::{handle_update, BotState};
use crate::config::Config;
use crate::error::Error;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::Message;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Initialize logging with environment-based configuration
pub fn init_logging() -> miette::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,teloxide=warn,hyper=warn,reqwest=warn")),
        )
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| Error::Other(format!("Failed to set up logging: {}", e)))?;

    Ok(())
}

/// Load and validate the application config
pub fn load_config() -> miette::Result<Config> {
    match Config::load() {
        Ok(config) => Ok(config),
        Err(e) => {
            error!("Failed to load configuration: {:?}", e);
            Err(e.into())
        }
    }
}

/// Initialize shared state and run the Telegram long-polling loop until
/// shutdown
pub async fn start_bot(config: Config) -> miette::Result<()> {
    let bot = Bot::new(&config.telegram_token);
    let state = Arc::new(BotState::new(&config)?);

    let handler = Update::filter_message().endpoint({
        let state = Arc::clone(&state);
        move |bot: Bot, msg: Message| {
            let state = Arc::clone(&state);
            async move { handle_update(bot, msg, state).await }
        }
    });

    info!("Starting bot...");
    Dispatcher::builder(bot, handler)
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    info!("Bot process ended");
    Ok(())
}
