pub mod args;
pub mod commands;

use crate::auth::{CredentialStore, OAuthFlow};
use crate::calendar::CalendarClient;
use crate::config::Config;
use crate::error::{ArgumentError, BotResult, Error};
use std::collections::HashMap;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::{ChatId, Message};
use tokio::sync::Mutex;
use tracing::error;

/// Shared state for all command handlers
pub struct BotState {
    pub store: CredentialStore,
    pub auth: OAuthFlow,
    pub calendar: CalendarClient,
    /// Chats awaiting an authorization code, with the in-flight flow.
    /// Consulted before command routing and cleared on first use.
    pub pending_auth: Mutex<HashMap<i64, OAuthFlow>>,
}

impl BotState {
    pub fn new(config: &Config) -> BotResult<Self> {
        Ok(Self {
            store: CredentialStore::open(&config.credentials_dir)?,
            auth: OAuthFlow::new(config),
            calendar: CalendarClient::new(),
            pending_auth: Mutex::new(HashMap::new()),
        })
    }
}

/// Entry point for every inbound message. Any failure propagated from a
/// handler is answered and logged here exactly once; nothing is fatal to the
/// process.
pub async fn handle_update(
    bot: Bot,
    msg: Message,
    state: Arc<BotState>,
) -> Result<(), teloxide::RequestError> {
    let Some(text) = msg.text() else {
        return Ok(());
    };
    let chat_id = msg.chat.id;

    if let Err(err) = dispatch(&bot, &state, chat_id, text).await {
        report_error(&bot, chat_id, &err).await;
    }
    Ok(())
}

/// Route one message: a pending authorization code wins over command routing,
/// unrecognized text behaves like /help
async fn dispatch(bot: &Bot, state: &BotState, chat_id: ChatId, text: &str) -> BotResult<()> {
    let pending = state.pending_auth.lock().await.remove(&chat_id.0);
    if let Some(flow) = pending {
        return commands::finish_register(state, bot, chat_id, flow, text).await;
    }

    let (command, arg) = split_command(text);
    match command {
        "/start" => commands::start(bot, chat_id).await,
        "/reg" => commands::register(state, bot, chat_id).await,
        "/delete" => commands::delete(state, bot, chat_id).await,
        "/near" => commands::near(state, bot, chat_id, arg).await,
        "/last" => commands::last(state, bot, chat_id, arg).await,
        "/day" => commands::day(state, bot, chat_id, arg).await,
        "/period" => commands::period(state, bot, chat_id, arg).await,
        _ => commands::help(state, bot, chat_id).await,
    }
}

/// Split a message into its command token and the trimmed argument text
pub fn split_command(text: &str) -> (&str, &str) {
    match text.split_once(char::is_whitespace) {
        Some((command, arg)) => (command, arg.trim()),
        None => (text.trim_end(), ""),
    }
}

/// Map a handler failure to its user-visible reply. Anything outside the
/// user-facing taxonomy collapses to a generic message.
pub fn reply_for_error(err: &Error) -> &'static str {
    match err {
        Error::NotLoggedIn => "You need to log in first\nSend /reg command",
        Error::AlreadyLoggedIn => {
            "You are already logged in\nSend /help to get a list of available commands"
        }
        Error::InvalidAuthCode => "Incorrect authentication code",
        Error::InvalidArgument(arg_err) => match arg_err {
            ArgumentError::NotANumber => "Incorrect number, you should write only a number",
            ArgumentError::NonPositive => "Incorrect number of events",
            ArgumentError::TooLarge => "Too many events requested",
            ArgumentError::BadDateFormat => "Incorrect date, use YYYY-MM-DD format",
            ArgumentError::RangeInverted => "End date is before start date",
        },
        _ => "Unknown error",
    }
}

/// User-visible taxonomy errors carry their own message; everything else is
/// diagnostic detail that belongs in the log, not the chat
fn is_user_visible(err: &Error) -> bool {
    matches!(
        err,
        Error::NotLoggedIn
            | Error::AlreadyLoggedIn
            | Error::InvalidAuthCode
            | Error::InvalidArgument(_)
    )
}

async fn report_error(bot: &Bot, chat_id: ChatId, err: &Error) {
    if !is_user_visible(err) {
        error!("Command failed for chat {}: {:?}", chat_id.0, err);
    }
    if let Err(send_err) = bot.send_message(chat_id, reply_for_error(err)).await {
        error!("Failed to send error reply to chat {}: {:?}", chat_id.0, send_err);
    }
}
