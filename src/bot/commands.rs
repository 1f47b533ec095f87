use super::args;
use super::BotState;
use crate::auth::{OAuthFlow, UserCredential};
use crate::calendar::format::render_listing;
use crate::calendar::EventWindow;
use crate::error::{BotResult, Error};
use chrono::Utc;
use teloxide::prelude::*;
use teloxide::types::ChatId;
use tracing::info;

const NO_EVENTS: &str = "No events found.";
const NO_UPCOMING_EVENTS: &str = "No upcoming events found.";

const START_TEXT: &str = "Hi! First you need to log in\nSend /reg command\n\
After registration send /help to get a list of available commands";

const HELP_TEXT: &str = "List of available commands\n\
/near \"n\"\n  List the \"n\" nearest events, 0 < \"n\" <= 100\n\
/last \"n\"\n  List the \"n\" most recent events from the past month\n\
/day \"date\"\n  List events on the given day (YYYY-MM-DD, today when omitted)\n\
/period \"start\" - \"end\"\n  List events between two dates (YYYY-MM-DD)\n\
/delete\n  Delete your authentication info";

/// Greeting for new chats
pub async fn start(bot: &Bot, chat_id: ChatId) -> BotResult<()> {
    bot.send_message(chat_id, START_TEXT).await?;
    Ok(())
}

/// Command reference; only shown to logged-in users
pub async fn help(state: &BotState, bot: &Bot, chat_id: ChatId) -> BotResult<()> {
    if state.store.load(chat_id.0)?.is_none() {
        return Err(Error::NotLoggedIn);
    }
    bot.send_message(chat_id, HELP_TEXT).await?;
    Ok(())
}

/// Start the two-step registration: send the authorization URL and mark the
/// chat as awaiting an authorization code
pub async fn register(state: &BotState, bot: &Bot, chat_id: ChatId) -> BotResult<()> {
    if state.store.load(chat_id.0)?.is_some() {
        return Err(Error::AlreadyLoggedIn);
    }
    bot.send_message(chat_id, "Starting authentication").await?;

    let flow = state.auth.clone();
    let auth_url = flow.authorize_url()?;
    bot.send_message(chat_id, format!("{} - Authorization URL", auth_url))
        .await?;
    bot.send_message(chat_id, "Write here your authentication code")
        .await?;

    state.pending_auth.lock().await.insert(chat_id.0, flow);
    Ok(())
}

/// Finish registration: exchange the code the user sent and persist the
/// resulting credential
pub async fn finish_register(
    state: &BotState,
    bot: &Bot,
    chat_id: ChatId,
    flow: OAuthFlow,
    code: &str,
) -> BotResult<()> {
    let credential = flow.exchange_code(code.trim()).await?;
    state.store.save(chat_id.0, &credential)?;
    info!("Linked calendar account for chat {}", chat_id.0);
    bot.send_message(chat_id, "End of authentication").await?;
    Ok(())
}

/// Remove the user's stored credential
pub async fn delete(state: &BotState, bot: &Bot, chat_id: ChatId) -> BotResult<()> {
    if state.store.load(chat_id.0)?.is_none() {
        bot.send_message(chat_id, "Credentials do not exist").await?;
        return Ok(());
    }
    state.store.delete(chat_id.0)?;
    info!("Deleted credentials for chat {}", chat_id.0);
    bot.send_message(chat_id, "Your credentials are deleted")
        .await?;
    Ok(())
}

/// `/near [n]`: the n nearest upcoming events
pub async fn near(state: &BotState, bot: &Bot, chat_id: ChatId, arg: &str) -> BotResult<()> {
    let credential = require_credentials(state, chat_id).await?;
    let count = args::parse_count(arg)?;

    bot.send_message(chat_id, format!("Getting {} upcoming events", count))
        .await?;

    let window = EventWindow::upcoming(Utc::now(), count);
    let events = state.calendar.list_events(&credential.access_token, &window).await?;
    bot.send_message(chat_id, render_listing(&events, NO_UPCOMING_EVENTS, false))
        .await?;
    Ok(())
}

/// `/last [n]`: the n most recent events from the trailing month
pub async fn last(state: &BotState, bot: &Bot, chat_id: ChatId, arg: &str) -> BotResult<()> {
    let credential = require_credentials(state, chat_id).await?;
    let count = args::parse_count(arg)?;

    let window = EventWindow::trailing_month(Utc::now(), count);
    let events = state.calendar.list_events(&credential.access_token, &window).await?;
    bot.send_message(chat_id, render_listing(&events, NO_EVENTS, false))
        .await?;
    Ok(())
}

/// `/day [date]`: events on one day, today when the date is omitted. The
/// rendered lines drop their leading date, the query already implies it.
pub async fn day(state: &BotState, bot: &Bot, chat_id: ChatId, arg: &str) -> BotResult<()> {
    let credential = require_credentials(state, chat_id).await?;
    let date = args::parse_single_date(arg, Utc::now().date_naive())?;

    let window = EventWindow::single_day(date);
    let events = state.calendar.list_events(&credential.access_token, &window).await?;
    bot.send_message(chat_id, render_listing(&events, NO_EVENTS, true))
        .await?;
    Ok(())
}

/// `/period <date> - <date>`: events between two dates
pub async fn period(state: &BotState, bot: &Bot, chat_id: ChatId, arg: &str) -> BotResult<()> {
    let credential = require_credentials(state, chat_id).await?;
    let (start, end) = args::parse_date_pair(arg)?;

    let window = EventWindow::date_pair(start, end);
    let events = state.calendar.list_events(&credential.access_token, &window).await?;
    bot.send_message(chat_id, render_listing(&events, NO_EVENTS, false))
        .await?;
    Ok(())
}

/// Load-and-refresh the chat's credential, mapping absence to `NotLoggedIn`
async fn require_credentials(
    state: &BotState,
    chat_id: ChatId,
) -> BotResult<UserCredential> {
    state
        .auth
        .refresh(&state.store, chat_id.0)
        .await?
        .ok_or(Error::NotLoggedIn)
}
