//! Telegram adapters
//!
//! Inbound updates are turned into state machine events and queued on the
//! runtime manager. Outbound prompts and the operator notification go through
//! the same `Bot`.

use crate::catalog::Menu;
use crate::runtime::{
    GatewayError, MessageGateway, NotifyError, OperatorNotifier, RuntimeManager, SystemClock,
};
use crate::session_store::InMemorySessionStore;
use crate::state_machine::{Event, Identity};
use async_trait::async_trait;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup, LinkPreviewOptions, ParseMode};
use teloxide::utils::command::BotCommands;

/// Manager wired to the production adapters
pub type BookingManager =
    RuntimeManager<Arc<InMemorySessionStore>, TelegramGateway, TelegramNotifier, SystemClock>;

// ============================================================================
// Commands
// ============================================================================

#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Доступные команды:")]
pub enum Command {
    #[command(description = "начать сначала")]
    Start,
    #[command(description = "информация о помещениях")]
    Info,
    #[command(description = "забронировать помещение")]
    Book,
}

impl Command {
    pub fn into_event(self) -> Event {
        match self {
            Command::Start => Event::SessionStart,
            Command::Info => Event::ShowInfo,
            Command::Book => Event::BeginBooking,
        }
    }
}

// ============================================================================
// Outbound
// ============================================================================

fn link_preview(links_enabled: bool) -> LinkPreviewOptions {
    LinkPreviewOptions {
        is_disabled: !links_enabled,
        url: None,
        prefer_small_media: false,
        prefer_large_media: false,
        show_above_text: false,
    }
}

/// One callback button per menu option, rows preserved
fn keyboard(menu: &Menu) -> InlineKeyboardMarkup {
    let rows: Vec<Vec<InlineKeyboardButton>> = menu
        .rows()
        .iter()
        .map(|row| {
            row.iter()
                .map(|option| InlineKeyboardButton::callback(&option.label, &option.token))
                .collect()
        })
        .collect();

    InlineKeyboardMarkup::new(rows)
}

/// Delivers prompts to the user's chat
#[derive(Clone)]
pub struct TelegramGateway {
    bot: Bot,
}

impl TelegramGateway {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl MessageGateway for TelegramGateway {
    async fn send_text(
        &self,
        identity: Identity,
        text: &str,
        links_enabled: bool,
    ) -> Result<(), GatewayError> {
        self.bot
            .send_message(ChatId(identity.0), text)
            .parse_mode(ParseMode::Html)
            .link_preview_options(link_preview(links_enabled))
            .await
            .map_err(|e| GatewayError::new(identity, e.to_string()))?;
        Ok(())
    }

    async fn send_menu(
        &self,
        identity: Identity,
        text: &str,
        menu: &Menu,
    ) -> Result<(), GatewayError> {
        self.bot
            .send_message(ChatId(identity.0), text)
            .parse_mode(ParseMode::Html)
            .link_preview_options(link_preview(false))
            .reply_markup(keyboard(menu))
            .await
            .map_err(|e| GatewayError::new(identity, e.to_string()))?;
        Ok(())
    }
}

/// Forwards confirmed bookings to the operator chat
#[derive(Clone)]
pub struct TelegramNotifier {
    bot: Bot,
    operator: ChatId,
}

impl TelegramNotifier {
    pub fn new(bot: Bot, operator_chat_id: i64) -> Self {
        Self {
            bot,
            operator: ChatId(operator_chat_id),
        }
    }
}

#[async_trait]
impl OperatorNotifier for TelegramNotifier {
    async fn notify(&self, text: &str) -> Result<(), NotifyError> {
        self.bot
            .send_message(self.operator, text)
            .parse_mode(ParseMode::Html)
            .link_preview_options(link_preview(false))
            .await
            .map_err(|e| NotifyError(e.to_string()))?;
        Ok(())
    }
}

// ============================================================================
// Inbound
// ============================================================================

async fn enqueue(manager: &BookingManager, identity: Identity, event: Event) {
    if let Err(e) = manager.send_event(identity, event).await {
        tracing::error!(identity = %identity, error = %e, "Dropped inbound event");
    }
}

#[allow(clippy::needless_pass_by_value)] // dptree hands dependencies over by value
async fn handle_command(
    msg: Message,
    cmd: Command,
    manager: Arc<BookingManager>,
) -> ResponseResult<()> {
    let identity = Identity(msg.chat.id.0);
    tracing::debug!(identity = %identity, command = ?cmd, "Command received");
    enqueue(&manager, identity, cmd.into_event()).await;
    Ok(())
}

#[allow(clippy::needless_pass_by_value)] // dptree hands dependencies over by value
async fn handle_callback(
    bot: Bot,
    query: CallbackQuery,
    manager: Arc<BookingManager>,
) -> ResponseResult<()> {
    // Stop the client-side spinner whatever happens next
    if let Err(e) = bot.answer_callback_query(query.id.clone()).await {
        tracing::warn!(error = %e, "Failed to answer callback query");
    }

    let Some(token) = query.data else {
        return Ok(());
    };
    let Some(message) = query.message else {
        tracing::debug!("Callback without an accessible message");
        return Ok(());
    };

    let identity = Identity(message.chat().id.0);
    enqueue(&manager, identity, Event::selection(token)).await;
    Ok(())
}

#[allow(clippy::needless_pass_by_value)] // dptree hands dependencies over by value
async fn handle_message(msg: Message, manager: Arc<BookingManager>) -> ResponseResult<()> {
    let identity = Identity(msg.chat.id.0);
    match msg.text() {
        Some(text) => enqueue(&manager, identity, Event::text(text)).await,
        None => tracing::debug!(identity = %identity, "Ignoring non-text message"),
    }
    Ok(())
}

/// Poll Telegram until Ctrl-C
pub async fn run_dispatcher(bot: Bot, manager: Arc<BookingManager>) {
    let handler = dptree::entry()
        .branch(
            Update::filter_message()
                .filter_command::<Command>()
                .endpoint(handle_command),
        )
        .branch(Update::filter_callback_query().endpoint(handle_callback))
        .branch(Update::filter_message().endpoint(handle_message));

    tracing::info!("Starting Telegram dispatcher");
    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![manager])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
}
