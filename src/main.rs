//! Room booking bot
//!
//! Walks Telegram users through a short booking questionnaire and forwards
//! the confirmed request to an operator chat.

mod api;
mod catalog;
mod config;
mod gateway;
mod notification;
mod prompts;
mod runtime;
mod session_store;
mod state_machine;

use api::{create_router, AppState};
use config::BotConfig;
use gateway::{Command, TelegramGateway, TelegramNotifier};
use runtime::{ConversationRuntime, RuntimeManager, SystemClock};
use session_store::InMemorySessionStore;
use std::net::SocketAddr;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "booking_bot=info,teloxide=warn".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    // Configuration
    let config = BotConfig::from_env()?;
    tracing::info!(
        port = config.port,
        operator_offset = ?config.operator_offset,
        "Configuration loaded"
    );

    let bot = Bot::new(&config.bot_token);
    if let Err(e) = bot.set_my_commands(Command::bot_commands()).await {
        tracing::warn!(error = %e, "Failed to register bot commands");
    }

    // Wire the runtime
    let store = Arc::new(InMemorySessionStore::new());
    let runtime = ConversationRuntime::new(
        store.clone(),
        TelegramGateway::new(bot.clone()),
        TelegramNotifier::new(bot.clone(), config.operator_chat_id),
        SystemClock::new(config.operator_offset),
    );
    let manager = Arc::new(RuntimeManager::new(runtime));

    // Health check server
    let shutdown = CancellationToken::new();
    let app = create_router(AppState::new(store));
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Health check listening on {}", addr);

    let server = tokio::spawn({
        let shutdown = shutdown.clone();
        async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move { shutdown.cancelled().await })
                .await
        }
    });

    gateway::run_dispatcher(bot, manager.clone()).await;

    tracing::info!("Shutting down");
    shutdown.cancel();
    manager.shutdown().await;
    server.await??;

    Ok(())
}
