//! Telegram transport for the EV charge logger.
//!
//! The bot is a thin adapter: it turns updates into engine events, executes
//! the effects the engine plans, and never encodes conversation rules
//! itself.

use std::sync::Arc;

use engine::{Engine, SessionStore};
use teloxide::prelude::*;
use teloxide::types::ChatId;
use tokio::sync::Mutex;

mod handlers;
mod ui;

#[derive(Clone)]
pub struct ConfigParameters {
    allowed_user: UserId,
    channel: ChatId,
    engine: Arc<Mutex<Engine>>,
}

pub struct Bot {
    token: String,
    allowed_user: UserId,
    channel: ChatId,
}

impl Bot {
    pub fn builder() -> BotBuilder {
        BotBuilder::default()
    }

    pub async fn run(&self) {
        tracing::info!("Starting telegram bot...");

        let bot = teloxide::Bot::new(&self.token);

        let parameters = ConfigParameters {
            allowed_user: self.allowed_user,
            channel: self.channel,
            engine: Arc::new(Mutex::new(Engine::new(SessionStore::default()))),
        };

        let handler = dptree::entry()
            .branch(Update::filter_message().endpoint(handlers::handle_message))
            .branch(Update::filter_callback_query().endpoint(handlers::handle_callback));

        Dispatcher::builder(bot, handler)
            .dependencies(dptree::deps![parameters])
            .default_handler(|upd| async move {
                tracing::warn!("Unhandled update: {:?}", upd);
            })
            .error_handler(LoggingErrorHandler::with_custom_text(
                "An error has occurred in the dispatcher",
            ))
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;
    }
}

#[derive(Default, Debug)]
pub struct BotBuilder {
    token: String,
    allowed_user: u64,
    channel: i64,
}

impl BotBuilder {
    pub fn token(mut self, token: &str) -> BotBuilder {
        self.token = token.to_string();
        self
    }

    /// The single operator identity; updates from anyone else are dropped.
    pub fn allowed_user(mut self, allowed_user: u64) -> BotBuilder {
        self.allowed_user = allowed_user;
        self
    }

    /// The channel the log records are published to.
    pub fn channel(mut self, channel: i64) -> BotBuilder {
        self.channel = channel;
        self
    }

    pub fn build(self) -> Result<Bot, String> {
        tracing::info!("Initializing telegram bot...");

        if self.token.is_empty() {
            return Err("missing bot token".to_string());
        }
        if self.allowed_user == 0 {
            return Err("missing operator user id".to_string());
        }
        if self.channel == 0 {
            return Err("missing log channel id".to_string());
        }

        Ok(Bot {
            token: self.token,
            allowed_user: UserId(self.allowed_user),
            channel: ChatId(self.channel),
        })
    }
}
