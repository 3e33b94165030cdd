pub mod callback;
pub mod general_message;
pub mod message;

use std::sync::Arc;
use teloxide::{
    dispatching::{UpdateFilterExt, UpdateHandler},
    prelude::*,
};

use crate::bot::commands::Command;
use crate::config::Config;
use crate::database::connection::DatabaseManager;

pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;
pub type HandlerResult = Result<(), HandlerError>;

/// Shared state for every update handler.
#[derive(Clone)]
pub struct BotHandler {
    pub db: Arc<DatabaseManager>,
    pub config: Arc<Config>,
}

impl BotHandler {
    pub fn new(db: Arc<DatabaseManager>, config: Arc<Config>) -> Self {
        Self { db, config }
    }

    pub fn schema(&self) -> UpdateHandler<HandlerError> {
        let commands = self.clone();
        let messages = self.clone();
        let callbacks = self.clone();

        dptree::entry()
            .branch(
                Update::filter_message()
                    .filter_command::<Command>()
                    .endpoint(move |bot: Bot, msg: Message, cmd: Command| {
                        let handler = commands.clone();
                        async move { message::command_handler(bot, msg, cmd, handler).await }
                    }),
            )
            .branch(Update::filter_message().endpoint(move |bot: Bot, msg: Message| {
                let handler = messages.clone();
                async move { general_message::handle_general_message(bot, msg, handler).await }
            }))
            .branch(Update::filter_callback_query().endpoint(move |bot: Bot, q: CallbackQuery| {
                let handler = callbacks.clone();
                async move { callback::callback_handler(bot, q, handler).await }
            }))
    }

    pub fn is_allowed(&self, user: Option<&teloxide::types::User>) -> bool {
        user.is_some_and(|u| self.config.is_user_allowed(u.id.0))
    }
}
