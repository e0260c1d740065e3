//! Command and callback handlers.
//!
//! `IdeaBot` holds no mutable state; every handler works from its arguments,
//! the static category table and the injected gateway, so one instance is
//! shared across all concurrent updates.

use tracing::{debug, error, info, warn};

use super::delivery::{self, Target};
use super::keyboards::{self, Keyboard};
use super::messages;
use super::router::{CallbackAction, Command};
use super::transport::{ChatTransport, MessageRef, TransportError};
use crate::ideas::categories::{self, Category};
use crate::ideas::IdeaGateway;
use crate::markup::FormattedText;

/// An inline button press, stripped of platform types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackEvent {
    pub id: String,
    pub data: String,
    /// The message carrying the pressed button, if still accessible.
    pub message: Option<MessageRef>,
}

pub struct IdeaBot<T> {
    transport: T,
    gateway: IdeaGateway,
}

impl<T: ChatTransport> IdeaBot<T> {
    pub fn new(transport: T, gateway: IdeaGateway) -> Self {
        Self { transport, gateway }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    // ── Commands ─────────────────────────────────────────────────────────────

    pub async fn handle_command(&self, command: Command, chat_id: i64) {
        info!(chat_id, ?command, "command received");
        match command {
            Command::Start => {
                self.reply(Target::New(chat_id), &messages::welcome(), keyboards::main_menu()).await
            }
            Command::Categories => {
                self.reply(Target::New(chat_id), &messages::categories(), keyboards::categories()).await
            }
            Command::Help => self.reply(Target::New(chat_id), &messages::help(), keyboards::help()).await,
            Command::Random => self.random_command(chat_id).await,
        }
    }

    /// `/random`: loading message, generate, delete the loading message, then
    /// send the result as a new message.
    async fn random_command(&self, chat_id: i64) {
        let category = categories::pick_random();
        debug!(chat_id, category = category.key, "random category picked");

        let loading = match delivery::deliver(
            &self.transport,
            Target::New(chat_id),
            &messages::generating_random(category),
            None,
        )
        .await
        {
            Ok(d) => d.message,
            Err(e) => return self.report_error(chat_id, &e).await,
        };

        let reply = self.gateway.generate(category).await;

        if let Err(e) = self.transport.delete_message(loading).await {
            warn!(chat_id, message_id = loading.message_id, error = %e, "could not delete loading message");
        }

        self.reply(Target::New(chat_id), reply.text(), keyboards::random_result()).await;
    }

    // ── Callbacks ────────────────────────────────────────────────────────────

    pub async fn handle_callback(&self, event: CallbackEvent) {
        let Some(action) = CallbackAction::parse(&event.data) else {
            debug!(data = %event.data, "ignoring unknown callback");
            return;
        };

        if let Err(e) = self.transport.answer_callback(&event.id).await {
            warn!(callback_id = %event.id, error = %e, "failed to answer callback");
        }

        let Some(message) = event.message else {
            warn!(data = %event.data, "callback without an accessible message");
            return;
        };

        info!(chat_id = message.chat_id, ?action, "callback received");
        let target = Target::Edit(message);
        match action {
            CallbackAction::ShowCategories => {
                self.reply(target, &messages::categories(), keyboards::categories()).await
            }
            CallbackAction::Help => self.reply(target, &messages::help(), keyboards::help()).await,
            CallbackAction::BackToStart => {
                self.reply(target, &messages::main_menu(), keyboards::main_menu()).await
            }
            CallbackAction::Category(category) => {
                let loading = messages::generating_for(category);
                self.generate_in_place(message, category, &loading, keyboards::category_result(category))
                    .await
            }
            CallbackAction::RandomIdea => {
                let category = categories::pick_random();
                let loading = messages::generating_random(category);
                self.generate_in_place(message, category, &loading, keyboards::random_result()).await
            }
        }
    }

    /// Edit `message` to a loading text, then to the generated reply.
    async fn generate_in_place(
        &self,
        message: MessageRef,
        category: &Category,
        loading: &FormattedText,
        keyboard: Keyboard,
    ) {
        if let Err(e) = delivery::deliver(&self.transport, Target::Edit(message), loading, None).await {
            return self.report_error(message.chat_id, &e).await;
        }

        let reply = self.gateway.generate(category).await;
        self.reply(Target::Edit(message), reply.text(), keyboard).await;
    }

    // ── Delivery ─────────────────────────────────────────────────────────────

    async fn reply(&self, target: Target, text: &FormattedText, keyboard: Keyboard) {
        if let Err(e) = delivery::deliver(&self.transport, target, text, Some(keyboard)).await {
            self.report_error(target.chat_id(), &e).await;
        }
    }

    /// Best effort: tell the user something went wrong. A failure here is
    /// only logged.
    async fn report_error(&self, chat_id: i64, cause: &TransportError) {
        error!(chat_id, error = %cause, "telegram API error while handling update");
        if let Err(e) = delivery::deliver(&self.transport, Target::New(chat_id), &messages::generic_error(), None).await
        {
            error!(chat_id, error = %e, "failed to send error message to user");
        }
    }
}
