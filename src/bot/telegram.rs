//! Telegram adapter: `ChatTransport` over teloxide and the update loop.
//!
//! Runs long polling by default, or a webhook listener when the config
//! carries a public URL (feature `webhook`).

use std::sync::Arc;

use teloxide::dispatching::UpdateFilterExt;
use teloxide::dptree;
use teloxide::error_handlers::LoggingErrorHandler;
use teloxide::payloads::{EditMessageTextSetters, SendMessageSetters};
use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup, MessageId, ParseMode};
use teloxide::utils::command::BotCommands;
use teloxide::{ApiError, RequestError};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::handlers::{CallbackEvent, IdeaBot};
use super::keyboards::Keyboard;
use super::router::Command;
use super::transport::{ChatTransport, MessageRef, OutgoingMessage, TextFormat, TransportError};
use crate::config::Config;
use crate::error::AppError;
use crate::ideas::IdeaGateway;

// ── Transport ────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct TelegramTransport {
    bot: Bot,
}

impl TelegramTransport {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

fn inline_keyboard(keyboard: &Keyboard) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(keyboard.rows.iter().map(|row| {
        row.iter()
            .map(|b| InlineKeyboardButton::callback(b.label.clone(), b.data.clone()))
            .collect::<Vec<_>>()
    }))
}

fn transport_error(err: RequestError) -> TransportError {
    match err {
        RequestError::Api(ApiError::CantParseEntities(detail)) => TransportError::UnparseableMarkup(detail),
        other => TransportError::Other(other.to_string()),
    }
}

impl ChatTransport for TelegramTransport {
    async fn send_message(&self, chat_id: i64, message: &OutgoingMessage) -> Result<MessageRef, TransportError> {
        let mut req = self.bot.send_message(ChatId(chat_id), message.text.clone());
        if message.format == TextFormat::MarkdownV2 {
            req = req.parse_mode(ParseMode::MarkdownV2);
        }
        if let Some(keyboard) = &message.keyboard {
            req = req.reply_markup(inline_keyboard(keyboard));
        }
        let sent = req.await.map_err(transport_error)?;
        Ok(MessageRef { chat_id: sent.chat.id.0, message_id: sent.id.0 })
    }

    async fn edit_message(&self, target: MessageRef, message: &OutgoingMessage) -> Result<(), TransportError> {
        let mut req = self.bot.edit_message_text(
            ChatId(target.chat_id),
            MessageId(target.message_id),
            message.text.clone(),
        );
        if message.format == TextFormat::MarkdownV2 {
            req = req.parse_mode(ParseMode::MarkdownV2);
        }
        if let Some(keyboard) = &message.keyboard {
            req = req.reply_markup(inline_keyboard(keyboard));
        }
        req.await.map(|_| ()).map_err(transport_error)
    }

    async fn delete_message(&self, target: MessageRef) -> Result<(), TransportError> {
        self.bot
            .delete_message(ChatId(target.chat_id), MessageId(target.message_id))
            .await
            .map(|_| ())
            .map_err(transport_error)
    }

    async fn answer_callback(&self, callback_id: &str) -> Result<(), TransportError> {
        self.bot
            .answer_callback_query(callback_id.to_string())
            .await
            .map(|_| ())
            .map_err(transport_error)
    }
}

// ── Update endpoints ─────────────────────────────────────────────────────────

type App = Arc<IdeaBot<TelegramTransport>>;

async fn on_command(app: App, msg: Message, cmd: Command) -> ResponseResult<()> {
    app.handle_command(cmd, msg.chat.id.0).await;
    Ok(())
}

async fn on_callback(app: App, query: CallbackQuery) -> ResponseResult<()> {
    let event = CallbackEvent {
        id: query.id.clone(),
        data: query.data.clone().unwrap_or_default(),
        message: query
            .message
            .as_ref()
            .map(|m| MessageRef { chat_id: m.chat().id.0, message_id: m.id().0 }),
    };
    app.handle_callback(event).await;
    Ok(())
}

// ── run ──────────────────────────────────────────────────────────────────────

/// Serve updates until `shutdown` is cancelled or the dispatcher stops.
pub async fn run(config: &Config, gateway: IdeaGateway, shutdown: CancellationToken) -> Result<(), AppError> {
    let bot = Bot::new(config.telegram.bot_token.clone());
    let app: App = Arc::new(IdeaBot::new(TelegramTransport::new(bot.clone()), gateway));

    if let Err(e) = bot.set_my_commands(Command::bot_commands()).await {
        warn!(error = %e, "failed to register bot commands");
    }

    let handler = dptree::entry()
        .branch(Update::filter_message().filter_command::<Command>().endpoint(on_command))
        .branch(Update::filter_callback_query().endpoint(on_callback));

    let mut dispatcher = Dispatcher::builder(bot.clone(), handler)
        .dependencies(dptree::deps![app])
        .default_handler(|upd| async move {
            debug!(update_id = ?upd.id, "unhandled update");
        })
        .error_handler(LoggingErrorHandler::with_custom_text("error in telegram handler"))
        .build();

    match &config.telegram.webhook {
        None => {
            info!(bot = %config.bot_name, "telegram polling started");
            tokio::select! {
                biased;

                _ = shutdown.cancelled() => {
                    info!("shutdown signal received, closing telegram polling");
                }
                _ = dispatcher.dispatch() => {
                    warn!("telegram dispatcher exited unexpectedly");
                }
            }
        }
        #[cfg(feature = "webhook")]
        Some(webhook) => {
            use teloxide::update_listeners::webhooks;

            let url = webhook
                .public_url(&config.telegram.bot_token)
                .parse::<reqwest::Url>()
                .map_err(|e| AppError::Config(format!("invalid WEBHOOK_URL: {e}")))?;
            let listener = webhooks::axum(bot, webhooks::Options::new(webhook.socket_addr(), url))
                .await
                .map_err(|e| AppError::Comms(format!("failed to set webhook: {e}")))?;

            // The URL embeds the bot token; log only the base.
            info!(base_url = %webhook.base_url, addr = %webhook.socket_addr(), "telegram webhook started");
            tokio::select! {
                biased;

                _ = shutdown.cancelled() => {
                    info!("shutdown signal received, closing telegram webhook");
                }
                _ = dispatcher.dispatch_with_listener(
                    listener,
                    LoggingErrorHandler::with_custom_text("error from the webhook listener"),
                ) => {
                    warn!("telegram dispatcher exited unexpectedly");
                }
            }
        }
        #[cfg(not(feature = "webhook"))]
        Some(_) => {
            return Err(AppError::Config(
                "WEBHOOK_URL is set but this build has no webhook support".into(),
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bot::keyboards;

    #[test]
    fn keyboard_conversion_keeps_layout() {
        let markup = inline_keyboard(&keyboards::categories());
        assert_eq!(markup.inline_keyboard.len(), 7);
        assert_eq!(markup.inline_keyboard[0].len(), 2);
        assert_eq!(markup.inline_keyboard[0][0].text, "🚀 Technology & Software");
    }

    #[test]
    fn parse_entities_error_is_unparseable_markup() {
        let err = RequestError::Api(ApiError::CantParseEntities("Bad Request: can't parse entities".into()));
        assert!(matches!(transport_error(err), TransportError::UnparseableMarkup(_)));

        let err = RequestError::Api(ApiError::MessageNotModified);
        assert!(matches!(transport_error(err), TransportError::Other(_)));
    }
}
