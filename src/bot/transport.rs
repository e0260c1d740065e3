//! The outbound surface the handlers talk to.
//!
//! `ChatTransport` is the only seam between the bot logic and Telegram.
//! Production uses `telegram::TelegramTransport`; tests record calls.

use std::future::Future;

use thiserror::Error;

use super::keyboards::Keyboard;

/// Where a message lives: chat plus message id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageRef {
    pub chat_id: i64,
    pub message_id: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextFormat {
    MarkdownV2,
    Plain,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMessage {
    pub text: String,
    pub format: TextFormat,
    pub keyboard: Option<Keyboard>,
}

impl OutgoingMessage {
    pub fn markdown(text: impl Into<String>, keyboard: Option<Keyboard>) -> Self {
        Self { text: text.into(), format: TextFormat::MarkdownV2, keyboard }
    }

    pub fn plain(text: impl Into<String>, keyboard: Option<Keyboard>) -> Self {
        Self { text: text.into(), format: TextFormat::Plain, keyboard }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    /// The platform refused the message markup.
    #[error("unparseable markup: {0}")]
    UnparseableMarkup(String),
    #[error("transport error: {0}")]
    Other(String),
}

/// Outbound operations on a chat platform.
pub trait ChatTransport: Send + Sync {
    fn send_message(
        &self,
        chat_id: i64,
        message: &OutgoingMessage,
    ) -> impl Future<Output = Result<MessageRef, TransportError>> + Send;

    /// Replace the text (and keyboard) of an existing message.
    fn edit_message(
        &self,
        target: MessageRef,
        message: &OutgoingMessage,
    ) -> impl Future<Output = Result<(), TransportError>> + Send;

    fn delete_message(&self, target: MessageRef) -> impl Future<Output = Result<(), TransportError>> + Send;

    /// Acknowledge an inline button press so the client stops its spinner.
    fn answer_callback(&self, callback_id: &str) -> impl Future<Output = Result<(), TransportError>> + Send;
}
