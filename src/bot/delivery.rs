//! Send or edit a formatted message, falling back to plain text once when
//! the platform refuses the markup.

use tracing::warn;

use super::keyboards::Keyboard;
use super::transport::{ChatTransport, MessageRef, OutgoingMessage, TransportError};
use crate::markup::FormattedText;

/// Where a reply goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    New(i64),
    Edit(MessageRef),
}

impl Target {
    pub fn chat_id(&self) -> i64 {
        match self {
            Target::New(chat_id) => *chat_id,
            Target::Edit(r) => r.chat_id,
        }
    }
}

/// How the message was finally delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Formatted,
    PlainFallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delivered {
    /// The sent message, or the edited one.
    pub message: MessageRef,
    pub via: Delivery,
}

async fn put<T: ChatTransport>(
    transport: &T,
    target: Target,
    message: &OutgoingMessage,
) -> Result<MessageRef, TransportError> {
    match target {
        Target::New(chat_id) => transport.send_message(chat_id, message).await,
        Target::Edit(r) => transport.edit_message(r, message).await.map(|()| r),
    }
}

/// Deliver `text` as MarkdownV2. On a markup rejection, retry exactly once
/// with the plain rendering and the same keyboard. Any other error, or a
/// failed retry, is returned to the caller.
pub async fn deliver<T: ChatTransport>(
    transport: &T,
    target: Target,
    text: &FormattedText,
    keyboard: Option<Keyboard>,
) -> Result<Delivered, TransportError> {
    let formatted = OutgoingMessage::markdown(text.markdown.clone(), keyboard);
    let first = put(transport, target, &formatted).await;
    match first {
        Ok(message) => Ok(Delivered { message, via: Delivery::Formatted }),
        Err(TransportError::UnparseableMarkup(detail)) => {
            warn!(chat_id = target.chat_id(), %detail, "markup rejected, sending as plain text");
            let plain = OutgoingMessage::plain(text.plain.clone(), formatted.keyboard);
            let message = put(transport, target, &plain).await?;
            Ok(Delivered { message, via: Delivery::PlainFallback })
        }
        Err(e) => Err(e),
    }
}
