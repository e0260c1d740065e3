//! Shared fixtures: a transport that records every call and a bot wired to
//! the scripted provider.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};

use idea_bot::bot::{CallbackEvent, ChatTransport, IdeaBot, MessageRef, OutgoingMessage, TextFormat, TransportError};
use idea_bot::ideas::IdeaGateway;
use idea_bot::llm::LlmProvider;
use idea_bot::llm::providers::scripted::ScriptedProvider;

pub const CHAT: i64 = 4242;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Send { chat_id: i64, message: OutgoingMessage },
    Edit { target: MessageRef, message: OutgoingMessage },
    Delete(MessageRef),
    Answer(String),
}

impl Call {
    pub fn message(&self) -> Option<&OutgoingMessage> {
        match self {
            Call::Send { message, .. } | Call::Edit { message, .. } => Some(message),
            _ => None,
        }
    }
}

/// One recorded call and whether it succeeded.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub call: Call,
    pub ok: bool,
}

#[derive(Default)]
pub struct RecordingTransport {
    calls: Mutex<Vec<Recorded>>,
    /// Outcomes for upcoming send/edit calls, in order. Empty means success.
    outcomes: Mutex<VecDeque<Result<(), TransportError>>>,
    /// MarkdownV2 messages containing this text are rejected as unparseable.
    reject_markdown_containing: Mutex<Option<String>>,
    fail_delete: AtomicBool,
    next_id: AtomicI32,
}

impl RecordingTransport {
    pub fn push_outcome(&self, outcome: Result<(), TransportError>) {
        self.outcomes.lock().unwrap().push_back(outcome);
    }

    pub fn reject_markdown_containing(&self, needle: &str) {
        *self.reject_markdown_containing.lock().unwrap() = Some(needle.to_string());
    }

    pub fn fail_deletes(&self) {
        self.fail_delete.store(true, Ordering::SeqCst);
    }

    pub fn recorded(&self) -> Vec<Recorded> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.recorded().into_iter().map(|r| r.call).collect()
    }

    /// Calls that reached the user.
    pub fn visible(&self) -> Vec<Call> {
        self.recorded().into_iter().filter(|r| r.ok).map(|r| r.call).collect()
    }

    fn outcome_for(&self, message: &OutgoingMessage) -> Result<(), TransportError> {
        if let Some(scripted) = self.outcomes.lock().unwrap().pop_front() {
            return scripted;
        }
        let needle = self.reject_markdown_containing.lock().unwrap().clone();
        match needle {
            Some(n) if message.format == TextFormat::MarkdownV2 && message.text.contains(&n) => {
                Err(TransportError::UnparseableMarkup("can't parse entities: character '!' is reserved".into()))
            }
            _ => Ok(()),
        }
    }

    fn record(&self, call: Call, ok: bool) {
        self.calls.lock().unwrap().push(Recorded { call, ok });
    }
}

impl ChatTransport for RecordingTransport {
    async fn send_message(&self, chat_id: i64, message: &OutgoingMessage) -> Result<MessageRef, TransportError> {
        let outcome = self.outcome_for(message);
        self.record(Call::Send { chat_id, message: message.clone() }, outcome.is_ok());
        outcome?;
        let message_id = 100 + self.next_id.fetch_add(1, Ordering::SeqCst);
        Ok(MessageRef { chat_id, message_id })
    }

    async fn edit_message(&self, target: MessageRef, message: &OutgoingMessage) -> Result<(), TransportError> {
        let outcome = self.outcome_for(message);
        self.record(Call::Edit { target, message: message.clone() }, outcome.is_ok());
        outcome
    }

    async fn delete_message(&self, target: MessageRef) -> Result<(), TransportError> {
        let fail = self.fail_delete.load(Ordering::SeqCst);
        self.record(Call::Delete(target), !fail);
        if fail {
            Err(TransportError::Other("message to delete not found".into()))
        } else {
            Ok(())
        }
    }

    async fn answer_callback(&self, callback_id: &str) -> Result<(), TransportError> {
        self.record(Call::Answer(callback_id.to_string()), true);
        Ok(())
    }
}

pub fn bot() -> (IdeaBot<RecordingTransport>, ScriptedProvider) {
    let scripted = ScriptedProvider::new();
    let gateway = IdeaGateway::new(LlmProvider::Scripted(scripted.clone()));
    (IdeaBot::new(RecordingTransport::default(), gateway), scripted)
}

/// The message the inline buttons were pressed on.
pub fn menu_message() -> MessageRef {
    MessageRef { chat_id: CHAT, message_id: 7 }
}

pub fn press(data: &str) -> CallbackEvent {
    CallbackEvent { id: "cb-1".to_string(), data: data.to_string(), message: Some(menu_message()) }
}
