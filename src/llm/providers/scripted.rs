//! Scripted provider: returns queued replies in order and records every
//! prompt it receives. Used by tests to drive the bot without a network.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::llm::ProviderError;

#[derive(Debug, Default)]
struct Script {
    replies: VecDeque<Result<String, String>>,
    prompts: Vec<String>,
}

/// Clones share the same script, so a test can keep a handle after the
/// provider has been moved into the gateway.
#[derive(Debug, Clone, Default)]
pub struct ScriptedProvider {
    script: Arc<Mutex<Script>>,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful completion.
    pub fn push_ok(&self, text: impl Into<String>) {
        self.lock().replies.push_back(Ok(text.into()));
    }

    /// Queue a failed completion with the given message.
    pub fn push_err(&self, message: impl Into<String>) {
        self.lock().replies.push_back(Err(message.into()));
    }

    /// Every prompt seen so far, oldest first.
    pub fn prompts(&self) -> Vec<String> {
        self.lock().prompts.clone()
    }

    pub async fn complete(&self, content: &str) -> Result<String, ProviderError> {
        let mut script = self.lock();
        script.prompts.push(content.to_string());
        match script.replies.pop_front() {
            Some(Ok(text)) => Ok(text),
            Some(Err(message)) => Err(ProviderError::Request(message)),
            None => Err(ProviderError::Request("scripted provider has no more replies".into())),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Script> {
        // A panicking test thread must not hide the script from the others.
        self.script.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn replies_in_order_then_errors() {
        let p = ScriptedProvider::new();
        p.push_ok("first");
        p.push_err("boom");

        assert_eq!(p.complete("a").await.unwrap(), "first");
        assert!(p.complete("b").await.unwrap_err().to_string().contains("boom"));
        assert!(p.complete("c").await.is_err());
        assert_eq!(p.prompts(), vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn clones_share_script() {
        let p = ScriptedProvider::new();
        let handle = p.clone();
        handle.push_ok("shared");
        assert_eq!(p.complete("x").await.unwrap(), "shared");
        assert_eq!(handle.prompts(), vec!["x"]);
    }
}
