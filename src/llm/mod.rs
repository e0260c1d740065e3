//! Completion provider abstraction.
//!
//! `LlmProvider` is an enum over concrete provider implementations.
//! Add a new variant + module in `providers/` for each additional backend.
//!
//! Provider instances are shared immutable capabilities; clone them freely.
//! The `complete` method is `async fn` on the enum so callers need no
//! trait-object machinery.

pub mod providers;

use thiserror::Error;

// ── Error ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("unknown provider: {0}")]
    UnknownProvider(String),
    #[error("provider not configured: {0}")]
    NotConfigured(String),
    #[error("provider request failed: {0}")]
    Request(String),
}

// ── Provider enum ─────────────────────────────────────────────────────────────

/// All available provider backends.
///
/// Adding a backend = new module + new variant + new `complete` arm.
#[derive(Debug, Clone)]
pub enum LlmProvider {
    Dummy(providers::dummy::DummyProvider),
    Gemini(providers::gemini::GeminiProvider),
    OpenAiCompatible(providers::openai_compatible::OpenAiCompatibleProvider),
    Scripted(providers::scripted::ScriptedProvider),
}

impl LlmProvider {
    /// Send `content` as a single prompt and return the text reply.
    pub async fn complete(&self, content: &str) -> Result<String, ProviderError> {
        match self {
            LlmProvider::Dummy(p) => p.complete(content).await,
            LlmProvider::Gemini(p) => p.complete(content).await,
            LlmProvider::OpenAiCompatible(p) => p.complete(content).await,
            LlmProvider::Scripted(p) => p.complete(content).await,
        }
    }

    /// Short backend name for log fields.
    pub fn name(&self) -> &'static str {
        match self {
            LlmProvider::Dummy(_) => "dummy",
            LlmProvider::Gemini(_) => "gemini",
            LlmProvider::OpenAiCompatible(_) => "openai",
            LlmProvider::Scripted(_) => "scripted",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn dispatches_to_dummy() {
        let p = LlmProvider::Dummy(providers::dummy::DummyProvider);
        let out = p.complete("an idea for the 'Testing' category").await.unwrap();
        assert!(out.contains("Demo Venture"));
        assert!(out.contains("placeholder idea for Testing."));
        assert_eq!(p.name(), "dummy");
    }

    #[tokio::test]
    async fn dispatches_to_scripted() {
        let scripted = providers::scripted::ScriptedProvider::new();
        scripted.push_err("quota exceeded");
        let p = LlmProvider::Scripted(scripted);
        let err = p.complete("hi").await.unwrap_err();
        assert!(err.to_string().contains("quota exceeded"));
    }
}
