//! Completion provider implementations.
//!
//! `build(config, api_key)` is the factory, called once at startup.
//! Adding a new backend = new module + new match arm.

pub mod dummy;
pub mod gemini;
pub mod openai_compatible;
pub mod scripted;

use crate::config::LlmConfig;
use crate::llm::{LlmProvider, ProviderError};

/// Construct a `LlmProvider` from config and the resolved API key.
///
/// `api_key` comes from the environment (never TOML). `gemini` refuses to
/// build without one; `openai` treats it as optional for keyless local
/// servers.
pub fn build(config: &LlmConfig, api_key: Option<String>) -> Result<LlmProvider, ProviderError> {
    match config.provider.as_str() {
        "dummy" => Ok(LlmProvider::Dummy(dummy::DummyProvider)),
        "gemini" => {
            let g = &config.gemini;
            let key = api_key.ok_or_else(|| ProviderError::NotConfigured("gemini requires an API key".into()))?;
            let p = gemini::GeminiProvider::new(
                g.api_base_url.clone(),
                g.model.clone(),
                g.temperature,
                g.timeout_seconds,
                key,
            )?;
            Ok(LlmProvider::Gemini(p))
        }
        "openai" | "openai-compatible" => {
            let oai = &config.openai;
            let p = openai_compatible::OpenAiCompatibleProvider::new(
                oai.api_base_url.clone(),
                oai.model.clone(),
                oai.temperature,
                oai.timeout_seconds,
                api_key,
            )?;
            Ok(LlmProvider::OpenAiCompatible(p))
        }
        _ => Err(ProviderError::UnknownProvider(config.provider.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GeminiConfig, OpenAiConfig};

    fn llm_config(provider: &str) -> LlmConfig {
        LlmConfig {
            provider: provider.into(),
            gemini: GeminiConfig {
                api_base_url: "http://localhost:0/v1beta".into(),
                model: "gemini-test".into(),
                temperature: 0.0,
                timeout_seconds: 1,
            },
            openai: OpenAiConfig {
                api_base_url: "http://localhost:0/v1/chat/completions".into(),
                model: "test-model".into(),
                temperature: 0.0,
                timeout_seconds: 1,
            },
        }
    }

    #[test]
    fn builds_dummy() {
        let p = build(&llm_config("dummy"), None).unwrap();
        assert!(matches!(p, LlmProvider::Dummy(_)));
    }

    #[test]
    fn builds_gemini_with_key() {
        let p = build(&llm_config("gemini"), Some("k".into())).unwrap();
        assert!(matches!(p, LlmProvider::Gemini(_)));
    }

    #[test]
    fn gemini_without_key_is_not_configured() {
        let err = build(&llm_config("gemini"), None).unwrap_err();
        assert!(matches!(err, ProviderError::NotConfigured(_)));
    }

    #[test]
    fn builds_openai_without_key() {
        let p = build(&llm_config("openai"), None).unwrap();
        assert!(matches!(p, LlmProvider::OpenAiCompatible(_)));
    }

    #[test]
    fn unknown_provider_errors() {
        let err = build(&llm_config("palm"), None).unwrap_err();
        assert!(matches!(err, ProviderError::UnknownProvider(ref name) if name == "palm"));
    }
}
