//! Configuration loading with env-var overrides.
//!
//! Reads `config/default.toml` (or an explicit path) relative to the current
//! working directory, then layers the environment on top. Secrets are only
//! ever read from the environment:
//!
//! | Variable             | Meaning                                          |
//! |----------------------|--------------------------------------------------|
//! | `TELEGRAM_BOT_TOKEN` | Bot API token, always required                   |
//! | `GEMINI_API_KEY`     | Required when `[llm] default = "gemini"`         |
//! | `LLM_API_KEY`        | Bearer key for `"openai"`, optional for local    |
//! | `WEBHOOK_URL`        | Public base URL; switches to webhook delivery    |
//! | `PORT`               | Webhook listen port (default 8443)               |
//! | `IDEA_BOT_LOG_LEVEL` | Overrides `[bot] log_level`                      |

use std::env;
use std::fs;
use std::net::{IpAddr, SocketAddr};
use std::path::Path;

use serde::Deserialize;

use crate::error::AppError;

const DEFAULT_CONFIG_PATH: &str = "config/default.toml";
const DEFAULT_WEBHOOK_PORT: u16 = 8443;

/// Webhook (push) delivery settings. Present only when `WEBHOOK_URL` is set.
#[derive(Debug, Clone, PartialEq)]
pub struct WebhookConfig {
    /// Public base URL without a trailing slash.
    pub base_url: String,
    pub listen_addr: IpAddr,
    pub port: u16,
}

impl WebhookConfig {
    /// Full URL registered with Telegram: `<base_url>/<token>`.
    pub fn public_url(&self, bot_token: &str) -> String {
        format!("{}/{}", self.base_url, bot_token)
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.listen_addr, self.port)
    }
}

/// Telegram transport configuration.
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
    /// `None` means long polling.
    pub webhook: Option<WebhookConfig>,
}

/// Gemini `generateContent` provider configuration (`[llm.gemini]`).
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API root, e.g. `https://generativelanguage.googleapis.com/v1beta`.
    pub api_base_url: String,
    pub model: String,
    pub temperature: f32,
    /// Per-request HTTP timeout in seconds.
    pub timeout_seconds: u64,
}

/// OpenAI / OpenAI-compatible provider configuration (`[llm.openai]`).
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// Full chat completions endpoint URL.
    pub api_base_url: String,
    pub model: String,
    pub temperature: f32,
    pub timeout_seconds: u64,
}

/// Completion-service configuration.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Which provider is active: `"gemini"`, `"openai"` or `"dummy"`.
    pub provider: String,
    pub gemini: GeminiConfig,
    pub openai: OpenAiConfig,
}

/// Fully-resolved bot configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub bot_name: String,
    pub log_level: String,
    pub telegram: TelegramConfig,
    pub llm: LlmConfig,
    /// Key for the active provider. Never sourced from TOML.
    pub llm_api_key: Option<String>,
}

/// Values read from the process environment. Kept separate from the
/// process so tests can resolve configs without mutating global state.
#[derive(Debug, Clone, Default)]
pub struct EnvOverrides {
    pub telegram_bot_token: Option<String>,
    pub gemini_api_key: Option<String>,
    pub llm_api_key: Option<String>,
    pub webhook_url: Option<String>,
    pub port: Option<String>,
    pub log_level: Option<String>,
}

impl EnvOverrides {
    pub fn from_env() -> Self {
        Self {
            telegram_bot_token: non_empty_var("TELEGRAM_BOT_TOKEN"),
            gemini_api_key: non_empty_var("GEMINI_API_KEY"),
            llm_api_key: non_empty_var("LLM_API_KEY"),
            webhook_url: non_empty_var("WEBHOOK_URL"),
            port: non_empty_var("PORT"),
            log_level: non_empty_var("IDEA_BOT_LOG_LEVEL"),
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Raw TOML shape: the `serde` target before resolution.
#[derive(Deserialize, Default)]
struct RawConfig {
    #[serde(default)]
    bot: RawBot,
    #[serde(default)]
    telegram: RawTelegram,
    #[serde(default)]
    llm: RawLlm,
}

#[derive(Deserialize)]
struct RawBot {
    #[serde(default = "default_bot_name")]
    name: String,
    #[serde(default = "default_log_level")]
    log_level: String,
}

impl Default for RawBot {
    fn default() -> Self {
        Self { name: default_bot_name(), log_level: default_log_level() }
    }
}

#[derive(Deserialize)]
struct RawTelegram {
    /// Interface the webhook listener binds to.
    #[serde(default = "default_listen_addr")]
    listen_addr: String,
    /// Used when `PORT` is not set.
    #[serde(default = "default_webhook_port")]
    webhook_port: u16,
}

impl Default for RawTelegram {
    fn default() -> Self {
        Self { listen_addr: default_listen_addr(), webhook_port: default_webhook_port() }
    }
}

#[derive(Deserialize)]
struct RawLlm {
    /// Maps to `default = "..."` in `[llm]`.
    #[serde(rename = "default", default = "default_llm_provider")]
    provider: String,
    #[serde(default)]
    gemini: RawGemini,
    #[serde(default)]
    openai: RawOpenAi,
}

impl Default for RawLlm {
    fn default() -> Self {
        Self {
            provider: default_llm_provider(),
            gemini: RawGemini::default(),
            openai: RawOpenAi::default(),
        }
    }
}

#[derive(Deserialize)]
struct RawGemini {
    #[serde(default = "default_gemini_api_base_url")]
    api_base_url: String,
    #[serde(default = "default_gemini_model")]
    model: String,
    #[serde(default = "default_temperature")]
    temperature: f32,
    #[serde(default = "default_timeout_seconds")]
    timeout_seconds: u64,
}

impl Default for RawGemini {
    fn default() -> Self {
        Self {
            api_base_url: default_gemini_api_base_url(),
            model: default_gemini_model(),
            temperature: default_temperature(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

#[derive(Deserialize)]
struct RawOpenAi {
    #[serde(default = "default_openai_api_base_url")]
    api_base_url: String,
    #[serde(default = "default_openai_model")]
    model: String,
    #[serde(default = "default_temperature")]
    temperature: f32,
    #[serde(default = "default_timeout_seconds")]
    timeout_seconds: u64,
}

impl Default for RawOpenAi {
    fn default() -> Self {
        Self {
            api_base_url: default_openai_api_base_url(),
            model: default_openai_model(),
            temperature: default_temperature(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

fn default_bot_name() -> String {
    "idea-bot".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_listen_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_webhook_port() -> u16 {
    DEFAULT_WEBHOOK_PORT
}

fn default_llm_provider() -> String {
    "gemini".to_string()
}

fn default_gemini_api_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_gemini_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_openai_api_base_url() -> String {
    "https://api.openai.com/v1/chat/completions".to_string()
}

fn default_openai_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_temperature() -> f32 {
    0.9
}

fn default_timeout_seconds() -> u64 {
    60
}

/// Load config from `config_path`, or `config/default.toml` when present,
/// then apply the process environment.
pub fn load(config_path: Option<&str>) -> Result<Config, AppError> {
    let env = EnvOverrides::from_env();

    if let Some(path) = config_path {
        return load_from(Some(Path::new(path)), &env);
    }

    let default_path = Path::new(DEFAULT_CONFIG_PATH);
    if default_path.exists() {
        load_from(Some(default_path), &env)
    } else {
        load_from(None, &env)
    }
}

/// Resolve a config from an optional TOML file and explicit env values.
///
/// `path = None` uses the built-in defaults. A missing Telegram token, or a
/// missing key for a provider that needs one, is an error: the bot must not
/// start half-configured.
pub fn load_from(path: Option<&Path>, env: &EnvOverrides) -> Result<Config, AppError> {
    let raw = match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .map_err(|e| AppError::Config(format!("cannot read {}: {e}", path.display())))?;
            toml::from_str::<RawConfig>(&text)
                .map_err(|e| AppError::Config(format!("parse error in {}: {e}", path.display())))?
        }
        None => RawConfig::default(),
    };

    let bot_token = env
        .telegram_bot_token
        .clone()
        .ok_or_else(|| AppError::Config("TELEGRAM_BOT_TOKEN is not set; the bot cannot start".into()))?;

    let llm_api_key = match raw.llm.provider.as_str() {
        "gemini" => Some(env.gemini_api_key.clone().ok_or_else(|| {
            AppError::Config("GEMINI_API_KEY is not set; the bot cannot start".into())
        })?),
        "openai" | "openai-compatible" => env.llm_api_key.clone(),
        _ => None,
    };

    let webhook = match &env.webhook_url {
        Some(url) => {
            let port = match &env.port {
                Some(p) => p
                    .parse::<u16>()
                    .map_err(|e| AppError::Config(format!("invalid PORT '{p}': {e}")))?,
                None => raw.telegram.webhook_port,
            };
            let listen_addr = raw.telegram.listen_addr.parse::<IpAddr>().map_err(|e| {
                AppError::Config(format!(
                    "invalid telegram.listen_addr '{}': {e}",
                    raw.telegram.listen_addr
                ))
            })?;
            Some(WebhookConfig {
                base_url: url.trim_end_matches('/').to_string(),
                listen_addr,
                port,
            })
        }
        None => None,
    };

    let log_level = env.log_level.clone().unwrap_or(raw.bot.log_level);
    // Full filter directives are checked by the logger itself.
    if !log_level.contains(['=', ',']) {
        crate::logger::parse_level(&log_level).map_err(|e| AppError::Config(e.to_string()))?;
    }

    Ok(Config {
        bot_name: raw.bot.name,
        log_level,
        telegram: TelegramConfig { bot_token, webhook },
        llm: LlmConfig {
            provider: raw.llm.provider,
            gemini: GeminiConfig {
                api_base_url: raw.llm.gemini.api_base_url,
                model: raw.llm.gemini.model,
                temperature: raw.llm.gemini.temperature,
                timeout_seconds: raw.llm.gemini.timeout_seconds,
            },
            openai: OpenAiConfig {
                api_base_url: raw.llm.openai.api_base_url,
                model: raw.llm.openai.model,
                temperature: raw.llm.openai.temperature,
                timeout_seconds: raw.llm.openai.timeout_seconds,
            },
        },
        llm_api_key,
    })
}
