//! tracing-subscriber setup.
//!
//! [`init`] is called once from `main`, after the config and CLI flags have
//! decided the effective level.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::error::AppError;

/// HTTP and TLS internals stay at `warn` when only a bare level is given.
const NOISY_TARGETS: [&str; 4] = ["hyper", "hyper_util", "reqwest", "rustls"];

/// Install the global subscriber, writing to stderr.
///
/// `level` is a bare level (`"info"`) or a full `EnvFilter` directive such as
/// `"idea_bot=debug,teloxide=warn"`. With `prefer_level`, `level` wins over
/// `RUST_LOG`; otherwise `RUST_LOG` wins and `level` is the fallback.
pub fn init(level: &str, prefer_level: bool) -> Result<(), AppError> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = build_filter(level, prefer_level, rust_log.as_deref())?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| AppError::Logger(format!("failed to set subscriber: {e}")))
}

fn directive(level: &str) -> String {
    if level.contains('=') {
        return level.to_string();
    }
    NOISY_TARGETS
        .iter()
        .fold(level.to_string(), |acc, target| format!("{acc},{target}=warn"))
}

fn build_filter(level: &str, prefer_level: bool, rust_log: Option<&str>) -> Result<EnvFilter, AppError> {
    let configured = EnvFilter::try_new(directive(level));
    let env = rust_log.map(EnvFilter::try_new);

    match (prefer_level, configured, env) {
        (true, Ok(filter), _) => Ok(filter),
        (true, Err(_), Some(Ok(filter))) => Ok(filter),
        (false, _, Some(Ok(filter))) => Ok(filter),
        (false, Ok(filter), _) => Ok(filter),
        (_, Err(e), _) => Err(AppError::Logger(format!("invalid log level '{level}': {e}"))),
    }
}

/// Validate a bare level string such as `"debug"`.
pub fn parse_level(level: &str) -> Result<LevelFilter, AppError> {
    if level.is_empty() {
        return Err(AppError::Logger("log level must not be empty".into()));
    }
    level
        .parse::<LevelFilter>()
        .map_err(|_| AppError::Logger(format!("unrecognised log level: '{level}'")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_levels_parse() {
        for l in ["error", "warn", "info", "debug", "trace", "off"] {
            assert!(parse_level(l).is_ok(), "{l}");
        }
        assert!(parse_level("loud").is_err());
        assert!(parse_level("").is_err());
    }

    #[test]
    fn bare_level_quiets_http_internals() {
        let d = directive("debug");
        assert!(d.starts_with("debug,"));
        assert!(d.contains("reqwest=warn"));
        assert_eq!(directive("idea_bot=trace"), "idea_bot=trace");
    }

    #[test]
    fn rust_log_wins_unless_level_is_preferred() {
        let f = build_filter("info", false, Some("teloxide=trace")).unwrap();
        assert!(f.to_string().contains("teloxide=trace"));

        let f = build_filter("info", true, Some("teloxide=trace")).unwrap();
        assert!(!f.to_string().contains("teloxide=trace"));
    }

    #[test]
    fn falls_back_when_one_side_is_invalid() {
        let f = build_filter("info", false, Some("foo=loud")).unwrap();
        assert!(f.to_string().contains("reqwest=warn"));

        let f = build_filter("foo=loud", true, Some("warn")).unwrap();
        assert!(!f.to_string().contains("reqwest"));

        assert!(build_filter("foo=loud", true, None).is_err());
    }

    #[test]
    fn init_succeeds_or_is_already_installed() {
        match init("info", false) {
            Ok(()) => {}
            Err(AppError::Logger(msg)) if msg.contains("set subscriber") => {}
            Err(e) => panic!("unexpected error: {e}"),
        }
    }
}
