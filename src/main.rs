//! Idea Bot entry point.
//!
//! Startup sequence:
//!   1. Load .env (if present)
//!   2. Load config (missing secrets are fatal)
//!   3. Resolve effective log level (CLI `-v` flags > env > config)
//!   4. Init logger once
//!   5. Build the completion provider
//!   6. Spawn Ctrl-C → shutdown signal watcher
//!   7. Serve Telegram updates until shutdown

use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use idea_bot::bot::telegram;
use idea_bot::error::AppError;
use idea_bot::ideas::IdeaGateway;
use idea_bot::llm::providers;
use idea_bot::{config, logger};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), AppError> {
    // Load .env if present; the file is optional.
    let _ = dotenvy::dotenv();

    let args = parse_cli_args();
    let config_path = args.config_path.or_else(|| std::env::var("IDEA_BOT_CONFIG").ok());

    let config = config::load(config_path.as_deref())?;

    let effective_log_level = args.log_level.unwrap_or(config.log_level.as_str());
    let force_cli_level = args.log_level.is_some();

    logger::init(effective_log_level, force_cli_level)?;

    let mode = if config.telegram.webhook.is_some() { "webhook" } else { "polling" };
    info!(
        bot_name = %config.bot_name,
        configured_log_level = %config.log_level,
        effective_log_level = %effective_log_level,
        provider = %config.llm.provider,
        mode,
        "config loaded"
    );

    let provider = providers::build(&config.llm, config.llm_api_key.clone()).map_err(|e| {
        error!(error = %e, "completion provider unavailable");
        AppError::from(e)
    })?;
    info!(provider = provider.name(), "completion provider ready");

    let gateway = IdeaGateway::new(provider);

    // Ctrl-C cancels the token; the update loop watches it.
    let shutdown = CancellationToken::new();
    let ctrlc_token = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("ctrl-c received, initiating shutdown");
            ctrlc_token.cancel();
        }
    });

    telegram::run(&config, gateway, shutdown).await?;

    info!("shutdown complete");
    Ok(())
}

struct CliArgs {
    log_level: Option<&'static str>,
    config_path: Option<String>,
}

fn parse_cli_args() -> CliArgs {
    let mut verbosity = 0u8;
    let mut config_path = None;

    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        if arg == "--" {
            break;
        }

        match arg.as_str() {
            "-h" | "--help" => {
                println!("Usage: idea-bot [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -h, --help                 Print help");
                println!("  -f, --config <PATH>        Path to configuration file (default: config/default.toml)");
                println!("  -v, -vv, -vvv, -vvvv       Set logging verbosity (warn, info, debug, trace)");
                println!();
                println!("Environment:");
                println!("  TELEGRAM_BOT_TOKEN         Bot API token (required)");
                println!("  GEMINI_API_KEY             Gemini key (required for the gemini provider)");
                println!("  LLM_API_KEY                Bearer key for the openai provider");
                println!("  WEBHOOK_URL, PORT          Serve a webhook instead of long polling");
                std::process::exit(0);
            }
            "-f" | "--config" => {
                if let Some(path) = iter.next() {
                    config_path = Some(path);
                } else {
                    eprintln!("error: -f/--config requires a path argument");
                    std::process::exit(1);
                }
            }
            "--verbose" => verbosity = verbosity.saturating_add(1),
            a if a.starts_with('-') && a.len() > 1 && a.chars().skip(1).all(|c| c == 'v') => {
                verbosity = verbosity.saturating_add((a.len() - 1) as u8);
            }
            _ => {}
        }
    }

    let log_level = match verbosity {
        0 => None,
        1 => Some("warn"),
        2 => Some("info"),
        3 => Some("debug"),
        _ => Some("trace"),
    };

    CliArgs { log_level, config_path }
}
