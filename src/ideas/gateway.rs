//! Completion gateway: one category in, one renderable reply out.
//!
//! Provider failures never reach the caller. They are logged and replaced by
//! a fixed error card so the chat loop always has something to show.

use tracing::{debug, error, info};

use crate::ideas::categories::Category;
use crate::ideas::prompt;
use crate::llm::LlmProvider;
use crate::markup::{self, FormattedText, MessageBuilder};

/// Completions longer than this are cut to stay under Telegram's 4096
/// character limit once escaped.
const MAX_COMPLETION_CHARS: usize = 3500;

/// Provider error text shown in the error card. HTTP error bodies can be
/// whole HTML pages.
const MAX_ERROR_DETAIL_CHARS: usize = 500;

/// Outcome of one generation request. Both variants are ready to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdeaReply {
    Generated(FormattedText),
    Failed(FormattedText),
}

impl IdeaReply {
    pub fn text(&self) -> &FormattedText {
        match self {
            IdeaReply::Generated(t) | IdeaReply::Failed(t) => t,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, IdeaReply::Failed(_))
    }
}

#[derive(Debug, Clone)]
pub struct IdeaGateway {
    provider: LlmProvider,
}

impl IdeaGateway {
    pub fn new(provider: LlmProvider) -> Self {
        Self { provider }
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// Ask the provider for an idea in `category`.
    pub async fn generate(&self, category: &Category) -> IdeaReply {
        let prompt = prompt::build(category.label);
        debug!(category = category.key, provider = self.provider.name(), "requesting idea");

        match self.provider.complete(&prompt).await {
            Ok(text) => {
                info!(category = category.key, len = text.len(), "idea generated");
                IdeaReply::Generated(markup::render_model_text(&truncate(&text, MAX_COMPLETION_CHARS)))
            }
            Err(e) => {
                error!(category = category.key, provider = self.provider.name(), error = %e, "idea generation failed");
                IdeaReply::Failed(error_card(category.label, &e.to_string()))
            }
        }
    }
}

/// The fixed failure template. `category_label` and `detail` are escaped,
/// and `detail` is cut to [`MAX_ERROR_DETAIL_CHARS`].
pub fn error_card(category_label: &str, detail: &str) -> FormattedText {
    let detail = truncate(detail, MAX_ERROR_DETAIL_CHARS);
    MessageBuilder::new()
        .bold("❌ Error Generating Idea")
        .blank()
        .blank()
        .text("Sorry, I encountered an error while generating a business idea for ")
        .bold(category_label)
        .line(".")
        .blank()
        .line("Please try again later or contact support if the issue persists.")
        .blank()
        .bold("Error Details:")
        .text(" ")
        .code(detail)
        .finish()
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}…", &text[..cut]),
        None => text.to_string(),
    }
}
