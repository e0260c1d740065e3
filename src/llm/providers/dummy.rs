//! Dummy provider: answers every prompt with a canned idea card.
//! Lets the bot run end to end locally without an API key.

use crate::llm::ProviderError;

#[derive(Debug, Clone)]
pub struct DummyProvider;

impl DummyProvider {
    /// The card names the category quoted in the prompt (`'…' category`),
    /// or "General" when there is none.
    pub async fn complete(&self, content: &str) -> Result<String, ProviderError> {
        let category = quoted_category(content).unwrap_or("General");
        Ok(format!(
            "*🚀 Business Idea: Demo Venture*\n\n\
             *💡 Core Concept*\n\
             A placeholder idea for {category}. Configure a real provider to get actual ideas.\n"
        ))
    }
}

fn quoted_category(prompt: &str) -> Option<&str> {
    let end = prompt.find("' category")?;
    let start = prompt[..end].rfind('\'')? + 1;
    Some(&prompt[start..end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ideas::prompt;

    #[tokio::test]
    async fn complete_names_the_prompted_category() {
        let p = DummyProvider;
        let out = p.complete(&prompt::build("🍕 Food & Beverage")).await.unwrap();
        assert!(out.starts_with("*🚀 Business Idea: Demo Venture*"));
        assert!(out.contains("A placeholder idea for 🍕 Food & Beverage."));
    }

    #[tokio::test]
    async fn complete_without_category_is_general() {
        let p = DummyProvider;
        assert!(p.complete("").await.unwrap().contains("placeholder idea for General."));
        assert_eq!(quoted_category("just text"), None);
    }
}
