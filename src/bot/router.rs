//! Command and callback dispatch tables.

use teloxide::utils::command::BotCommands;

use super::keyboards::{BACK_TO_START, CATEGORY_PREFIX, HELP, RANDOM_IDEA, SHOW_CATEGORIES};
use crate::ideas::categories::{self, Category};

#[derive(BotCommands, Clone, Copy, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Business ideas on demand:")]
pub enum Command {
    #[command(description = "main menu and welcome")]
    Start,
    #[command(description = "browse business categories")]
    Categories,
    #[command(description = "get a random business idea")]
    Random,
    #[command(description = "show help information")]
    Help,
}

/// A recognised inline button press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackAction {
    ShowCategories,
    RandomIdea,
    Help,
    BackToStart,
    Category(&'static Category),
}

impl CallbackAction {
    /// Exact match on the fixed actions, then the `category_<key>` prefix.
    /// Anything else, including an unknown category key, is `None`.
    pub fn parse(data: &str) -> Option<Self> {
        match data {
            SHOW_CATEGORIES => Some(Self::ShowCategories),
            RANDOM_IDEA => Some(Self::RandomIdea),
            HELP => Some(Self::Help),
            BACK_TO_START => Some(Self::BackToStart),
            _ => data
                .strip_prefix(CATEGORY_PREFIX)
                .and_then(categories::find)
                .map(Self::Category),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_actions() {
        assert_eq!(CallbackAction::parse("show_categories"), Some(CallbackAction::ShowCategories));
        assert_eq!(CallbackAction::parse("random_idea"), Some(CallbackAction::RandomIdea));
        assert_eq!(CallbackAction::parse("help"), Some(CallbackAction::Help));
        assert_eq!(CallbackAction::parse("back_to_start"), Some(CallbackAction::BackToStart));
    }

    #[test]
    fn every_category_key_routes_to_its_category() {
        for c in categories::all() {
            let action = CallbackAction::parse(&format!("category_{}", c.key));
            assert_eq!(action, Some(CallbackAction::Category(c)));
        }
    }

    #[test]
    fn unknown_data_is_none() {
        for data in ["", "HELP", "help ", "category_", "category_crypto", "categories", "random"] {
            assert_eq!(CallbackAction::parse(data), None, "{data:?}");
        }
    }

    #[test]
    fn commands_parse() {
        assert_eq!(Command::parse("/start", "idea_bot").unwrap(), Command::Start);
        assert_eq!(Command::parse("/random", "idea_bot").unwrap(), Command::Random);
        assert!(Command::parse("/unknown", "idea_bot").is_err());
    }
}
