//! Fixed user-facing texts.

use crate::ideas::categories::Category;
use crate::markup::{FormattedText, MessageBuilder};

fn command_list(start: &str, categories: &str, help: &str) -> MessageBuilder {
    MessageBuilder::new()
        .bold("Available Commands:")
        .text("\n")
        .line(format!("• /start - {start}"))
        .line(format!("• /categories - {categories}"))
        .line("• /random - Get a random business idea")
        .line(format!("• /help - {help}"))
}

pub fn welcome() -> FormattedText {
    MessageBuilder::new()
        .text("🚀 ")
        .bold("Welcome to Business Ideas Generator Bot!")
        .blank()
        .blank()
        .line("I can help you generate innovative business ideas across various categories using AI.")
        .blank()
        .extend(command_list(
            "Show this welcome message",
            "Browse business categories",
            "Show help information",
        ))
        .blank()
        .bold("How to use:")
        .text("\n")
        .line("1. Click on /categories to see all available business categories")
        .line("2. Select a category that interests you")
        .line("3. Get AI-generated business ideas with detailed information")
        .blank()
        .text("Let's start your entrepreneurial journey! 🎯")
        .finish()
}

/// Shorter welcome shown when returning to the menu.
pub fn main_menu() -> FormattedText {
    MessageBuilder::new()
        .text("🚀 ")
        .bold("Business Ideas Generator Bot")
        .blank()
        .blank()
        .line("Ready to discover your next business opportunity?")
        .blank()
        .bold("What would you like to do?")
        .finish()
}

pub fn categories() -> FormattedText {
    MessageBuilder::new()
        .text("🏢 ")
        .bold("Choose a Business Category:")
        .blank()
        .blank()
        .text("Select a category to get tailored business ideas:")
        .finish()
}

pub fn help() -> FormattedText {
    MessageBuilder::new()
        .text("📘 ")
        .bold("Help & Information")
        .blank()
        .blank()
        .bold("What is this bot?")
        .text("\n")
        .line("This bot generates innovative business ideas using generative AI across various categories.")
        .blank()
        .extend(command_list(
            "Main menu and welcome",
            "Browse all business categories",
            "Show this help message",
        ))
        .blank()
        .bold("How it works:")
        .text("\n")
        .line("1. Choose a business category or get a random idea")
        .line("2. The bot uses AI to generate detailed business concepts")
        .line("3. Each idea includes market analysis, revenue models, and startup steps")
        .blank()
        .bold("Support:")
        .text("\n")
        .text("For issues or feedback, please contact the developer.")
        .finish()
}

pub fn generating_for(category: &Category) -> FormattedText {
    MessageBuilder::new()
        .text("🔄 ")
        .bold(format!("Generating business idea for {}...", category.label))
        .blank()
        .blank()
        .text("Please wait while I create an innovative business concept for you!")
        .finish()
}

pub fn generating_random(category: &Category) -> FormattedText {
    MessageBuilder::new()
        .text("🎲 ")
        .bold("Generating random business idea...")
        .blank()
        .blank()
        .italic(format!("Category: {}", category.label))
        .blank()
        .blank()
        .text("Please wait!")
        .finish()
}

/// Sent when a request could not be completed at all.
pub fn generic_error() -> FormattedText {
    MessageBuilder::new()
        .text("❌ ")
        .bold("An error occurred")
        .blank()
        .blank()
        .text("Sorry, something went wrong. Please try again or use /start to return to the main menu.")
        .finish()
}
