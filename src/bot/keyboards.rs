//! Inline keyboards, independent of any transport library.

use crate::ideas::categories::{self, Category};

// ── Callback data ────────────────────────────────────────────────────────────

pub const SHOW_CATEGORIES: &str = "show_categories";
pub const RANDOM_IDEA: &str = "random_idea";
pub const HELP: &str = "help";
pub const BACK_TO_START: &str = "back_to_start";
pub const CATEGORY_PREFIX: &str = "category_";

pub fn category_data(category: &Category) -> String {
    format!("{CATEGORY_PREFIX}{}", category.key)
}

// ── Types ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    pub data: String,
}

impl Button {
    pub fn new(label: impl Into<String>, data: impl Into<String>) -> Self {
        Self { label: label.into(), data: data.into() }
    }
}

/// Rows of callback buttons.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Keyboard {
    pub rows: Vec<Vec<Button>>,
}

impl Keyboard {
    pub fn row(mut self, buttons: Vec<Button>) -> Self {
        self.rows.push(buttons);
        self
    }

    pub fn buttons(&self) -> impl Iterator<Item = &Button> {
        self.rows.iter().flatten()
    }
}

// ── Layouts ──────────────────────────────────────────────────────────────────

fn browse_categories() -> Button {
    Button::new("📋 Browse Categories", SHOW_CATEGORIES)
}

fn main_menu_button() -> Button {
    Button::new("🏠 Main Menu", BACK_TO_START)
}

pub fn main_menu() -> Keyboard {
    Keyboard::default()
        .row(vec![browse_categories()])
        .row(vec![Button::new("🎲 Random Idea", RANDOM_IDEA)])
        .row(vec![Button::new("❓ Help", HELP)])
}

/// Two categories per row, then a way back.
pub fn categories() -> Keyboard {
    let mut keyboard = Keyboard::default();
    for pair in categories::all().chunks(2) {
        keyboard = keyboard.row(pair.iter().map(|c| Button::new(c.label, category_data(c))).collect());
    }
    keyboard.row(vec![Button::new("🔙 Back to Menu", BACK_TO_START)])
}

pub fn help() -> Keyboard {
    Keyboard::default()
        .row(vec![browse_categories()])
        .row(vec![main_menu_button()])
}

pub fn category_result(category: &Category) -> Keyboard {
    Keyboard::default()
        .row(vec![Button::new("🔄 Generate Another", category_data(category))])
        .row(vec![Button::new("📋 All Categories", SHOW_CATEGORIES)])
        .row(vec![main_menu_button()])
}

pub fn random_result() -> Keyboard {
    Keyboard::default()
        .row(vec![Button::new("🎲 Another Random", RANDOM_IDEA)])
        .row(vec![browse_categories()])
        .row(vec![main_menu_button()])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_grid_is_two_wide_with_back_row() {
        let kb = categories();
        assert_eq!(kb.rows.len(), 7);
        assert!(kb.rows[..6].iter().all(|r| r.len() == 2));
        assert_eq!(kb.rows[6], vec![Button::new("🔙 Back to Menu", "back_to_start")]);

        let labels: Vec<_> = kb.buttons().map(|b| b.label.as_str()).collect();
        for c in categories::all() {
            assert!(labels.contains(&c.label));
        }
    }

    #[test]
    fn generate_another_targets_same_category() {
        let finance = categories::find("finance").unwrap();
        let kb = category_result(finance);
        assert_eq!(kb.rows[0][0].data, "category_finance");
    }

    #[test]
    fn all_callback_data_fits_limit() {
        let boards = [main_menu(), categories(), help(), random_result()];
        for b in boards.iter().flat_map(|k| k.buttons()) {
            assert!(b.data.len() <= 64, "{}", b.data);
        }
    }
}
