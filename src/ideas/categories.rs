//! The fixed business category table.

use rand::RngExt;

/// One business category: a short key used in callback data and a display
/// label with a leading emoji.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub key: &'static str,
    pub label: &'static str,
}

pub static CATEGORIES: [Category; 12] = [
    Category { key: "tech", label: "🚀 Technology & Software" },
    Category { key: "ecommerce", label: "🛒 E-commerce & Online Business" },
    Category { key: "health", label: "🏥 Health & Wellness" },
    Category { key: "food", label: "🍔 Food & Beverage" },
    Category { key: "education", label: "📚 Education & Training" },
    Category { key: "finance", label: "💰 Finance & Investment" },
    Category { key: "marketing", label: "📱 Marketing & Social Media" },
    Category { key: "sustainability", label: "🌱 Sustainability & Green Business" },
    Category { key: "retail", label: "🏪 Retail & Consumer Goods" },
    Category { key: "services", label: "🔧 Professional Services" },
    Category { key: "entertainment", label: "🎬 Entertainment & Media" },
    Category { key: "travel", label: "✈️ Travel & Tourism" },
];

pub fn all() -> &'static [Category] {
    &CATEGORIES
}

pub fn find(key: &str) -> Option<&'static Category> {
    CATEGORIES.iter().find(|c| c.key == key)
}

/// Pick a category uniformly with the given RNG.
pub fn pick_random_with<R: RngExt>(rng: &mut R) -> &'static Category {
    &CATEGORIES[rng.random_range(0..CATEGORIES.len())]
}

pub fn pick_random() -> &'static Category {
    pick_random_with(&mut rand::rng())
}
