//! Business idea generator bot: Telegram menus in front of a text
//! completion provider.

pub mod bot;
pub mod config;
pub mod error;
pub mod ideas;
pub mod llm;
pub mod logger;
pub mod markup;
