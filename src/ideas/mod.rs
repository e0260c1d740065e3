//! Business idea domain: the category table, the prompt and the gateway to
//! the completion provider.

pub mod categories;
pub mod gateway;
pub mod prompt;

pub use categories::Category;
pub use gateway::{IdeaGateway, IdeaReply};
