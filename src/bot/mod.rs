//! Chat front-end: fixed menus, callback routing and delivery of generated
//! ideas through a `ChatTransport`.

pub mod delivery;
pub mod handlers;
pub mod keyboards;
pub mod messages;
pub mod router;
pub mod telegram;
pub mod transport;

pub use handlers::{CallbackEvent, IdeaBot};
pub use router::{CallbackAction, Command};
pub use transport::{ChatTransport, MessageRef, OutgoingMessage, TextFormat, TransportError};
