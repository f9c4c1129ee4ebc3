//! Domain entities - Core business objects with no external dependencies

pub mod user;
pub mod chat;
pub mod message;
pub mod broadcast;
pub mod command;

pub use user::Caller;
pub use chat::ChatTarget;
pub use message::{Message, Content};
pub use broadcast::{BroadcastRequest, ComposedMessage, ImageRef, PhotoVariant};
pub use command::{Command, CommandRegistry};
