//! Domain traits - Abstractions for infrastructure implementations

pub mod auth;
pub mod bot;
pub mod clock;

pub use auth::{AdminAuthorizer, Authorizer};
pub use bot::{Bot, BotInfo, InlineKeyboard, KeyboardButton};
pub use clock::{Clock, FixedClock, SystemClock};
