//! Single-operator alert relay for a Telegram broadcast channel

pub mod application;
pub mod domain;
pub mod infrastructure;
