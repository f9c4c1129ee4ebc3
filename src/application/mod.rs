//! Application layer - Use cases and business logic
//!
//! This layer contains:
//! - Services: Caption composition, broadcast dispatch, command handling
//! - Errors: Error taxonomy for config, transport, dispatch and commands
//! - Messaging: Parsing of incoming text
//! - Texts: Fixed user-facing strings

pub mod errors;
pub mod messaging;
pub mod services;
pub mod texts;
