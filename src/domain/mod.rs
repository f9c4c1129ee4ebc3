//! Domain layer - Core business objects and the seams to the outside world
//!
//! This layer contains:
//! - Entities: Callers, incoming messages, broadcast payloads, commands
//! - Traits: Abstractions for the transport, authorization and time

pub mod entities;
pub mod traits;
