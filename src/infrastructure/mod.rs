//! Infrastructure layer - External concerns
//!
//! This layer contains:
//! - Config: Settings loading and validation
//! - Adapters: Platform integrations (Telegram)
//! - Tasks: In-flight handler tracking for shutdown

pub mod config;
pub mod adapters;
pub mod tasks;
