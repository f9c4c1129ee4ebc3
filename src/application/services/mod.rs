//! Application services - Composition, dispatch and command orchestration

pub mod broadcast;
pub mod caption;
pub mod command_service;
pub mod subscribe;

pub use broadcast::BroadcastDispatcher;
pub use caption::CaptionComposer;
pub use command_service::{CommandService, Reply};
pub use subscribe::subscribe_control;
