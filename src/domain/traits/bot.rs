use async_trait::async_trait;
use crate::domain::entities::{ChatTarget, ImageRef};
use crate::application::errors::BotError;

/// Bot trait - abstraction for the chat transport
#[async_trait]
pub trait Bot: Send + Sync {
    /// Send a text message, optionally with an inline keyboard. Returns the message id.
    async fn send_message(
        &self,
        chat: &ChatTarget,
        text: &str,
        keyboard: Option<&InlineKeyboard>,
    ) -> Result<i64, BotError>;

    /// Send an image the transport already holds, with a caption
    async fn send_photo(
        &self,
        chat: &ChatTarget,
        photo: &ImageRef,
        caption: &str,
        keyboard: Option<&InlineKeyboard>,
    ) -> Result<i64, BotError>;

    /// Get bot info
    fn bot_info(&self) -> BotInfo;
}

/// Keyboard button for inline keyboards
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyboardButton {
    pub text: String,
    pub url: Option<String>,
}

impl KeyboardButton {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            url: None,
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

/// Rows of buttons attached under a message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineKeyboard {
    pub rows: Vec<Vec<KeyboardButton>>,
}

impl InlineKeyboard {
    pub fn single(button: KeyboardButton) -> Self {
        Self { rows: vec![vec![button]] }
    }

    pub fn buttons(&self) -> impl Iterator<Item = &KeyboardButton> {
        self.rows.iter().flatten()
    }
}

/// Bot information
#[derive(Debug, Clone, Default)]
pub struct BotInfo {
    pub username: String,
}
