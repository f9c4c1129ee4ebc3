use super::{Caller, PhotoVariant};
use chrono::{DateTime, Utc};

/// Message content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Text(String),
    Command { name: String, args: Vec<String> },
    MembersJoined(Vec<Caller>),
    Empty,
}

/// An incoming message, already stripped of transport details
#[derive(Debug, Clone)]
pub struct Message {
    pub id: i64,
    pub chat_id: i64,
    pub sender: Option<Caller>,
    pub content: Content,
    pub photo: Vec<PhotoVariant>,
    pub reply_to: Option<Box<Message>>,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn new(chat_id: i64, content: Content) -> Self {
        Self {
            id: 0,
            chat_id,
            sender: None,
            content,
            photo: Vec::new(),
            reply_to: None,
            timestamp: Utc::now(),
        }
    }

    pub fn from_text(chat_id: i64, text: impl Into<String>) -> Self {
        Self::new(chat_id, Content::Text(text.into()))
    }

    pub fn from_command(chat_id: i64, name: impl Into<String>, args: Vec<String>) -> Self {
        Self::new(chat_id, Content::Command { name: name.into(), args })
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = id;
        self
    }

    pub fn with_sender(mut self, caller: Caller) -> Self {
        self.sender = Some(caller);
        self
    }

    pub fn with_sender_opt(mut self, caller: Option<Caller>) -> Self {
        self.sender = caller;
        self
    }

    pub fn with_photo(mut self, photo: Vec<PhotoVariant>) -> Self {
        self.photo = photo;
        self
    }

    pub fn with_reply_to(mut self, message: Message) -> Self {
        self.reply_to = Some(Box::new(message));
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Photo variants carried by the message this one replies to, if any
    pub fn replied_photo(&self) -> &[PhotoVariant] {
        self.reply_to
            .as_deref()
            .map(|m| m.photo.as_slice())
            .unwrap_or(&[])
    }
}
