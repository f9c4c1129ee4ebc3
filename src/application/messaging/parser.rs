//! Message parser - Turns raw text into structured message content

use crate::domain::entities::Content;

/// Parses incoming text into `Content`
#[derive(Debug, Clone)]
pub struct MessageParser {
    command_prefix: String,
    bot_username: Option<String>,
}

impl MessageParser {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            command_prefix: prefix.into(),
            bot_username: None,
        }
    }

    /// Commands addressed as `/cmd@name` are only accepted when `name` is this bot
    pub fn with_bot_username(mut self, username: impl Into<String>) -> Self {
        let username = username.into();
        self.bot_username = Some(username.trim_start_matches('@').to_lowercase());
        self
    }

    pub fn parse(&self, text: &str) -> Content {
        if text.trim().is_empty() {
            return Content::Empty;
        }
        if let Some(rest) = text.strip_prefix(self.command_prefix.as_str()) {
            if let Some(content) = self.parse_command(rest) {
                return content;
            }
        }
        Content::Text(text.to_string())
    }

    /// Split command and arguments, lowercasing the name
    fn parse_command(&self, rest: &str) -> Option<Content> {
        let mut parts = rest.split_whitespace();
        let head = parts.next()?;

        let name = match head.split_once('@') {
            Some((name, target)) => {
                let addressed_to_us = self
                    .bot_username
                    .as_deref()
                    .is_some_and(|me| me == target.to_lowercase());
                if !addressed_to_us {
                    return None;
                }
                name
            }
            None => head,
        };

        if name.is_empty() {
            return None;
        }

        let args = parts.map(|s| s.to_string()).collect();
        Some(Content::Command {
            name: name.to_lowercase(),
            args,
        })
    }
}
