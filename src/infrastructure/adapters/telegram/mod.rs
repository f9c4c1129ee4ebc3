//! Telegram adapter

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::application::errors::BotError;
use crate::application::messaging::MessageParser;
use crate::domain::entities::{self, Caller, ChatTarget, CommandRegistry, Content, ImageRef, PhotoVariant};
use crate::domain::traits::{Bot, BotInfo, InlineKeyboard};

/// Telegram API base URL
const API_BASE: &str = "https://api.telegram.org";

/// Telegram update type
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Message {
    pub message_id: i64,
    pub from: Option<User>,
    pub chat: Chat,
    #[serde(default)]
    pub date: i64,
    pub text: Option<String>,
    pub caption: Option<String>,
    pub photo: Option<Vec<PhotoSize>>,
    pub reply_to_message: Option<Box<Message>>,
    pub new_chat_members: Option<Vec<User>>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub is_bot: bool,
    pub username: Option<String>,
    pub first_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PhotoSize {
    pub file_id: String,
    pub width: u32,
    pub height: u32,
}

impl From<&User> for Caller {
    fn from(user: &User) -> Self {
        Caller {
            id: user.id,
            username: user.username.clone(),
            first_name: user.first_name.clone(),
            is_bot: user.is_bot,
        }
    }
}

impl From<&PhotoSize> for PhotoVariant {
    fn from(size: &PhotoSize) -> Self {
        PhotoVariant {
            file_id: size.file_id.clone(),
            width: size.width,
            height: size.height,
        }
    }
}

impl Message {
    /// Convert into a domain message. Only `text` is parsed for commands;
    /// photo captions are kept as plain text.
    pub fn to_domain(&self, parser: &MessageParser) -> entities::Message {
        let content = match (&self.new_chat_members, &self.text, &self.caption) {
            (Some(members), _, _) if !members.is_empty() => {
                Content::MembersJoined(members.iter().map(Caller::from).collect())
            }
            (_, Some(text), _) => parser.parse(text),
            (_, None, Some(caption)) => Content::Text(caption.clone()),
            _ => Content::Empty,
        };

        let mut message = entities::Message::new(self.chat.id, content)
            .with_id(self.message_id)
            .with_sender_opt(self.from.as_ref().map(Caller::from))
            .with_photo(
                self.photo
                    .as_deref()
                    .unwrap_or_default()
                    .iter()
                    .map(PhotoVariant::from)
                    .collect(),
            );
        if let Some(ts) = DateTime::<Utc>::from_timestamp(self.date, 0) {
            message = message.with_timestamp(ts);
        }
        if let Some(reply) = &self.reply_to_message {
            message = message.with_reply_to(reply.to_domain(parser));
        }
        message
    }
}

/// Envelope every Bot API method responds with
#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
    error_code: Option<i32>,
    parameters: Option<ResponseParameters>,
}

#[derive(Debug, Deserialize)]
struct ResponseParameters {
    retry_after: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct SentMessage {
    message_id: i64,
}

#[derive(Serialize)]
struct ReplyMarkup<'a> {
    inline_keyboard: Vec<Vec<InlineKeyboardButton<'a>>>,
}

#[derive(Serialize)]
struct InlineKeyboardButton<'a> {
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<&'a str>,
}

impl<'a> From<&'a InlineKeyboard> for ReplyMarkup<'a> {
    fn from(keyboard: &'a InlineKeyboard) -> Self {
        let inline_keyboard = keyboard
            .rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|btn| InlineKeyboardButton {
                        text: &btn.text,
                        url: btn.url.as_deref(),
                    })
                    .collect()
            })
            .collect();
        Self { inline_keyboard }
    }
}

/// Telegram bot adapter
pub struct TelegramAdapter {
    token: String,
    api_base: String,
    client: Client,
    info: BotInfo,
}

impl TelegramAdapter {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            api_base: API_BASE.to_string(),
            client: Client::new(),
            info: BotInfo::default(),
        }
    }

    /// Point the adapter at another Bot API server
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    /// Get the API URL for a method
    fn api_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_base, self.token, method)
    }

    /// Call a Bot API method and unwrap the response envelope
    async fn call<Req, Res>(&self, method: &str, request: &Req) -> Result<Res, BotError>
    where
        Req: Serialize + ?Sized,
        Res: DeserializeOwned,
    {
        // Errors would otherwise carry the URL, and with it the token
        let response = self.client
            .post(self.api_url(method))
            .json(request)
            .send()
            .await
            .map_err(|e| BotError::Network(e.without_url().to_string()))?;

        let status = response.status();
        let body: ApiResponse<Res> = response.json().await.map_err(|e| {
            if status.is_success() {
                BotError::Parse(e.without_url().to_string())
            } else {
                BotError::Network(format!("Telegram API error: {}", status))
            }
        })?;

        if !body.ok {
            return Err(BotError::Api {
                code: body.error_code.unwrap_or_else(|| i32::from(status.as_u16())),
                description: body.description.unwrap_or_default(),
                retry_after: body.parameters.and_then(|p| p.retry_after),
            });
        }

        body.result
            .ok_or_else(|| BotError::Parse(format!("{} returned no result", method)))
    }

    /// Fetch bot info from Telegram API
    pub async fn fetch_bot_info(&mut self) -> Result<(), BotError> {
        let me: User = self.call("getMe", &serde_json::json!({})).await?;

        self.info = BotInfo {
            username: me.username.unwrap_or_default(),
        };

        Ok(())
    }

    /// Discard updates that queued up while the bot was offline
    pub async fn drop_pending_updates(&self) -> Result<(), BotError> {
        #[derive(Serialize)]
        struct DeleteWebhookRequest {
            drop_pending_updates: bool,
        }

        let _: bool = self
            .call("deleteWebhook", &DeleteWebhookRequest { drop_pending_updates: true })
            .await?;
        Ok(())
    }

    /// Get updates from Telegram using getUpdates API
    pub async fn get_updates(&self, offset: i64, timeout: i64) -> Result<Vec<Update>, BotError> {
        #[derive(Serialize)]
        struct GetUpdatesRequest<'a> {
            offset: i64,
            timeout: i64,
            allowed_updates: &'a [&'a str],
        }

        let request = GetUpdatesRequest {
            offset,
            timeout,
            allowed_updates: &["message"],
        };
        self.call("getUpdates", &request).await
    }

    /// Get the next update offset
    pub fn get_next_offset(updates: &[Update], current: i64) -> i64 {
        updates.iter()
            .map(|u| u.update_id + 1)
            .max()
            .unwrap_or(current)
            .max(current)
    }

    /// Register bot commands with Telegram
    pub async fn register_commands(&self, registry: &CommandRegistry) -> Result<(), BotError> {
        #[derive(Serialize)]
        struct BotCommand<'a> {
            command: &'a str,
            description: &'a str,
        }

        #[derive(Serialize)]
        struct SetMyCommandsRequest<'a> {
            commands: Vec<BotCommand<'a>>,
        }

        let commands = registry
            .all()
            .map(|c| BotCommand {
                command: &c.name,
                description: c.description.as_deref().unwrap_or(&c.name),
            })
            .collect();

        let _: bool = self.call("setMyCommands", &SetMyCommandsRequest { commands }).await?;
        tracing::info!("Registered {} bot commands with Telegram", registry.len());
        Ok(())
    }
}

#[async_trait]
impl Bot for TelegramAdapter {
    async fn send_message(
        &self,
        chat: &ChatTarget,
        text: &str,
        keyboard: Option<&InlineKeyboard>,
    ) -> Result<i64, BotError> {
        #[derive(Serialize)]
        struct SendMessageRequest<'a> {
            chat_id: &'a ChatTarget,
            text: &'a str,
            #[serde(skip_serializing_if = "Option::is_none")]
            reply_markup: Option<ReplyMarkup<'a>>,
        }

        tracing::debug!("Sending to {}: {}", chat, text);
        let request = SendMessageRequest {
            chat_id: chat,
            text,
            reply_markup: keyboard.map(ReplyMarkup::from),
        };
        let sent: SentMessage = self.call("sendMessage", &request).await?;
        Ok(sent.message_id)
    }

    async fn send_photo(
        &self,
        chat: &ChatTarget,
        photo: &ImageRef,
        caption: &str,
        keyboard: Option<&InlineKeyboard>,
    ) -> Result<i64, BotError> {
        #[derive(Serialize)]
        struct SendPhotoRequest<'a> {
            chat_id: &'a ChatTarget,
            photo: &'a str,
            caption: &'a str,
            #[serde(skip_serializing_if = "Option::is_none")]
            reply_markup: Option<ReplyMarkup<'a>>,
        }

        tracing::debug!("Sending photo {} to {}", photo, chat);
        let request = SendPhotoRequest {
            chat_id: chat,
            photo: photo.as_str(),
            caption,
            reply_markup: keyboard.map(ReplyMarkup::from),
        };
        let sent: SentMessage = self.call("sendPhoto", &request).await?;
        Ok(sent.message_id)
    }

    fn bot_info(&self) -> BotInfo {
        self.info.clone()
    }
}
