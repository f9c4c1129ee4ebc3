#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use std::sync::{Arc, Mutex, Once};
use std::time::Duration;

use majed_bot::application::errors::BotError;
use majed_bot::application::services::CommandService;
use majed_bot::domain::entities::{Caller, ChatTarget, ImageRef, Message};
use majed_bot::domain::traits::{AdminAuthorizer, Bot, BotInfo, FixedClock, InlineKeyboard};
use majed_bot::infrastructure::config::Settings;

static INIT: Once = Once::new();

pub fn ensure_init() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    });
}

pub const ADMIN_ID: i64 = 42;
pub const CHANNEL: &str = "@majed_premium";
pub const SALLA: &str = "https://salla.sa/majed";

/// One message the bot was asked to send
#[derive(Debug, Clone, PartialEq)]
pub enum Sent {
    Text {
        chat: ChatTarget,
        text: String,
        keyboard: Option<InlineKeyboard>,
    },
    Photo {
        chat: ChatTarget,
        photo: ImageRef,
        caption: String,
        keyboard: Option<InlineKeyboard>,
    },
}

/// How the fake transport should behave
#[derive(Debug, Clone)]
pub enum Behaviour {
    Deliver,
    Reject,
    Hang,
}

/// Records every send instead of talking to Telegram
pub struct RecordingBot {
    sent: Mutex<Vec<Sent>>,
    behaviour: Behaviour,
}

impl RecordingBot {
    pub fn new(behaviour: Behaviour) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            behaviour,
        }
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    async fn outcome(&self, record: Sent) -> Result<i64, BotError> {
        match self.behaviour {
            Behaviour::Deliver => {
                let mut sent = self.sent.lock().unwrap();
                sent.push(record);
                Ok(sent.len() as i64)
            }
            Behaviour::Reject => Err(BotError::Api {
                code: 400,
                description: "Bad Request: chat not found".to_string(),
                retry_after: None,
            }),
            Behaviour::Hang => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Err(BotError::Network("unreachable".to_string()))
            }
        }
    }
}

#[async_trait]
impl Bot for RecordingBot {
    async fn send_message(
        &self,
        chat: &ChatTarget,
        text: &str,
        keyboard: Option<&InlineKeyboard>,
    ) -> Result<i64, BotError> {
        self.outcome(Sent::Text {
            chat: chat.clone(),
            text: text.to_string(),
            keyboard: keyboard.cloned(),
        })
        .await
    }

    async fn send_photo(
        &self,
        chat: &ChatTarget,
        photo: &ImageRef,
        caption: &str,
        keyboard: Option<&InlineKeyboard>,
    ) -> Result<i64, BotError> {
        self.outcome(Sent::Photo {
            chat: chat.clone(),
            photo: photo.clone(),
            caption: caption.to_string(),
            keyboard: keyboard.cloned(),
        })
        .await
    }

    fn bot_info(&self) -> BotInfo {
        BotInfo {
            username: "majed_bot".to_string(),
        }
    }
}

pub fn settings() -> Settings {
    Settings::from_json_str(&format!(
        r#"{{
            "DISPLAY_NAME": "majed",
            "PREMIUM_CHANNEL_ID": "{}",
            "SALLA_URL": "{}",
            "ADMIN_USER_ID": {},
            "TIMEZONE": "Asia/Riyadh",
            "DISPATCH_TIMEOUT_SECS": 5
        }}"#,
        CHANNEL, SALLA, ADMIN_ID
    ))
    .unwrap()
}

pub fn service(bot: Arc<RecordingBot>) -> CommandService<RecordingBot> {
    service_with(&settings(), bot)
}

pub fn service_with(settings: &Settings, bot: Arc<RecordingBot>) -> CommandService<RecordingBot> {
    let now = Utc.with_ymd_and_hms(2024, 9, 16, 13, 5, 0).unwrap();
    CommandService::new(
        settings,
        bot,
        Arc::new(AdminAuthorizer::new(settings.admin_user_id)),
        Arc::new(FixedClock(now)),
    )
    .unwrap()
}

pub fn command_from(caller: i64, name: &str, args: &[&str]) -> Message {
    Message::from_command(caller, name, args.iter().map(|s| s.to_string()).collect())
        .with_sender(Caller::new(caller))
}

pub fn destination() -> ChatTarget {
    ChatTarget::parse(CHANNEL).unwrap()
}
