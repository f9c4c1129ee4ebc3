//! Configuration management

use chrono_tz::Tz;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::application::errors::ConfigError;
use crate::application::services::subscribe_control;
use crate::domain::entities::ChatTarget;
use crate::domain::traits::AdminAuthorizer;

/// Environment variable holding the bot token
pub const TOKEN_ENV: &str = "BOT_TOKEN";

/// Bot settings, loaded once at startup and never mutated
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    #[serde(rename = "DISPLAY_NAME", default = "default_display_name")]
    pub display_name: String,

    #[serde(rename = "PREMIUM_CHANNEL_ID", default)]
    pub destination_channel: Option<ChatTarget>,

    #[serde(rename = "SALLA_URL", default)]
    pub subscription_url: String,

    #[serde(rename = "ADMIN_USER_ID", default, deserialize_with = "deserialize_user_id")]
    pub admin_user_id: i64,

    /// Declared for the watermarking feature; not read by the broadcast flow
    #[serde(rename = "WATERMARK_ENABLED", default = "default_true")]
    pub watermark_enabled: bool,

    #[serde(rename = "WATERMARK_FILE", default = "default_watermark_file")]
    pub watermark_file: PathBuf,

    #[serde(rename = "TIMEZONE", default = "default_timezone")]
    pub timezone: String,

    #[serde(rename = "DISPATCH_TIMEOUT_SECS", default = "default_dispatch_timeout")]
    pub dispatch_timeout_secs: u64,
}

fn default_display_name() -> String {
    "majed".to_string()
}

fn default_true() -> bool {
    true
}

fn default_watermark_file() -> PathBuf {
    PathBuf::from("assets/MajedRobotWatermark.png")
}

fn default_timezone() -> String {
    "Asia/Riyadh".to_string()
}

fn default_dispatch_timeout() -> u64 {
    15
}

/// Accepts `42` as well as `"42"`
fn deserialize_user_id<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Int(id) => Ok(id),
        Raw::Text(text) if text.trim().is_empty() => Ok(0),
        Raw::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid user id '{}'", text))),
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            display_name: default_display_name(),
            destination_channel: None,
            subscription_url: String::new(),
            admin_user_id: 0,
            watermark_enabled: default_true(),
            watermark_file: default_watermark_file(),
            timezone: default_timezone(),
            dispatch_timeout_secs: default_dispatch_timeout(),
        }
    }
}

impl Settings {
    /// Read and validate a settings file. `.yaml`/`.yml` files are parsed as
    /// YAML, everything else as JSON.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Parse(format!("Failed to read {}: {}", path.display(), e)))?;

        let is_yaml = matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("yaml") | Some("yml")
        );
        let settings = if is_yaml {
            Self::from_yaml_str(&content)?
        } else {
            Self::from_json_str(&content)?
        };

        settings.validate()?;
        Ok(settings)
    }

    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))
    }

    /// Everything a broadcast needs must be present before the first command
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.destination_channel.is_none() {
            return Err(ConfigError::MissingField("PREMIUM_CHANNEL_ID".to_string()));
        }
        subscribe_control(&self.subscription_url)?;
        self.tz()?;
        if self.dispatch_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue(
                "DISPATCH_TIMEOUT_SECS must be greater than zero".to_string(),
            ));
        }
        if !AdminAuthorizer::new(self.admin_user_id).is_enabled() {
            tracing::warn!("ADMIN_USER_ID is 0, privileged commands are disabled");
        }
        Ok(())
    }

    pub fn tz(&self) -> Result<Tz, ConfigError> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| ConfigError::InvalidValue(format!("Unknown TIMEZONE '{}'", self.timezone)))
    }

    pub fn dispatch_timeout(&self) -> Duration {
        Duration::from_secs(self.dispatch_timeout_secs)
    }
}

/// Resolve the bot token: an explicit override wins over the environment
pub fn resolve_token(
    token_override: Option<String>,
    from_env: Option<String>,
) -> Result<String, ConfigError> {
    token_override
        .or(from_env)
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ConfigError::MissingField(TOKEN_ENV.to_string()))
}

pub fn load_token(token_override: Option<String>) -> Result<String, ConfigError> {
    resolve_token(token_override, std::env::var(TOKEN_ENV).ok())
}
