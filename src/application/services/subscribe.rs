//! Subscription call-to-action

use reqwest::Url;

use crate::application::errors::ConfigError;
use crate::application::texts::SUBSCRIBE_LABEL;
use crate::domain::traits::{InlineKeyboard, KeyboardButton};

/// Build the single subscribe button bound to `subscription_url`.
///
/// Empty, unparseable, or non-http(s) URLs are configuration errors.
pub fn subscribe_control(subscription_url: &str) -> Result<InlineKeyboard, ConfigError> {
    let raw = subscription_url.trim();
    if raw.is_empty() {
        return Err(ConfigError::MissingField("SALLA_URL".to_string()));
    }

    let url = Url::parse(raw)
        .map_err(|e| ConfigError::InvalidValue(format!("SALLA_URL '{}': {}", raw, e)))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidValue(format!(
            "SALLA_URL must be an http(s) link, got scheme '{}'",
            url.scheme()
        )));
    }

    Ok(InlineKeyboard::single(
        KeyboardButton::new(SUBSCRIBE_LABEL).with_url(raw),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_button_with_url() {
        let keyboard = subscribe_control("https://salla.sa/majed").unwrap();
        let buttons: Vec<_> = keyboard.buttons().collect();
        assert_eq!(buttons.len(), 1);
        assert_eq!(buttons[0].text, SUBSCRIBE_LABEL);
        assert_eq!(buttons[0].url.as_deref(), Some("https://salla.sa/majed"));
    }

    #[test]
    fn test_empty_url_fails() {
        assert!(matches!(subscribe_control(""), Err(ConfigError::MissingField(_))));
        assert!(matches!(subscribe_control("   "), Err(ConfigError::MissingField(_))));
    }

    #[test]
    fn test_invalid_url_fails() {
        assert!(matches!(subscribe_control("salla"), Err(ConfigError::InvalidValue(_))));
        assert!(matches!(
            subscribe_control("ftp://salla.sa/x"),
            Err(ConfigError::InvalidValue(_))
        ));
    }
}
