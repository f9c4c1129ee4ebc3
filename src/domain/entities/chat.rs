use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Where an outbound message goes: a numeric chat id or a public `@username`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum ChatTarget {
    Id(i64),
    Username(String),
}

impl ChatTarget {
    /// Normalize a raw identifier. Numeric strings become ids, anything else
    /// is treated as a channel username.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        if let Ok(id) = raw.parse::<i64>() {
            return Some(ChatTarget::Id(id));
        }
        if raw.starts_with('@') {
            Some(ChatTarget::Username(raw.to_string()))
        } else {
            Some(ChatTarget::Username(format!("@{}", raw)))
        }
    }
}

impl From<i64> for ChatTarget {
    fn from(id: i64) -> Self {
        ChatTarget::Id(id)
    }
}

impl fmt::Display for ChatTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatTarget::Id(id) => write!(f, "{}", id),
            ChatTarget::Username(name) => write!(f, "{}", name),
        }
    }
}

impl<'de> Deserialize<'de> for ChatTarget {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Id(i64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Id(id) => Ok(ChatTarget::Id(id)),
            Raw::Text(text) => ChatTarget::parse(&text)
                .ok_or_else(|| serde::de::Error::custom("chat identifier must not be empty")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_normalizes_numeric_strings() {
        assert_eq!(ChatTarget::parse("-1001234567890"), Some(ChatTarget::Id(-1001234567890)));
        assert_eq!(ChatTarget::parse("@premium"), Some(ChatTarget::Username("@premium".into())));
        assert_eq!(ChatTarget::parse("premium"), Some(ChatTarget::Username("@premium".into())));
        assert_eq!(ChatTarget::parse("   "), None);
    }

    #[test]
    fn test_deserialize_number_or_string() {
        let id: ChatTarget = serde_json::from_str("-100200").unwrap();
        assert_eq!(id, ChatTarget::Id(-100200));

        let name: ChatTarget = serde_json::from_str("\"@signals\"").unwrap();
        assert_eq!(name, ChatTarget::Username("@signals".into()));

        assert!(serde_json::from_str::<ChatTarget>("\"\"").is_err());
    }

    #[test]
    fn test_serializes_untagged() {
        assert_eq!(serde_json::to_string(&ChatTarget::Id(7)).unwrap(), "7");
        assert_eq!(
            serde_json::to_string(&ChatTarget::Username("@x".into())).unwrap(),
            "\"@x\""
        );
    }
}
