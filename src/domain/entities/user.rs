use std::fmt;

/// The identity attached to an incoming command
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Caller {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub is_bot: bool,
}

impl Caller {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            username: None,
            first_name: None,
            is_bot: false,
        }
    }

    pub fn display_name(&self) -> String {
        if let Some(ref username) = self.username {
            format!("@{}", username)
        } else if let Some(ref first) = self.first_name {
            first.clone()
        } else {
            self.id.to_string()
        }
    }
}

impl fmt::Display for Caller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_prefers_username() {
        let named = Caller {
            first_name: Some("Majed".to_string()),
            ..Caller::new(42)
        };
        let handled = Caller {
            username: Some("majed".to_string()),
            ..named.clone()
        };
        assert_eq!(handled.display_name(), "@majed");
        assert_eq!(named.to_string(), "Majed");
        assert_eq!(Caller::new(42).to_string(), "42");
    }
}
