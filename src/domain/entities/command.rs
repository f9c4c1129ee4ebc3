/// Describes a bot command: how it is invoked and who may invoke it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub name: String,
    pub description: Option<String>,
    pub usage: Option<String>,
    pub admin_only: bool,
}

impl Command {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            usage: None,
            admin_only: false,
        }
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    pub fn with_usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = Some(usage.into());
        self
    }

    pub fn admin_only(mut self) -> Self {
        self.admin_only = true;
        self
    }

    pub fn matches(&self, input: &str) -> bool {
        self.name.to_lowercase() == input.to_lowercase()
    }
}

/// Ordered set of commands. Registration order is the order shown to users.
#[derive(Debug, Default)]
pub struct CommandRegistry {
    commands: Vec<Command>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command, replacing any earlier one with the same name
    pub fn register(&mut self, command: Command) {
        if let Some(existing) = self.commands.iter_mut().find(|c| c.name == command.name) {
            *existing = command;
        } else {
            self.commands.push(command);
        }
    }

    pub fn find(&self, input: &str) -> Option<&Command> {
        self.commands.iter().find(|c| c.matches(input))
    }

    pub fn all(&self) -> impl Iterator<Item = &Command> {
        self.commands.iter()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_is_case_insensitive() {
        let mut registry = CommandRegistry::new();
        registry.register(Command::new("newpost"));

        assert_eq!(registry.find("NewPost").map(|c| c.name.as_str()), Some("newpost"));
        assert!(registry.find("post").is_none());
        assert!(registry.find("update").is_none());
    }

    #[test]
    fn test_register_keeps_order_and_replaces() {
        let mut registry = CommandRegistry::new();
        registry.register(Command::new("start"));
        registry.register(Command::new("help"));
        registry.register(Command::new("start").with_description("again"));

        let names: Vec<_> = registry.all().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["start", "help"]);
        assert_eq!(registry.find("start").and_then(|c| c.description.as_deref()), Some("again"));
        assert_eq!(registry.len(), 2);
    }
}
