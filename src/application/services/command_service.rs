use std::sync::Arc;
use tracing::Instrument;

use crate::application::errors::{CommandError, ConfigError, DispatchError};
use crate::application::services::{subscribe_control, BroadcastDispatcher, CaptionComposer};
use crate::application::texts;
use crate::domain::entities::{
    BroadcastRequest, Caller, Command, CommandRegistry, ComposedMessage, Content, ImageRef, Message,
};
use crate::domain::traits::{Authorizer, Bot, Clock, InlineKeyboard};
use crate::infrastructure::config::Settings;

/// Text sent back to the chat a command came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub keyboard: Option<InlineKeyboard>,
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            keyboard: None,
        }
    }

    pub fn with_keyboard(mut self, keyboard: InlineKeyboard) -> Self {
        self.keyboard = Some(keyboard);
        self
    }
}

/// Service for executing bot commands
pub struct CommandService<B: Bot> {
    registry: CommandRegistry,
    display_name: String,
    authorizer: Arc<dyn Authorizer>,
    composer: CaptionComposer,
    control: InlineKeyboard,
    dispatcher: BroadcastDispatcher<B>,
}

impl<B: Bot> CommandService<B> {
    /// Fails if the settings cannot produce a subscribe control or timezone
    pub fn new(
        settings: &Settings,
        bot: Arc<B>,
        authorizer: Arc<dyn Authorizer>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, ConfigError> {
        let control = subscribe_control(&settings.subscription_url)?;
        let destination = settings
            .destination_channel
            .clone()
            .ok_or_else(|| ConfigError::MissingField("PREMIUM_CHANNEL_ID".to_string()))?;
        let composer = CaptionComposer::new(
            settings.display_name.clone(),
            settings.tz()?,
            settings.timezone.clone(),
            clock,
        );

        Ok(Self {
            registry: Self::default_commands(),
            display_name: settings.display_name.clone(),
            authorizer,
            composer,
            control,
            dispatcher: BroadcastDispatcher::new(bot, destination, settings.dispatch_timeout()),
        })
    }

    pub fn default_commands() -> CommandRegistry {
        let mut registry = CommandRegistry::new();
        registry.register(Command::new("start").with_description("رسالة ترحيب وزر الاشتراك"));
        registry.register(Command::new("help").with_description("قائمة الأوامر"));
        registry.register(
            Command::new("setadmin").with_description("يعرض User ID والتأكد من الصلاحية"),
        );
        registry.register(
            Command::new("newpost")
                .with_description(
                    "(للمشرف) نشر تنبيه صفقة. استخدمه ردًا على صورة لإرسالها للقناة.",
                )
                .with_usage("/newpost دخول PUT على SPX 5700 بسعر 3.10 هدف +30%")
                .admin_only(),
        );
        registry.register(
            Command::new("update")
                .with_description("(للمشرف) إرسال تحديث للصفقة.")
                .with_usage("/update +30% تحقق الهدف الأول")
                .admin_only(),
        );
        registry
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Handle one incoming message. Returns the reply for the originating chat,
    /// or `None` when the message is not for us.
    pub async fn handle(&self, message: &Message) -> Option<Reply> {
        match &message.content {
            Content::Command { name, args } => {
                let cmd = self.registry.find(name)?;
                let caller = message.sender.as_ref();
                let span = tracing::info_span!(
                    "command",
                    id = %uuid::Uuid::new_v4(),
                    name = %cmd.name,
                    caller = caller.map(|c| c.id).unwrap_or_default(),
                );
                self.execute(cmd, args, message).instrument(span).await
            }
            Content::MembersJoined(members) => {
                tracing::info!(chat_id = message.chat_id, count = members.len(), "New members joined");
                Some(self.welcome())
            }
            Content::Text(_) | Content::Empty => None,
        }
    }

    async fn execute(&self, cmd: &Command, args: &[String], message: &Message) -> Option<Reply> {
        let caller = message.sender.as_ref();

        if cmd.admin_only && !caller.is_some_and(|c| self.authorizer.is_authorized(c)) {
            match caller {
                Some(c) => tracing::warn!(caller = %c, "Refused privileged command from non-admin"),
                None => tracing::warn!("Refused privileged command without a sender"),
            }
            return Some(Self::error_reply(&CommandError::PermissionDenied));
        }

        let result = match cmd.name.as_str() {
            "start" => Ok(self.welcome()),
            "help" => Ok(self.help()),
            "setadmin" => return caller.map(|c| self.admin_status(c)),
            "newpost" => self.new_post(args, message).await,
            "update" => self.update(args).await,
            other => {
                tracing::debug!("No handler for /{}", other);
                return None;
            }
        };

        match result {
            Ok(reply) => Some(reply),
            Err(e) => {
                tracing::warn!(error = %e, "Command failed");
                Some(Self::error_reply(&e))
            }
        }
    }

    fn welcome(&self) -> Reply {
        Reply::text(texts::welcome(&self.display_name)).with_keyboard(self.control.clone())
    }

    fn help(&self) -> Reply {
        let mut help = format!("{}\n", texts::HELP_HEADER);
        for cmd in self.registry.all() {
            help.push_str(&format!(
                "/{} — {}\n",
                cmd.name,
                cmd.description.as_deref().unwrap_or("")
            ));
            if let Some(usage) = &cmd.usage {
                help.push_str(&format!("   {}\n", usage));
            }
        }
        Reply::text(help).with_keyboard(self.control.clone())
    }

    fn admin_status(&self, caller: &Caller) -> Reply {
        Reply::text(texts::admin_status(caller.id, self.authorizer.is_authorized(caller)))
    }

    async fn new_post(&self, args: &[String], message: &Message) -> Result<Reply, CommandError> {
        let text = join_args(args).unwrap_or_else(|| texts::NEWPOST_PLACEHOLDER.to_string());
        let image = ImageRef::best_of(message.replied_photo());
        let request = BroadcastRequest::text(text).with_image(image);

        self.broadcast(request).await?;
        Ok(Reply::text(texts::NEWPOST_DONE))
    }

    async fn update(&self, args: &[String]) -> Result<Reply, CommandError> {
        let text = join_args(args).unwrap_or_else(|| texts::UPDATE_PLACEHOLDER.to_string());
        let request = BroadcastRequest::text(format!("{} {}", texts::UPDATE_MARKER, text));

        self.broadcast(request).await?;
        Ok(Reply::text(texts::UPDATE_DONE))
    }

    /// Compose then dispatch. The caption is stamped before sending starts.
    async fn broadcast(&self, request: BroadcastRequest) -> Result<i64, DispatchError> {
        let composed = ComposedMessage {
            caption: self.composer.compose(&request.lines),
            image: request.image,
            control: self.control.clone(),
        };
        self.dispatcher.dispatch(composed).await
    }

    fn error_reply(err: &CommandError) -> Reply {
        let text = match err {
            CommandError::PermissionDenied => texts::ADMIN_ONLY,
            CommandError::Dispatch(DispatchError::Timeout(_)) => texts::DISPATCH_TIMEOUT,
            CommandError::Dispatch(_) => texts::DISPATCH_FAILED,
        };
        Reply::text(text)
    }
}

fn join_args(args: &[String]) -> Option<String> {
    if args.is_empty() {
        None
    } else {
        Some(args.join(" "))
    }
}
