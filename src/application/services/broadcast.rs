//! Delivery of composed messages to the broadcast destination

use std::sync::Arc;
use std::time::Duration;

use crate::application::errors::DispatchError;
use crate::domain::entities::{ChatTarget, ComposedMessage};
use crate::domain::traits::Bot;

/// Sends each composed message to the one configured destination
pub struct BroadcastDispatcher<B: Bot> {
    bot: Arc<B>,
    destination: ChatTarget,
    timeout: Duration,
}

impl<B: Bot> BroadcastDispatcher<B> {
    pub fn new(bot: Arc<B>, destination: ChatTarget, timeout: Duration) -> Self {
        Self {
            bot,
            destination,
            timeout,
        }
    }

    /// Deliver exactly one message. With an image the photo path is used,
    /// otherwise a text message; both carry the message's control. No retry.
    pub async fn dispatch(&self, message: ComposedMessage) -> Result<i64, DispatchError> {
        let send = async {
            match &message.image {
                Some(image) => {
                    self.bot
                        .send_photo(&self.destination, image, &message.caption, Some(&message.control))
                        .await
                }
                None => {
                    self.bot
                        .send_message(&self.destination, &message.caption, Some(&message.control))
                        .await
                }
            }
        };

        match tokio::time::timeout(self.timeout, send).await {
            Ok(Ok(message_id)) => {
                tracing::info!(
                    destination = %self.destination,
                    message_id,
                    with_image = message.image.is_some(),
                    "Broadcast delivered"
                );
                Ok(message_id)
            }
            Ok(Err(e)) => {
                tracing::error!(destination = %self.destination, error = %e, "Broadcast failed");
                Err(e.into())
            }
            Err(_) => {
                tracing::error!(destination = %self.destination, timeout = ?self.timeout, "Broadcast timed out");
                Err(DispatchError::Timeout(self.timeout))
            }
        }
    }
}
