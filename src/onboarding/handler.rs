//! The delegated message handler — everything that is not onboarding.

use async_trait::async_trait;

use crate::error::HandlerError;
use crate::line::messages::ReplyMessage;

/// Black-box handler for messages from registered users.
///
/// The onboarding router only decides whether a sender is registered; the
/// actual conversation logic lives behind this trait and produces exactly
/// one reply per message.
#[async_trait]
pub trait MessageHandler: Send + Sync {
    /// Produce the reply for a registered user's message.
    async fn handle(&self, user_id: i64, text: &str) -> Result<ReplyMessage, HandlerError>;
}

/// Default handler — echoes the user's message back.
pub struct EchoHandler;

#[async_trait]
impl MessageHandler for EchoHandler {
    async fn handle(&self, _user_id: i64, text: &str) -> Result<ReplyMessage, HandlerError> {
        Ok(ReplyMessage::text(text))
    }
}
