//! Onboarding router — the consent-gated two-state flow.
//!
//! Each sender is either Unknown (no user row) or Known. Unknown senders
//! must send the consent keyword before a user row is created; Known
//! senders are delegated to the external [`MessageHandler`].

use std::sync::Arc;

use crate::error::Result;
use crate::line::messages::ReplyMessage;
use crate::onboarding::handler::MessageHandler;
use crate::onboarding::replies::{
    CONSENT_KEYWORD, agreement_message, first_message, second_message,
};
use crate::store::UserStore;

/// Routes one inbound text message to its replies.
pub struct OnboardingRouter {
    store: Arc<dyn UserStore>,
    handler: Arc<dyn MessageHandler>,
}

impl OnboardingRouter {
    pub fn new(store: Arc<dyn UserStore>, handler: Arc<dyn MessageHandler>) -> Self {
        Self { store, handler }
    }

    /// Decide the replies for one message from `sender_id`.
    ///
    /// Each returned message is one outbound reply call; the caller must
    /// send them sequentially, in order. Store and handler failures
    /// propagate — no retries, no partial-state cleanup.
    pub async fn route(&self, sender_id: &str, text: &str) -> Result<Vec<ReplyMessage>> {
        match self.store.get_user_id(sender_id).await? {
            None => {
                if text == CONSENT_KEYWORD {
                    let user_id = self.store.create_user(sender_id).await?;
                    tracing::info!(sender_id = %sender_id, user_id, "User registered");
                    Ok(vec![first_message(), second_message()])
                } else {
                    tracing::debug!(sender_id = %sender_id, "Unregistered sender, awaiting consent");
                    Ok(vec![agreement_message()])
                }
            }
            Some(user_id) => {
                let reply = self.handler.handle(user_id, text).await?;
                Ok(vec![reply])
            }
        }
    }
}
