//! LINE Messaging API client — delivers reply messages.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

use crate::error::TransportError;
use crate::line::messages::{ReplyMessage, ReplyRequest};

const LINE_API_BASE: &str = "https://api.line.me";

/// Abstraction over the reply transport.
///
/// The webhook routes depend on this trait so tests can record replies
/// instead of calling the real API.
#[async_trait]
pub trait ReplySender: Send + Sync {
    /// Send one reply call addressed to `reply_token`.
    async fn send_reply(
        &self,
        reply_token: &str,
        messages: Vec<ReplyMessage>,
    ) -> Result<(), TransportError>;
}

/// Client for the LINE Messaging API reply endpoint.
pub struct LineClient {
    access_token: SecretString,
    base_url: String,
    client: reqwest::Client,
}

impl LineClient {
    pub fn new(access_token: SecretString) -> Self {
        Self::with_base_url(access_token, LINE_API_BASE.to_string())
    }

    /// Point the client at a different API host (used by tests).
    pub fn with_base_url(access_token: SecretString, base_url: String) -> Self {
        Self {
            access_token,
            base_url,
            client: reqwest::Client::new(),
        }
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Issue one reply call for the given token.
    ///
    /// Callers needing several replies for one event issue sequential calls;
    /// the next call must not start before this one is accepted, so message
    /// order holds for the user.
    pub async fn reply(
        &self,
        reply_token: &str,
        messages: Vec<ReplyMessage>,
    ) -> Result<(), TransportError> {
        let request = ReplyRequest {
            reply_token: reply_token.to_string(),
            messages,
        };

        let resp = self
            .client
            .post(self.api_url("/v2/bot/message/reply"))
            .bearer_auth(self.access_token.expose_secret())
            .json(&request)
            .send()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(TransportError::Rejected { status, body });
        }

        tracing::debug!("Reply delivered");
        Ok(())
    }
}

#[async_trait]
impl ReplySender for LineClient {
    async fn send_reply(
        &self,
        reply_token: &str,
        messages: Vec<ReplyMessage>,
    ) -> Result<(), TransportError> {
        self.reply(reply_token, messages).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> LineClient {
        LineClient::new(SecretString::from("fake-token"))
    }

    #[test]
    fn api_url_joins_path() {
        let client = test_client();
        assert_eq!(
            client.api_url("/v2/bot/message/reply"),
            "https://api.line.me/v2/bot/message/reply"
        );
    }

    #[test]
    fn custom_base_url() {
        let client =
            LineClient::with_base_url(SecretString::from("t"), "http://127.0.0.1:9".to_string());
        assert_eq!(
            client.api_url("/v2/bot/message/reply"),
            "http://127.0.0.1:9/v2/bot/message/reply"
        );
    }

    // Network error test (no server listening on the target port).

    #[tokio::test]
    async fn reply_without_server_fails_with_request_error() {
        let client =
            LineClient::with_base_url(SecretString::from("t"), "http://127.0.0.1:9".to_string());
        let result = client
            .reply("rt-1", vec![ReplyMessage::text("hello")])
            .await;

        match result {
            Err(TransportError::Request(_)) => {}
            other => panic!("expected TransportError::Request, got {other:?}"),
        }
    }
}
