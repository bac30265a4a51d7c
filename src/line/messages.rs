//! Outbound message models for the LINE reply endpoint.

use serde::{Deserialize, Serialize};

/// A single outbound message object.
///
/// This service only produces text messages; richer kinds (stickers,
/// flex messages) are out of scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ReplyMessage {
    Text { text: String },
}

impl ReplyMessage {
    /// Build a text message.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }
}

/// Body of one `POST /v2/bot/message/reply` call.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyRequest {
    pub reply_token: String,
    pub messages: Vec<ReplyMessage>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_message_wire_format() {
        let msg = ReplyMessage::text("hello");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json, serde_json::json!({"type": "text", "text": "hello"}));
    }

    #[test]
    fn reply_request_wire_format() {
        let req = ReplyRequest {
            reply_token: "rt-1".to_string(),
            messages: vec![ReplyMessage::text("a"), ReplyMessage::text("b")],
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["replyToken"], "rt-1");
        assert_eq!(json["messages"].as_array().unwrap().len(), 2);
        assert_eq!(json["messages"][0]["text"], "a");
        assert_eq!(json["messages"][1]["text"], "b");
    }
}
