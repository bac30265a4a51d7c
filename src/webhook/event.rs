//! LINE webhook payload models.
//!
//! Only `message` events with text content are routed; every other event
//! and message kind deserializes into a catch-all variant and is skipped.

use serde::Deserialize;

/// Top-level webhook request body.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookRequest {
    /// Bot user id the events were sent to.
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub events: Vec<WebhookEvent>,
}

/// A single webhook event.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum WebhookEvent {
    Message(MessageEvent),
    /// Follow, unfollow, postback, and every other kind we don't route.
    #[serde(other)]
    Other,
}

/// A `message` event.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageEvent {
    pub reply_token: String,
    /// Event time, milliseconds since the Unix epoch.
    pub timestamp: i64,
    pub source: EventSource,
    pub message: MessageContent,
}

/// Who sent the event.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSource {
    #[serde(rename = "type")]
    pub kind: String,
    /// Absent for group/room events without user attribution.
    #[serde(default)]
    pub user_id: Option<String>,
}

/// The message carried by a `message` event.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum MessageContent {
    Text { text: String },
    /// Stickers, images, and other kinds we don't handle.
    #[serde(other)]
    Other,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_text_message_event() {
        let body = serde_json::json!({
            "destination": "Ubot",
            "events": [{
                "type": "message",
                "replyToken": "rt-1",
                "timestamp": 1_700_000_000_000i64,
                "source": {"type": "user", "userId": "U1"},
                "message": {"type": "text", "id": "m1", "text": "同意する"}
            }]
        });

        let request: WebhookRequest = serde_json::from_value(body).unwrap();
        assert_eq!(request.destination.as_deref(), Some("Ubot"));
        assert_eq!(request.events.len(), 1);

        let WebhookEvent::Message(event) = &request.events[0] else {
            panic!("expected message event");
        };
        assert_eq!(event.reply_token, "rt-1");
        assert_eq!(event.source.user_id.as_deref(), Some("U1"));
        let MessageContent::Text { text } = &event.message else {
            panic!("expected text content");
        };
        assert_eq!(text, "同意する");
    }

    #[test]
    fn unknown_event_kind_becomes_other() {
        let body = serde_json::json!({
            "events": [{"type": "follow", "replyToken": "rt-1"}]
        });
        let request: WebhookRequest = serde_json::from_value(body).unwrap();
        assert!(matches!(request.events[0], WebhookEvent::Other));
    }

    #[test]
    fn sticker_message_becomes_other_content() {
        let body = serde_json::json!({
            "events": [{
                "type": "message",
                "replyToken": "rt-1",
                "timestamp": 0,
                "source": {"type": "user", "userId": "U1"},
                "message": {"type": "sticker", "packageId": "1", "stickerId": "2"}
            }]
        });
        let request: WebhookRequest = serde_json::from_value(body).unwrap();
        let WebhookEvent::Message(event) = &request.events[0] else {
            panic!("expected message event");
        };
        assert!(matches!(event.message, MessageContent::Other));
    }

    #[test]
    fn group_source_without_user_id() {
        let body = serde_json::json!({
            "events": [{
                "type": "message",
                "replyToken": "rt-1",
                "timestamp": 0,
                "source": {"type": "group", "groupId": "G1"},
                "message": {"type": "text", "id": "m1", "text": "hi"}
            }]
        });
        let request: WebhookRequest = serde_json::from_value(body).unwrap();
        let WebhookEvent::Message(event) = &request.events[0] else {
            panic!("expected message event");
        };
        assert_eq!(event.source.user_id, None);
    }

    #[test]
    fn empty_body_has_no_events() {
        let request: WebhookRequest = serde_json::from_str("{}").unwrap();
        assert!(request.events.is_empty());
    }
}
