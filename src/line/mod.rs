//! LINE Messaging API — outbound message types and reply client.

pub mod client;
pub mod messages;

pub use client::{LineClient, ReplySender};
pub use messages::ReplyMessage;
