//! Fixed reply templates for the onboarding flow.

use crate::line::messages::ReplyMessage;

/// The exact text a new user must send to accept the terms.
///
/// Matched byte-for-byte: no trimming, case folding, or width
/// normalization. Anything else counts as "not consented".
pub const CONSENT_KEYWORD: &str = "同意する";

/// Reply asking an unregistered sender to agree to the terms.
pub fn agreement_message() -> ReplyMessage {
    ReplyMessage::text(
        "ご利用には利用規約への同意が必要です。\
         同意いただける場合は「同意する」と送信してください。",
    )
}

/// First half of the welcome, sent right after registration.
pub fn first_message() -> ReplyMessage {
    ReplyMessage::text("ご登録ありがとうございます！")
}

/// Second half of the welcome, sent after the first is accepted.
pub fn second_message() -> ReplyMessage {
    ReplyMessage::text("メニューから利用したい機能を選んでください。")
}
