//! LINE webhook onboarding bot — signature gate, consent routing, replies.

pub mod config;
pub mod error;
pub mod line;
pub mod onboarding;
pub mod signature;
pub mod store;
pub mod webhook;
