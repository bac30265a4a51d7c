//! LINE webhook intake — payload models and HTTP routes.

pub mod event;
pub mod routes;

pub use routes::{WebhookState, webhook_routes};
