//! Consent-gated onboarding — routing, reply templates, and the handler seam.

pub mod handler;
pub mod replies;
pub mod router;

pub use handler::{EchoHandler, MessageHandler};
pub use router::OnboardingRouter;
