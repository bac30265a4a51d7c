use std::sync::Arc;

use line_onboard::config::BotConfig;
use line_onboard::line::client::{LineClient, ReplySender};
use line_onboard::onboarding::handler::EchoHandler;
use line_onboard::onboarding::router::OnboardingRouter;
use line_onboard::store::{LibSqlBackend, UserStore};
use line_onboard::webhook::routes::{WebhookState, webhook_routes};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = BotConfig::from_env()?;

    // ── Database ─────────────────────────────────────────────────────────
    let db_path = std::path::Path::new(&config.db_path);
    let store: Arc<dyn UserStore> = Arc::new(LibSqlBackend::new_local(db_path).await?);

    // ── Routing ──────────────────────────────────────────────────────────
    // EchoHandler is the placeholder for registered-user conversations;
    // the real message handler plugs in behind MessageHandler.
    let router = Arc::new(OnboardingRouter::new(
        Arc::clone(&store),
        Arc::new(EchoHandler),
    ));
    let sender: Arc<dyn ReplySender> =
        Arc::new(LineClient::new(config.channel_access_token.clone()));

    let state = WebhookState {
        channel_secret: config.channel_secret.clone(),
        router,
        sender,
    };
    let app = webhook_routes(state);

    eprintln!("🤖 line-onboard v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Webhook: http://0.0.0.0:{}/callback", config.port);
    eprintln!("   Database: {}", config.db_path);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;
    tracing::info!(port = config.port, "Webhook server started");
    axum::serve(listener, app).await?;

    Ok(())
}
