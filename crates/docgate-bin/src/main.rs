use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use docgate_lib::{config::Settings, router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&settings.log_level).unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Fatal if the first refresh fails while protection is configured
    let state = Arc::new(AppState::from_settings(settings).await?);

    let app = router::create_router(state.clone());

    let listener = TcpListener::bind(&state.settings.bind_addr).await?;
    tracing::info!(
        addr = %state.settings.bind_addr,
        protected = state.gate.is_protected(),
        "accepting connections"
    );

    axum::serve(listener, app).await?;

    Ok(())
}
