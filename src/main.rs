use adaptive_recommender::{create_router, services::Recommender, store, AppState, Config};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;

    // Load the interaction dataset once; it is read-only from here on
    let store = store::load_from_dir(&config.data_dir).await?;
    let recommender = Recommender::new(config.engine_settings());

    let app = create_router(AppState::new(store, recommender));

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(address = %address, "Server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
