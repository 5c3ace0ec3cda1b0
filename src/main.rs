use decap_nexus::config::Config;
use decap_nexus::db::{self, ConnectionSpec};
use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cfg = &decap_nexus::config::CONFIG;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(
        github_api_url = %cfg.github_api_url,
        cms_bundle_url = %cfg.cms_bundle_url,
        repository_prefix_mode = ?cfg.repository_prefix_mode,
        loglevel = %cfg.loglevel
    );

    let descriptor = Config::platform_descriptor();
    let spec = ConnectionSpec::resolve(descriptor.as_deref(), &cfg.database_url)?;
    let store = db::open(&spec).await?;

    let state = decap_nexus::NexusState::new(store, cfg)?;
    let app = decap_nexus::nexus_router(state);

    let listener = TcpListener::bind(cfg.listen_addr.as_str()).await?;
    info!("HTTP server listening on {}", cfg.listen_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
