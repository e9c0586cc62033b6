use todo_api::{
    config::AppConfig,
    domain::repository::TodoRepository,
    http::{routes::todos, routing},
    infrastructure::{seed, sqlite_repo::SqliteTodoRepository},
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env()?;
    let repo = SqliteTodoRepository::connect(&config.database_url, config.max_connections).await?;
    let result = run(&config, repo.clone()).await;
    repo.close().await;
    tracing::info!("database pool closed");
    result
}

async fn run(config: &AppConfig, repo: SqliteTodoRepository) -> anyhow::Result<()> {
    repo.init().await?;
    if config.seed_on_start {
        seed::seed(&repo).await?;
    }
    let router = routing::app(todos::router(todos::AppState { repo }));

    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "listening");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    use tokio::signal::ctrl_c;
    let _ = ctrl_c().await;
    tracing::info!("shutdown");
}
