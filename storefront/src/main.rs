use storefront::{Config, Server, init_logger_with_file};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let _ = dotenvy::dotenv();

    let config = Config::from_env()?;
    init_logger_with_file(
        Some(&config.log_level),
        config.is_production(),
        config.log_dir.as_deref(),
    );

    tracing::info!(
        environment = %config.environment,
        version = env!("CARGO_PKG_VERSION"),
        "Storefront starting"
    );

    if let Err(e) = Server::new(config).run().await {
        tracing::error!("Server error: {e}");
        return Err(e.into());
    }

    Ok(())
}
