use news_service::{config::NewsConfig, services::init_metrics, Application};
use service_core::error::AppError;
use service_core::observability::init_tracing;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Load configuration - fail fast if invalid
    let config = NewsConfig::from_env()?;

    init_tracing(
        &config.service_name,
        &config.common.log_level,
        config.common.otlp_endpoint.as_deref(),
    )?;

    init_metrics()?;

    tracing::info!(
        service = %config.service_name,
        version = %config.service_version,
        redis_host = %config.redis.host,
        redis_port = config.redis.port,
        "Starting news service"
    );

    let application = Application::build(config).await?;
    application.run_until_stopped().await
}
