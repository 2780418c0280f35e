use country_registry::{config, server, telemetry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = match config::load_from_env() {
        Ok(config) => config,
        Err(e) => {
            telemetry::init_fallback("info");
            tracing::error!("Invalid configuration: {e:#}");
            return Err(e);
        }
    };

    telemetry::init(&config);
    config.print_summary();

    server::run(config).await
}
