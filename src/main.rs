use lynkly::config::{self, Config};
use lynkly::server;
use tracing_subscriber::EnvFilter;

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    if config.log_format == "json" {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = match config::load_from_env() {
        Ok(config) => config,
        Err(e) => {
            init_tracing(&Config::default());
            tracing::error!("Invalid configuration: {:#}", e);
            std::process::exit(1);
        }
    };

    init_tracing(&config);
    tracing::info!("Starting lynkly {}", env!("CARGO_PKG_VERSION"));
    config.print_summary();

    if let Err(e) = server::run(config).await {
        tracing::error!("Fatal: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}
