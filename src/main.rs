use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod enhance;
mod error;
mod server;
mod storage;

#[derive(Parser, Debug)]
#[command(name = "revela-server")]
#[command(about = "Image enhancement server with auto-enhance and preset profiles")]
#[command(version)]
pub struct Args {
    /// Host address to bind to
    #[arg(long, env = "REVELA_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "REVELA_PORT", default_value = "8200")]
    pub port: u16,

    /// Directory holding the uploads/, processed/ and previews/ folders
    #[arg(long, env = "REVELA_DATA_DIR", default_value = "data")]
    pub data_dir: String,

    /// Maximum upload size in bytes (default: 50MB)
    #[arg(long, env = "REVELA_MAX_FILE_SIZE", default_value = "52428800")]
    pub max_file_size: usize,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| args.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = config::Config::from(args);

    tracing::info!("Starting revela-server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Data directory: {}", config.data_dir.display());
    tracing::info!("Binding to {}:{}", config.host, config.port);

    server::run(config).await
}
