use clap::Parser;
use ingest_log::adapters::http;
use ingest_log::utils::{logger, validation::Validate};
use ingest_log::{CliArgs, FileSink, IngestService, Router};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    let config = match args.resolve() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    // 初始化日誌
    if config.json_logs() {
        logger::init_json_logger(args.verbose, config.logging.level.as_deref());
    } else {
        logger::init_cli_logger(args.verbose, config.logging.level.as_deref());
    }

    tracing::info!("Starting ingest-log {}", env!("CARGO_PKG_VERSION"));
    if args.verbose {
        tracing::debug!("Resolved config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let matrix_sink = FileSink::open(&config.logs.matrix_log)?;
    let timestamp_sink = FileSink::open(&config.logs.timestamp_log)?;
    tracing::info!("📁 Matrix log: {}", matrix_sink.path().display());
    tracing::info!("📁 Timestamp log: {}", timestamp_sink.path().display());

    let router = Arc::new(Router::new(IngestService::new(matrix_sink, timestamp_sink)));

    let addr = config.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    http::serve(listener, router, http::shutdown_signal()).await?;

    tracing::info!("✅ Server shutdown complete");
    Ok(())
}
