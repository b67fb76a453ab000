use metrics_exporter_prometheus::PrometheusBuilder;
use pod_readiness::ReadinessStore;
use pod_readiness_http::config::{Config, log_filter_with};
use pod_readiness_http::shutdown::shutdown_signal;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // `POD_READINESS_LOG_LEVEL`, then `RUST_LOG`, then `info`.
    let log_env = log_filter_with(|k| std::env::var(k).ok());
    let env_filter = tracing_subscriber::EnvFilter::try_new(&log_env)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .compact()
        .with_ansi(false)
        .with_target(false)
        .with_env_filter(env_filter)
        .init();
    tracing::info!(%log_env, "pod-readiness: log filter");

    let config = Config::from_env()?;
    let handle = PrometheusBuilder::new().install_recorder()?;

    let store = ReadinessStore::new(config.mode);
    let app = pod_readiness_http::app(store, handle, &config);

    let addr = config.address;
    info!(
        %addr,
        mode = %config.mode,
        max_body_bytes = config.max_body_size,
        "starting HTTP server"
    );

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!("Failed to bind to address {addr}: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = pod_readiness_http::serve(listener, app, shutdown_signal()).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }

    info!("server stopped");
    Ok(())
}
