use std::process::ExitCode;

use tokio::sync::mpsc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use tube_bridge::bridge::{Bridge, Ready, StatusSource};
use tube_bridge::config::BridgeConfig;
use tube_bridge::device::{JsonLinesTransport, TimeoutTransport};
use tube_bridge::tfl::{MockTflClient, TflClient};

#[tokio::main]
async fn main() -> ExitCode {
    // Messages go to stdout, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match BridgeConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    match &config.mock_file {
        Some(path) => match MockTflClient::new(path) {
            Ok(source) => {
                info!(
                    path = %path.display(),
                    lines = source.line_count(),
                    "serving saved line status"
                );
                serve(source, &config).await
            }
            Err(e) => {
                error!(error = %e, "failed to load mock data");
                return ExitCode::FAILURE;
            }
        },
        None => match TflClient::new(config.tfl.clone()) {
            Ok(source) => serve(source, &config).await,
            Err(e) => {
                error!(error = %e, "failed to create TfL client");
                return ExitCode::FAILURE;
            }
        },
    }

    ExitCode::SUCCESS
}

/// Run the bridge for this session: one readiness trigger, one run.
async fn serve<S: StatusSource>(source: S, config: &BridgeConfig) {
    let transport = TimeoutTransport::new(
        JsonLinesTransport::new(tokio::io::stdout()),
        config.send_timeout,
    );
    let mut bridge = Bridge::new(source, transport);

    let (tx, rx) = mpsc::channel(1);
    // The watch app signals readiness once per session
    if tx.send(Ready).await.is_err() {
        return;
    }
    drop(tx);

    bridge.serve(rx).await;
}
