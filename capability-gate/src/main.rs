//! Capability gate - serves the chat.params hook over HTTP or applies it once over stdio.

use std::env;
use std::io;
use std::path::Path;
use std::sync::Arc;

use capability_gate::{app, gate_from_config, stdio, AppState, Config};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn print_version() {
    println!("capability-gate {}", VERSION);
}

fn print_usage() {
    eprintln!("usage: capability-gate [--config <path>] [serve | apply | --version]");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().skip(1).collect();
    if args.iter().any(|a| a == "--version" || a == "-V") {
        print_version();
        return Ok(());
    }

    // Logs go to stderr so one-shot output on stdout stays clean JSON.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config_path = match args.iter().position(|a| a == "--config") {
        Some(i) => match args.get(i + 1) {
            Some(path) => Some(path.clone()),
            None => {
                print_usage();
                return Err("--config requires a path".into());
            }
        },
        None => None,
    };
    let command = args
        .iter()
        .enumerate()
        .find(|(i, a)| !a.starts_with('-') && (*i == 0 || args[i - 1] != "--config"))
        .map(|(_, a)| a.as_str());

    let config = match &config_path {
        Some(path) => Config::load_file(Path::new(path)),
        None => Config::load(),
    }
    .map_err(|e| format!("Failed to load configuration: {}", e))?;

    let gate = gate_from_config(&config);
    if gate.policy().supported_models.is_empty() {
        tracing::warn!("gate.supported_models is empty, no request will be upgraded");
    }

    match command {
        Some("apply") => {
            let decision = stdio::apply_stream(&gate, io::stdin().lock(), io::stdout().lock())?;
            tracing::debug!(decision = %decision, "Applied gate to stdin payload");
            Ok(())
        }
        None | Some("serve") => {
            tracing::info!(
                provider_id = %config.gate.provider_id,
                feature_token = %config.gate.feature_token,
                patterns = config.gate.supported_models.len(),
                diagnostics = config.diagnostics.enabled,
                "Starting capability-gate"
            );

            let addr = format!("{}:{}", config.api.host, config.api.port);
            let state = Arc::new(AppState::new(config, gate));
            let app = app(state);

            tracing::info!("Listening on {}", addr);
            let listener = TcpListener::bind(&addr).await?;
            axum::serve(listener, app).await?;
            Ok(())
        }
        Some(other) => {
            print_usage();
            Err(format!("unknown command: {}", other).into())
        }
    }
}
