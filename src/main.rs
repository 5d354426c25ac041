//! Water Dashboard Service - Main
//!
//! Captures the City of Cape Town water dashboard and either:
//! 1. Prints one snapshot as JSON to stdout, or
//! 2. Serves fresh snapshots over HTTP (`--endpoint PORT`)
//!
//! Usage:
//!   cargo run --release                    # Print one snapshot and exit
//!   cargo run --release -- --endpoint 8080 # Serve GET /dashboard on port 8080
//!
//! Environment:
//!   COCT_DASHBOARD_URL - override the dashboard page URL
//!   COCT_TIMEOUT_SECS  - override the 30 s request timeout
//!   RUST_LOG           - log filter (default: info); logs go to stderr

use dayzero_service::capture::Capturer;
use dayzero_service::config::{self, SourceConfig};
use dayzero_service::endpoint;
use std::env;
use std::process;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() {
    dotenv::dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // Parse command-line arguments
    let args: Vec<String> = env::args().collect();
    let mut endpoint_port: Option<u16> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--endpoint" => match args.get(i + 1).and_then(|p| p.parse().ok()) {
                Some(port) => {
                    endpoint_port = Some(port);
                    i += 2;
                }
                None => {
                    eprintln!("Error: --endpoint requires a port number");
                    process::exit(1);
                }
            },
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                eprintln!("Usage: {} [--endpoint PORT]", args[0]);
                process::exit(1);
            }
        }
    }

    let source = SourceConfig::from_env().unwrap_or_else(|e| {
        error!(error = %e, "invalid source configuration");
        process::exit(1);
    });

    let projects = config::load_default_projects().unwrap_or_else(|e| {
        error!(error = %e, "failed to load project registry");
        process::exit(1);
    });

    info!(
        url = %source.url,
        timeout_secs = source.timeout.as_secs(),
        projects = projects.len(),
        "configuration loaded"
    );

    let capturer = Capturer::new(source, projects).unwrap_or_else(|e| {
        error!(error = %e, "failed to initialise HTTP client");
        process::exit(1);
    });

    if let Some(port) = endpoint_port {
        if let Err(e) = endpoint::start_endpoint_server(port, capturer) {
            error!(error = %e, "endpoint server error");
            process::exit(1);
        }
        return;
    }

    let snapshot = capturer.capture().unwrap_or_else(|e| {
        error!(error = %e, "failed to fetch water dashboard");
        process::exit(1);
    });

    match serde_json::to_string_pretty(&snapshot) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            error!(error = %e, "failed to serialize snapshot");
            process::exit(1);
        }
    }
}
