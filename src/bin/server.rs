//! personkv Server Binary
//!
//! Starts the TCP server for personkv.

use std::sync::Arc;

use clap::Parser;
use personkv::network::Server;
use personkv::{Config, Engine};
use tracing_subscriber::{fmt, EnvFilter};

/// personkv Server
#[derive(Parser, Debug)]
#[command(name = "personkv-server")]
#[command(about = "Record store for person records keyed by CPF")]
#[command(version)]
struct Args {
    /// Record file (created on first insert)
    #[arg(short, long, default_value = "./people.bin")]
    store: String,

    /// Listen address (host:port)
    #[arg(short, long, default_value = "127.0.0.1:8080")]
    listen: String,

    /// Per-connection read timeout in milliseconds (0 = none)
    #[arg(long, default_value = "5000")]
    read_timeout_ms: u64,

    /// Per-connection write timeout in milliseconds (0 = none)
    #[arg(long, default_value = "5000")]
    write_timeout_ms: u64,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,personkv=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    let args = Args::parse();

    tracing::info!("personkv server v{}", personkv::VERSION);
    tracing::info!("Store file: {}", args.store);
    tracing::info!("Listen address: {}", args.listen);

    // Build config from args
    let config = Config::builder()
        .store_path(&args.store)
        .listen_addr(&args.listen)
        .read_timeout_ms(args.read_timeout_ms)
        .write_timeout_ms(args.write_timeout_ms)
        .build();

    // Open engine
    let engine = match Engine::open(config.clone()) {
        Ok(e) => Arc::new(e),
        Err(e) => {
            tracing::error!("Failed to open engine: {}", e);
            std::process::exit(1);
        }
    };

    let server = match Server::bind(config, engine) {
        Ok(server) => server,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", args.listen, e);
            std::process::exit(1);
        }
    };

    if let Err(e) = server.run() {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }

    tracing::info!("Server stopped");
}
