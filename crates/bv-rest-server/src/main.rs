// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Branchview REST API server binary

use bv_rest_server::{Server, ServerConfig};
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Bind address for the server
    #[arg(short, long, default_value = "127.0.0.1:3001")]
    bind: SocketAddr,

    /// Enable permissive CORS for development
    #[arg(long)]
    cors: bool,

    /// Root directory offered by the browse endpoint
    #[arg(long)]
    browse_root: Option<PathBuf>,

    /// Report zero-change diff entries as "unchanged" instead of "deleted"
    #[arg(long)]
    classify_unchanged: bool,

    /// Log filter directive (overridden by RUST_LOG)
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(args.log_level.clone()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!("Starting Branchview REST API server");

    let config = ServerConfig {
        bind_addr: args.bind,
        enable_cors: args.cors,
        browse_root: args.browse_root,
        classify_unchanged: args.classify_unchanged,
    };

    let server = Server::new(config);
    server.run().await?;

    Ok(())
}
