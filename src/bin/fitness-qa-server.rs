// ABOUTME: Server binary for the fitness coach Q&A service
// ABOUTME: Loads configuration, initializes logging, and runs the HTTP server
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Fitness QA Server Binary
//!
//! Starts the HTTP service. The upstream API credential is read from the
//! environment; when it is absent the server still starts, in degraded
//! mode, so the informational endpoints stay reachable.

use anyhow::Result;
use clap::Parser;
use fitness_qa_server::{config::ServerConfig, logging, server, server::ServerResources};
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "fitness-qa-server")]
#[command(about = "AI fitness coach Q&A service backed by a chat completion API")]
struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env();
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }

    logging::init_from_env()?;

    info!("{}", config.summary());

    let resources = Arc::new(ServerResources::from_config(config)?);

    server::serve(resources).await
}
