// src/main.rs
mod routes;
mod handlers;
mod models;
mod middleware;
mod state;
mod dtos; // expose DTO modules
mod error;
mod auth; // expose auth module
mod catalog;
mod config;
mod dispatch;
mod extract;
mod storage;
mod store;

use std::net::SocketAddr;
use std::sync::Arc;

use aws_config::{BehaviorVersion, Region};
use tracing_subscriber::EnvFilter;
use tokio::net::TcpListener;
use dotenvy::dotenv;

use crate::config::{AppConfig, StoreBackend};
use crate::storage::{MemoryObjectStore, ObjectStore, S3Store};
use crate::store::{DocumentStore, DynamoStore, MemoryStore};

async fn build_state(config: AppConfig) -> state::AppState {
    let (store, images): (Arc<dyn DocumentStore>, Arc<dyn ObjectStore>) = match config.backend {
        StoreBackend::DynamoDb => {
            let mut loader = aws_config::defaults(BehaviorVersion::latest());
            if let Some(region) = &config.aws_region {
                loader = loader.region(Region::new(region.clone()));
            }
            let sdk_config = loader.load().await;
            (
                Arc::new(DynamoStore::new(&sdk_config)),
                Arc::new(S3Store::new(&sdk_config)),
            )
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store; data is lost on restart");
            (
                Arc::new(MemoryStore::new(&config.tables)),
                Arc::new(MemoryObjectStore::new()),
            )
        }
    };
    state::AppState::new(store, images, config)
}

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match AppConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration");
            std::process::exit(1);
        }
    };
    let (host, base_port) = (config.host, config.port);

    // Create application state
    let app_state = build_state(config).await;
    let app = routes::build_app(app_state);

    // Try base_port..base_port+20 to avoid crash when address is in use
    let listener = {
        let mut bound = None;
        for offset in 0u16..=20 {
            let port = base_port.saturating_add(offset);
            let addr = SocketAddr::from((host, port));
            match TcpListener::bind(addr).await {
                Ok(l) => { bound = Some((l, addr)); break; }
                Err(e) => {
                    if offset == 0 { tracing::warn!(%addr, error=%e, "Port in use, trying next"); }
                }
            }
        }
        match bound {
            Some((l, addr)) => {
                tracing::info!("Server running on http://{}", addr);
                l
            }
            None => {
                tracing::error!("Failed to bind to any port starting at {} on {}", base_port, host);
                std::process::exit(1);
            }
        }
    };

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error=%e, "Server error");
        std::process::exit(1);
    }
}
