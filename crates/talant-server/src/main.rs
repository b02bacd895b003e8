//! # talant-server
//!
//! HTTP front end for the Talant profile store.
//!
//! This binary provides:
//! - **Profile CRUD** for the authenticated owner (one profile each)
//! - **Search and statistics** over every stored profile
//! - **Photo upload and serving** backed by the attachment directory
//!
//! Callers authenticate with session JWTs signed by the external auth
//! service; only the shared verification secret is configured here.

mod api;
mod auth;
mod config;
mod error;

use std::sync::Arc;

use talant_store::ProfileStore;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::api::AppState;
use crate::auth::SessionVerifier;
use crate::config::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // -----------------------------------------------------------------------
    // 1. Initialize tracing (respects RUST_LOG env var)
    // -----------------------------------------------------------------------
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                EnvFilter::new("info,talant_server=debug,talant_store=debug")
            }),
        )
        .init();

    info!(
        "Starting {} server v{}",
        talant_shared::constants::APP_NAME,
        env!("CARGO_PKG_VERSION")
    );

    // -----------------------------------------------------------------------
    // 2. Load configuration
    // -----------------------------------------------------------------------
    let config = ServerConfig::from_env();
    info!(?config, "Loaded configuration");

    // -----------------------------------------------------------------------
    // 3. Open the profile store (creates the document if missing)
    // -----------------------------------------------------------------------
    let store = Arc::new(
        ProfileStore::new(config.profile_document.clone(), config.upload_dir.clone())
            .with_max_photo_size(config.max_photo_size),
    );
    let records = tokio::task::spawn_blocking({
        let store = store.clone();
        move || store.load()
    })
    .await??;
    info!(
        profiles = records.len(),
        document = %config.profile_document.display(),
        "Profile store ready"
    );

    let verifier = Arc::new(SessionVerifier::new(&config.jwt_secret));
    if !verifier.is_configured() {
        tracing::warn!("JWT_SECRET not set, every authenticated request will be rejected");
    }

    let app_state = AppState {
        store,
        verifier,
        config: Arc::new(config.clone()),
    };

    // -----------------------------------------------------------------------
    // 4. Run the HTTP API server (blocks until shutdown)
    // -----------------------------------------------------------------------
    tokio::select! {
        result = api::serve(app_state, config.http_addr) => {
            if let Err(e) = result {
                tracing::error!(error = %e, "HTTP server failed");
                return Err(e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down");
        }
    }

    Ok(())
}
