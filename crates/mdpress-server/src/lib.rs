//! HTTP server for the mdpress PDF rendition engine.
//!
//! Serves a directory of markdown documents as on-demand PDF renditions:
//! any `GET` path maps to a markdown file under the content root, which
//! is expanded, composed into a styled document tree and rendered to a
//! PDF byte stream per request. Failures of any kind produce a valid
//! not-found PDF with status 404 rather than an HTTP error body.
//!
//! # Quick Start
//!
//! ```ignore
//! use std::path::PathBuf;
//! use mdpress_server::{ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig {
//!         host: "127.0.0.1".to_string(),
//!         port: 3000,
//!         source_dir: PathBuf::from("content"),
//!         public_url: "http://localhost:3000".to_string(),
//!         ..ServerConfig::default()
//!     };
//!
//!     run_server(config).await.unwrap();
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! Client ──HTTP──► axum router (mdpress-server)
//!                      │
//!                      └─► page handler
//!                              │
//!                              ├─► tokio::fs read ──► NavExpander
//!                              ├─► tokenize ──► transduce (mdpress-compose)
//!                              └─► render (mdpress-pdf) ──► PDF bytes
//! ```

mod app;
mod error;
mod handlers;
mod middleware;
mod state;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use mdpress_compose::{NavExpander, StyleSheet};
use mdpress_pdf::PageSize;
use state::AppState;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Markdown content source directory.
    pub source_dir: PathBuf,
    /// Public base URL used in generated navigation links.
    pub public_url: String,
    /// Page size for content documents.
    pub page_size: PageSize,
    /// Page size for the not-found document.
    pub not_found_page_size: PageSize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            source_dir: PathBuf::from("content"),
            public_url: "http://localhost:3000".to_string(),
            page_size: PageSize::Letter,
            not_found_page_size: PageSize::A4,
        }
    }
}

/// Run the server.
///
/// # Arguments
///
/// * `config` - Server configuration
///
/// # Errors
///
/// Returns an error if the server fails to start.
pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    // Style definitions are built once and shared read-only by every request
    let state = Arc::new(AppState {
        nav: NavExpander::new(config.source_dir.clone(), config.public_url.clone()),
        styles: StyleSheet::default(),
        content_root: config.source_dir.clone(),
        page_size: config.page_size,
        not_found_page_size: config.not_found_page_size,
    });

    let app = app::create_router(state);

    let addr = SocketAddr::from_str(&format!("{}:{}", config.host, config.port))?;
    tracing::info!(address = %addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Create server configuration from mdpress config.
#[must_use]
pub fn server_config_from_config(config: &mdpress_config::Config) -> ServerConfig {
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        source_dir: config.content_resolved.source_dir.clone(),
        public_url: config.content_resolved.public_url.clone(),
        page_size: PageSize::from_name(&config.page.size).unwrap_or_default(),
        not_found_page_size: PageSize::from_name(&config.page.not_found_size)
            .unwrap_or(PageSize::A4),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 3000);
        assert_eq!(config.page_size, PageSize::Letter);
        assert_eq!(config.not_found_page_size, PageSize::A4);
    }

    #[test]
    fn test_server_config_from_config() {
        let config = mdpress_config::Config::load(None, None).unwrap();
        let server_config = server_config_from_config(&config);
        assert_eq!(server_config.port, config.server.port);
        assert_eq!(server_config.page_size, PageSize::Letter);
        assert_eq!(server_config.not_found_page_size, PageSize::A4);
    }
}
