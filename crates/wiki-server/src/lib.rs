//! HTTP server for the wiki.
//!
//! This crate provides an axum server exposing the wiki's page routes:
//! - `/view/{title}` shows a page, or redirects to its edit form when missing
//! - `/edit/{title}` shows the edit form (the front page is not editable)
//! - `/save/{title}` stores the submitted `body` field
//! - `/create/` normalises a submitted `title` and redirects to its edit form
//! - `/` lists every page except the front page
//!
//! # Quick Start
//!
//! ```ignore
//! use std::path::PathBuf;
//! use wiki_server::{ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig {
//!         data_dir: PathBuf::from("data"),
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
//! Browser ──HTTP──► axum router (wiki-server)
//!                        │
//!                        ├─► RoutePattern ──► (operation, title) or 404
//!                        │
//!                        ├─► PageService ──► Storage (wiki-storage-fs)
//!                        │
//!                        └─► Renderer (minijinja) or 302 redirect
//! ```

mod app;
mod error;
mod handlers;
mod middleware;
mod render;
mod route;
mod service;
mod state;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use wiki_config::{Config, ConfigError};
use wiki_storage::{Storage, Title};
use wiki_storage_fs::FsStorage;

use render::Renderer;
use service::PageService;
use state::AppState;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Directory holding page files.
    pub data_dir: PathBuf,
    /// Reserved front-page title.
    pub front_page: Title,
    /// Directory with template overrides (`None` uses built-in templates).
    pub templates_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 8080,
            data_dir: PathBuf::from("data"),
            front_page: Title::parse("FrontPage").expect("default front page title is valid"),
            templates_dir: None,
        }
    }
}

/// Run the server.
///
/// Creates the data directory if needed, then serves until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the data directory or templates cannot be prepared,
/// or the server fails to bind.
pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let fs_storage = FsStorage::new(config.data_dir.clone());
    fs_storage.ensure_root()?;
    let storage: Arc<dyn Storage> = Arc::new(fs_storage);

    let renderer = Renderer::new(config.templates_dir.as_deref())?;
    let pages = PageService::new(storage, config.front_page.clone());
    let state = Arc::new(AppState::new(pages, renderer));

    let app = app::create_router(state);

    let addr = SocketAddr::from_str(&format!("{}:{}", config.host, config.port))?;
    tracing::info!(
        address = %addr,
        data_dir = %config.data_dir.display(),
        "Starting server"
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl-C, running until killed");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Create server configuration from wiki config.
///
/// # Errors
///
/// Returns `ConfigError::Validation` if the configured front-page title is invalid.
pub fn server_config_from_wiki_config(config: &Config) -> Result<ServerConfig, ConfigError> {
    Ok(ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        data_dir: config.storage_resolved.data_dir.clone(),
        front_page: config.wiki_resolved.front_page_title()?,
        templates_dir: config.wiki_resolved.templates_dir.clone(),
    })
}
