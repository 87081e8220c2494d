//! `wiki serve` command implementation.

use std::path::PathBuf;

use clap::Args;
use wiki_config::{CliSettings, Config};
use wiki_server::{run_server, server_config_from_wiki_config};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the serve command.
#[derive(Args)]
pub(crate) struct ServeArgs {
    /// Path to configuration file (default: auto-discover wiki.toml).
    #[arg(short, long, env = "WIKI_CONFIG")]
    config: Option<PathBuf>,

    /// Directory holding page files (overrides config).
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Host to bind to (overrides config).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to (overrides config).
    #[arg(short, long)]
    port: Option<u16>,

    /// Reserved front-page title (overrides config).
    #[arg(long)]
    front_page: Option<String>,

    /// Enable verbose output (request and storage logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl ServeArgs {
    /// Execute the serve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the server fails to start.
    pub(crate) async fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = Config::load(self.config.as_deref(), Some(&self.cli_settings()))?;

        output.serving(&config.server.host, config.server.port);
        output.setting("Data", config.storage_resolved.data_dir.display());
        output.setting("Front page", &config.wiki_resolved.front_page);
        match &config.wiki_resolved.templates_dir {
            Some(dir) => output.setting("Templates", dir.display()),
            None => output.setting("Templates", "built-in"),
        }

        let server_config = server_config_from_wiki_config(&config)?;
        run_server(server_config)
            .await
            .map_err(|e| CliError::Server(e.to_string()))?;

        Ok(())
    }

    /// Build config overrides from the command-line flags.
    pub(crate) fn cli_settings(&self) -> CliSettings {
        CliSettings {
            host: self.host.clone(),
            port: self.port,
            data_dir: self.data_dir.clone(),
            front_page: self.front_page.clone(),
        }
    }
}
