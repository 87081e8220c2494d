//! Configuration management for the wiki server.
//!
//! Parses `wiki.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! `server.host` supports environment variable expansion (`$VAR` or `${VAR}`);
//! referencing an unset variable is an error.

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};
use wiki_storage::Title;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override server host.
    pub host: Option<String>,
    /// Override server port.
    pub port: Option<u16>,
    /// Override page storage directory.
    pub data_dir: Option<PathBuf>,
    /// Override reserved front-page title.
    pub front_page: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "wiki.toml";

/// Default reserved front-page title.
const DEFAULT_FRONT_PAGE: &str = "FrontPage";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Storage configuration (paths are relative strings from TOML).
    storage: StorageConfigRaw,
    /// Wiki configuration (paths are relative strings from TOML).
    wiki: WikiConfigRaw,

    /// Resolved storage configuration (set after loading).
    #[serde(skip)]
    pub storage_resolved: StorageConfig,
    /// Resolved wiki configuration (set after loading).
    #[serde(skip)]
    pub wiki_resolved: WikiConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Server configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 8080,
        }
    }
}

/// Raw storage configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct StorageConfigRaw {
    data_dir: Option<String>,
}

/// Resolved storage configuration with absolute paths.
#[derive(Debug, Default)]
pub struct StorageConfig {
    /// Directory holding one `<title>.txt` file per page.
    pub data_dir: PathBuf,
}

/// Raw wiki configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct WikiConfigRaw {
    front_page: Option<String>,
    templates_dir: Option<String>,
}

/// Resolved wiki configuration.
#[derive(Debug)]
pub struct WikiConfig {
    /// Reserved front-page title.
    pub front_page: String,
    /// Directory with `view.html`, `edit.html`, `frontpage.html` overriding
    /// the built-in templates.
    pub templates_dir: Option<PathBuf>,
}

impl Default for WikiConfig {
    fn default() -> Self {
        Self {
            front_page: DEFAULT_FRONT_PAGE.to_owned(),
            templates_dir: None,
        }
    }
}

impl WikiConfig {
    /// Front-page title as a validated [`Title`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if `front_page` is not alphanumeric.
    pub fn front_page_title(&self) -> Result<Title, ConfigError> {
        Title::parse(&self.front_page).map_err(|_| {
            ConfigError::Validation(format!(
                "wiki.front_page must match [A-Za-z0-9]+, got {:?}",
                self.front_page
            ))
        })
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`server.host`").
        field: String,
        /// Error message from the expander.
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `wiki.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values. The merged result
    /// is validated last.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the merged configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;
        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(host) = &settings.host {
            self.server.host.clone_from(host);
        }
        if let Some(port) = settings.port {
            self.server.port = port;
        }
        if let Some(data_dir) = &settings.data_dir {
            self.storage_resolved.data_dir.clone_from(data_dir);
        }
        if let Some(front_page) = &settings.front_page {
            self.wiki_resolved.front_page.clone_from(front_page);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            server: ServerConfig::default(),
            storage: StorageConfigRaw::default(),
            wiki: WikiConfigRaw::default(),
            storage_resolved: StorageConfig {
                data_dir: base.join("data"),
            },
            wiki_resolved: WikiConfig::default(),
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_server()?;
        self.wiki_resolved.front_page_title()?;
        Ok(())
    }

    /// Validate server configuration.
    fn validate_server(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.server.host, "server.host")?;

        if self.server.port == 0 {
            return Err(ConfigError::Validation(
                "server.port cannot be 0".to_owned(),
            ));
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.server.host = expand::expand_env(&self.server.host, "server.host")?;
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.storage_resolved = StorageConfig {
            data_dir: config_dir.join(self.storage.data_dir.as_deref().unwrap_or("data")),
        };

        self.wiki_resolved = WikiConfig {
            front_page: self
                .wiki
                .front_page
                .clone()
                .unwrap_or_else(|| DEFAULT_FRONT_PAGE.to_owned()),
            templates_dir: self.wiki.templates_dir.as_deref().map(|d| config_dir.join(d)),
        };
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(
            config.storage_resolved.data_dir,
            PathBuf::from("/test/data")
        );
        assert_eq!(config.wiki_resolved.front_page, "FrontPage");
        assert!(config.wiki_resolved.templates_dir.is_none());
        config.validate().unwrap();
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_parse_server_config() {
        let toml = r#"
[server]
host = "0.0.0.0"
port = 9000
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9000);
    }

    #[test]
    fn test_parse_unknown_type_fails() {
        let toml = r#"
[server]
port = "eighty"
"#;
        let result: Result<Config, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn test_resolve_paths() {
        let toml = r#"
[storage]
data_dir = "pages"

[wiki]
front_page = "Home"
templates_dir = "tmpl"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.storage_resolved.data_dir,
            PathBuf::from("/project/pages")
        );
        assert_eq!(config.wiki_resolved.front_page, "Home");
        assert_eq!(
            config.wiki_resolved.templates_dir,
            Some(PathBuf::from("/project/tmpl"))
        );
    }

    #[test]
    fn test_resolve_paths_defaults() {
        let mut config: Config = toml::from_str("").unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.storage_resolved.data_dir,
            PathBuf::from("/project/data")
        );
        assert_eq!(config.wiki_resolved.front_page, "FrontPage");
    }

    #[test]
    fn test_validate_rejects_invalid_front_page() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.wiki_resolved.front_page = "../Front Page".to_owned();

        let err = config.validate().unwrap_err();

        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("wiki.front_page"));
    }

    #[test]
    fn test_validate_rejects_port_zero() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.server.port = 0;

        let err = config.validate().unwrap_err();

        assert!(err.to_string().contains("server.port"));
    }

    #[test]
    fn test_validate_rejects_empty_host() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.server.host = String::new();

        let err = config.validate().unwrap_err();

        assert!(err.to_string().contains("server.host cannot be empty"));
    }

    #[test]
    fn test_front_page_title() {
        let config = Config::default_with_base(Path::new("/test"));

        let title = config.wiki_resolved.front_page_title().unwrap();

        assert_eq!(title.as_str(), "FrontPage");
    }

    #[test]
    fn test_apply_cli_settings_host_and_port() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            host: Some("0.0.0.0".to_owned()),
            port: Some(9000),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9000);
        assert_eq!(
            config.storage_resolved.data_dir,
            PathBuf::from("/test/data")
        ); // Unchanged
    }

    #[test]
    fn test_apply_cli_settings_data_dir_and_front_page() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            data_dir: Some(PathBuf::from("/srv/wiki")),
            front_page: Some("Home".to_owned()),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.storage_resolved.data_dir, PathBuf::from("/srv/wiki"));
        assert_eq!(config.wiki_resolved.front_page, "Home");
        assert_eq!(config.server.port, 8080); // Unchanged
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let config_before = Config::default_with_base(Path::new("/test"));
        let mut config = Config::default_with_base(Path::new("/test"));

        config.apply_cli_settings(&CliSettings::default());

        assert_eq!(config.server.host, config_before.server.host);
        assert_eq!(config.server.port, config_before.server.port);
        assert_eq!(
            config.storage_resolved.data_dir,
            config_before.storage_resolved.data_dir
        );
        assert_eq!(
            config.wiki_resolved.front_page,
            config_before.wiki_resolved.front_page
        );
    }

    #[test]
    fn test_load_explicit_missing_file() {
        let result = Config::load(Some(Path::new("/nonexistent/wiki.toml")), None);

        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_explicit_file_resolves_relative_to_config() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("wiki.toml");
        std::fs::write(
            &path,
            r#"
[server]
port = 9090

[storage]
data_dir = "pages"
"#,
        )
        .unwrap();

        let config = Config::load(Some(path.as_path()), None).unwrap();

        assert_eq!(config.server.port, 9090);
        assert_eq!(config.storage_resolved.data_dir, temp_dir.path().join("pages"));
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_rejects_invalid_cli_front_page() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("wiki.toml");
        std::fs::write(&path, "").unwrap();
        let overrides = CliSettings {
            front_page: Some("Front Page".to_owned()),
            ..Default::default()
        };

        let result = Config::load(Some(path.as_path()), Some(&overrides));

        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_load_expands_env_in_host() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("WIKI_CONFIG_TEST_HOST", "10.0.0.1");
        }
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("wiki.toml");
        std::fs::write(
            &path,
            r#"
[server]
host = "${WIKI_CONFIG_TEST_HOST}"
"#,
        )
        .unwrap();

        let config = Config::load(Some(path.as_path()), None).unwrap();

        assert_eq!(config.server.host, "10.0.0.1");

        unsafe {
            std::env::remove_var("WIKI_CONFIG_TEST_HOST");
        }
    }
}
