//! Configuration loading
//!
//! Settings come from a TOML file plus command-line overrides. Config file
//! lookup order:
//! 1. Command-line `--config` path
//! 2. `FOLIO_CONFIG` environment variable
//! 3. `./folio.toml`
//! 4. `<user config dir>/folio/config.toml`
//!
//! Paths given explicitly (1, 2) must exist. The implicit locations (3, 4) are
//! optional; when neither exists the compiled defaults are used.

use crate::ui_state::Track;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "FOLIO_CONFIG";

/// Config file looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "folio.toml";

/// Settings as written in the TOML file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TomlConfig {
    /// HTTP server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Interface to bind
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Directory served as static files (images, videos, audio)
    #[serde(default = "default_public_dir")]
    pub public_dir: PathBuf,

    /// Directory scanned for project images; defaults to `<public_dir>/images`
    #[serde(default)]
    pub media_dir: Option<PathBuf>,

    /// Public URL path the media directory is served under
    #[serde(default = "default_media_url_prefix")]
    pub media_url_prefix: String,

    /// Cover image used when a project has none; defaults to
    /// `<media_url_prefix>/placeholder.jpg`
    #[serde(default)]
    pub placeholder_image: Option<String>,

    /// Catalog file replacing the compiled-in project list
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,

    #[serde(default)]
    pub logging: LoggingConfig,

    /// Background audio playlist
    #[serde(default = "default_tracks")]
    pub tracks: Vec<Track>,
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            bind_address: default_bind_address(),
            public_dir: default_public_dir(),
            media_dir: None,
            media_url_prefix: default_media_url_prefix(),
            placeholder_image: None,
            catalog_path: None,
            logging: LoggingConfig::default(),
            tracks: default_tracks(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default level (trace, debug, info, warn, error); `RUST_LOG` wins
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_port() -> u16 {
    5780
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_public_dir() -> PathBuf {
    PathBuf::from("public")
}

fn default_media_url_prefix() -> String {
    "/images".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_tracks() -> Vec<Track> {
    vec![
        Track {
            id: "1".to_string(),
            title: "9mm (WADADADANG)".to_string(),
            artist: None,
            url: "/audio/track1.mp3".to_string(),
        },
        Track {
            id: "3".to_string(),
            title: "Wrath".to_string(),
            artist: None,
            url: "/audio/track3.mp3".to_string(),
        },
    ]
}

/// Command-line overrides, applied on top of the TOML file
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub port: Option<u16>,
    pub bind_address: Option<String>,
    pub public_dir: Option<PathBuf>,
    pub media_dir: Option<PathBuf>,
    pub catalog_path: Option<PathBuf>,
}

/// Final configuration with every default filled in
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub port: u16,
    pub bind_address: String,
    pub public_dir: PathBuf,
    pub media_dir: PathBuf,
    pub media_url_prefix: String,
    pub placeholder_image: String,
    pub catalog_path: Option<PathBuf>,
    pub logging: LoggingConfig,
    pub tracks: Vec<Track>,
}

impl ResolvedConfig {
    pub fn resolve(toml: TomlConfig, overrides: ConfigOverrides) -> Self {
        let public_dir = overrides.public_dir.unwrap_or(toml.public_dir);
        let media_dir = overrides
            .media_dir
            .or(toml.media_dir)
            .unwrap_or_else(|| public_dir.join("images"));
        let media_url_prefix = toml.media_url_prefix.trim_end_matches('/').to_string();
        let placeholder_image = toml
            .placeholder_image
            .unwrap_or_else(|| format!("{}/placeholder.jpg", media_url_prefix));

        Self {
            port: overrides.port.unwrap_or(toml.port),
            bind_address: overrides.bind_address.unwrap_or(toml.bind_address),
            public_dir,
            media_dir,
            media_url_prefix,
            placeholder_image,
            catalog_path: overrides.catalog_path.or(toml.catalog_path),
            logging: toml.logging,
            tracks: toml.tracks,
        }
    }

    /// Address to listen on
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self.bind_address.parse().map_err(|e| {
            Error::Config(format!("Invalid bind address {}: {}", self.bind_address, e))
        })?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Find the config file to load, following the lookup order above.
///
/// Returns `Ok(None)` when no explicit path was given and no implicit
/// location exists.
pub fn locate_config_file(cli_path: Option<&Path>) -> Result<Option<PathBuf>> {
    // Priority 1: Command-line argument
    if let Some(path) = cli_path {
        return require_exists(path.to_path_buf(), "command line");
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        if !path.trim().is_empty() {
            return require_exists(PathBuf::from(path), CONFIG_ENV_VAR);
        }
    }

    // Priority 3: Working directory
    let local = PathBuf::from(LOCAL_CONFIG_FILE);
    if local.is_file() {
        return Ok(Some(local));
    }

    // Priority 4: User config directory
    Ok(dirs::config_dir()
        .map(|d| d.join("folio").join("config.toml"))
        .filter(|p| p.is_file()))
}

fn require_exists(path: PathBuf, source: &str) -> Result<Option<PathBuf>> {
    if path.is_file() {
        Ok(Some(path))
    } else {
        Err(Error::Config(format!(
            "Config file from {} not found: {}",
            source,
            path.display()
        )))
    }
}

/// Parse a TOML config file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Config file contents together with where they came from
#[derive(Debug, Clone)]
pub struct ConfigFile {
    /// `None` when no file was found and the defaults are in use
    pub path: Option<PathBuf>,
    pub toml: TomlConfig,
}

impl ConfigFile {
    /// Locate and parse the config file without logging, so callers can read
    /// the log level before tracing is initialized.
    ///
    /// A config file that exists but fails to parse is an error.
    pub fn locate_and_load(cli_path: Option<&Path>) -> Result<Self> {
        let path = locate_config_file(cli_path)?;
        let toml = match &path {
            Some(path) => load_toml_config(path)?,
            None => TomlConfig::default(),
        };
        Ok(Self { path, toml })
    }

    /// Log the config source and apply overrides
    pub fn resolve(self, overrides: ConfigOverrides) -> ResolvedConfig {
        match &self.path {
            Some(path) => info!("Loaded configuration from {}", path.display()),
            None => warn!("No configuration file found, using defaults"),
        }
        ResolvedConfig::resolve(self.toml, overrides)
    }
}

/// Locate, load and resolve the configuration
///
/// A missing config file is not fatal: a warning is logged and the compiled
/// defaults are used.
pub fn load_config(cli_path: Option<&Path>, overrides: ConfigOverrides) -> Result<ResolvedConfig> {
    Ok(ConfigFile::locate_and_load(cli_path)?.resolve(overrides))
}
