//! Backend settings.
//!
//! Each value comes from the first source that sets it: command line (or
//! its environment variable), then the `[server]` table of
//! `~/.config/taskdesk-server/config.toml`, then the built-in default.

use std::path::{Path, PathBuf};

/// Address the API listens on when nothing else is configured.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8000";

/// Log filter used when nothing else is configured.
pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file: {0}")]
    ParseToml(#[from] toml::de::Error),

    /// The bind address is not `host:port` with a numeric port.
    #[error("invalid bind address {0:?}: expected host:port")]
    InvalidBindAddr(String),
}

#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct ConfigFile {
    server: ServerSection,
}

#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct ServerSection {
    bind_addr: Option<String>,
    log_level: Option<String>,
}

#[derive(clap::Parser, Debug, Default)]
#[command(version, about = "TaskDesk task-creation backend")]
pub struct ServerCliArgs {
    /// Listen address, e.g. `0.0.0.0:8000`.
    #[arg(short, long, env = "TASKDESK_SERVER_ADDR")]
    pub bind: Option<String>,

    /// Config file to read instead of the default location.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Tracing filter (default: info).
    #[arg(long, env = "TASKDESK_SERVER_LOG")]
    pub log_level: Option<String>,
}

/// Resolved backend settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl ServerConfig {
    /// Reads the config file (if any) and layers the command line over it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if an explicitly named file is missing, a file
    /// cannot be parsed, or the resulting bind address is malformed.
    pub fn load(cli: &ServerCliArgs) -> Result<Self, ConfigError> {
        let file = match cli.config.as_deref() {
            Some(path) => read_file(path)?,
            None => default_path()
                .map(|path| read_optional_file(&path))
                .transpose()?
                .unwrap_or_default(),
        };
        Self::resolve(cli, file)
    }

    fn resolve(cli: &ServerCliArgs, file: ConfigFile) -> Result<Self, ConfigError> {
        let ServerSection {
            bind_addr,
            log_level,
        } = file.server;

        let bind_addr = cli
            .bind
            .clone()
            .or(bind_addr)
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        check_bind_addr(&bind_addr)?;

        Ok(Self {
            bind_addr,
            log_level: cli
                .log_level
                .clone()
                .or(log_level)
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
        })
    }
}

fn check_bind_addr(addr: &str) -> Result<(), ConfigError> {
    match addr.rsplit_once(':') {
        Some((host, port)) if !host.is_empty() && port.parse::<u16>().is_ok() => Ok(()),
        _ => Err(ConfigError::InvalidBindAddr(addr.to_string())),
    }
}

fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("taskdesk-server").join("config.toml"))
}

fn read_file(path: &Path) -> Result<ConfigFile, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(toml::from_str(&contents)?)
}

/// Like [`read_file`], but a missing file means "no overrides".
fn read_optional_file(path: &Path) -> Result<ConfigFile, ConfigError> {
    match read_file(path) {
        Err(ConfigError::ReadFile { source, .. })
            if source.kind() == std::io::ErrorKind::NotFound =>
        {
            Ok(ConfigFile::default())
        }
        other => other,
    }
}
