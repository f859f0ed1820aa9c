//! Bootstrap configuration
//!
//! Configuration is read once at startup. Resolution priority, highest first:
//! 1. Command-line argument
//! 2. Environment variable (both handled by clap in each binary)
//! 3. TOML config file
//! 4. Compiled default
//!
//! A missing default config file is not an error: the receiver starts with
//! compiled defaults. A file named explicitly must exist and parse.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "RCV_CONFIG";

/// Default listen address (all interfaces)
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default listen port; the remote firmware posts here
pub const DEFAULT_PORT: u16 = 54321;

/// Media file extensions recognised when building the track catalog
pub const DEFAULT_EXTENSIONS: [&str; 11] = [
    "mp3", "wav", "flac", "ogg", "aac", "m4a", "mp4", "avi", "mkv", "mov", "webm",
];

/// External player launched for each track
pub const DEFAULT_PLAYER_COMMAND: &str = "vlc";

/// Seconds a player gets to exit after a graceful stop request
pub const DEFAULT_STOP_GRACE_SECS: u64 = 5;

/// Configuration loaded from the TOML file
#[derive(Debug, Clone, Deserialize)]
pub struct TomlConfig {
    /// Listen address
    #[serde(default = "default_host")]
    pub host: String,

    /// Listen port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory holding the media files (optional)
    ///
    /// If not specified, falls back to the OS audio directory.
    #[serde(default)]
    pub media_directory: Option<PathBuf>,

    /// Recognised media extensions, with or without a leading dot
    #[serde(default = "default_extensions")]
    pub recognized_extensions: Vec<String>,

    /// External player settings
    #[serde(default)]
    pub player: PlayerSection,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// `[player]` table
#[derive(Debug, Clone, Deserialize)]
pub struct PlayerSection {
    /// Executable name or path
    #[serde(default = "default_player_command")]
    pub command: String,

    /// Arguments placed before the media file path
    #[serde(default)]
    pub args: Vec<String>,

    /// Grace period before a stop request escalates to a kill
    #[serde(default = "default_stop_grace_secs")]
    pub stop_grace_secs: u64,
}

/// `[logging]` table
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Values supplied on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub media_directory: Option<PathBuf>,
    pub player_command: Option<String>,
    pub log_level: Option<String>,
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_extensions() -> Vec<String> {
    DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect()
}

fn default_player_command() -> String {
    DEFAULT_PLAYER_COMMAND.to_string()
}

fn default_stop_grace_secs() -> u64 {
    DEFAULT_STOP_GRACE_SECS
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            media_directory: None,
            recognized_extensions: default_extensions(),
            player: PlayerSection::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for PlayerSection {
    fn default() -> Self {
        Self {
            command: default_player_command(),
            args: Vec::new(),
            stop_grace_secs: default_stop_grace_secs(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl TomlConfig {
    /// Apply command-line / environment overrides on top of file values
    pub fn apply(mut self, overrides: Overrides) -> Self {
        if let Some(host) = overrides.host {
            self.host = host;
        }
        if let Some(port) = overrides.port {
            self.port = port;
        }
        if let Some(dir) = overrides.media_directory {
            self.media_directory = Some(dir);
        }
        if let Some(command) = overrides.player_command {
            self.player.command = command;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
        self
    }

    /// `host:port` string for the listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Media directory, falling back to the OS audio directory
    pub fn media_directory(&self) -> PathBuf {
        self.media_directory
            .clone()
            .or_else(dirs::audio_dir)
            .unwrap_or_else(|| PathBuf::from("./media"))
    }

    /// Recognised extensions, lower-cased and without leading dots
    pub fn extensions(&self) -> Vec<String> {
        normalize_extensions(&self.recognized_extensions)
    }

    /// Player grace period as a Duration
    pub fn stop_grace(&self) -> Duration {
        Duration::from_secs(self.player.stop_grace_secs)
    }
}

/// Lower-case, strip leading dots, drop empties and duplicates
pub fn normalize_extensions<S: AsRef<str>>(extensions: &[S]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(extensions.len());
    for ext in extensions {
        let ext = ext.as_ref().trim().trim_start_matches('.').to_lowercase();
        if !ext.is_empty() && !out.contains(&ext) {
            out.push(ext);
        }
    }
    out
}

/// Platform config file location (`<config dir>/rcv/config.toml`)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("rcv").join("config.toml"))
}

/// Parse a TOML config file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?;

    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Where the loaded configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// File named on the command line or in `RCV_CONFIG`
    Explicit(PathBuf),
    /// File found at the platform default location
    DefaultFile(PathBuf),
    /// No file; compiled defaults
    CompiledDefaults,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Explicit(path) | ConfigSource::DefaultFile(path) => {
                write!(f, "{}", path.display())
            }
            ConfigSource::CompiledDefaults => f.write_str("compiled defaults"),
        }
    }
}

/// Load configuration from an explicit file or the platform default location
///
/// An explicit path must exist. The default location is optional. Returns
/// the source alongside the config so the caller can log it once tracing
/// is initialised with the configured level.
pub fn load_config(explicit: Option<&Path>) -> Result<(TomlConfig, ConfigSource)> {
    if let Some(path) = explicit {
        let config = load_toml_config(path)?;
        return Ok((config, ConfigSource::Explicit(path.to_path_buf())));
    }

    match default_config_path() {
        Some(path) if path.exists() => {
            let config = load_toml_config(&path)?;
            Ok((config, ConfigSource::DefaultFile(path)))
        }
        _ => Ok((TomlConfig::default(), ConfigSource::CompiledDefaults)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = TomlConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 54321);
        assert_eq!(config.player.command, "vlc");
        assert_eq!(config.stop_grace(), Duration::from_secs(5));
        assert_eq!(config.extensions().len(), 11);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: TomlConfig = toml::from_str("").unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.recognized_extensions.len(), DEFAULT_EXTENSIONS.len());
    }

    #[test]
    fn test_partial_file() {
        let config: TomlConfig = toml::from_str(
            r#"
            port = 8080
            media_directory = "/srv/media"

            [player]
            command = "mpv"
            args = ["--fs"]
            "#,
        )
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.host, DEFAULT_HOST);
        assert_eq!(config.media_directory(), PathBuf::from("/srv/media"));
        assert_eq!(config.player.command, "mpv");
        assert_eq!(config.player.args, vec!["--fs".to_string()]);
        assert_eq!(config.player.stop_grace_secs, DEFAULT_STOP_GRACE_SECS);
    }

    #[test]
    fn test_overrides_win() {
        let config = TomlConfig::default().apply(Overrides {
            port: Some(9000),
            media_directory: Some(PathBuf::from("/tmp/tracks")),
            player_command: Some("mpv".to_string()),
            ..Default::default()
        });

        assert_eq!(config.port, 9000);
        assert_eq!(config.host, DEFAULT_HOST);
        assert_eq!(config.media_directory(), PathBuf::from("/tmp/tracks"));
        assert_eq!(config.player.command, "mpv");
        assert_eq!(config.bind_addr(), "0.0.0.0:9000");
    }

    #[test]
    fn test_normalize_extensions() {
        let exts = normalize_extensions(&[".MP3", "flac", " .Ogg ", "mp3", ""]);
        assert_eq!(exts, vec!["mp3", "flac", "ogg"]);
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let result = load_config(Some(Path::new("/nonexistent/rcv/config.toml")));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_explicit_file_loads() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "port = 12345").unwrap();

        let (config, source) = load_config(Some(file.path())).unwrap();
        assert_eq!(config.port, 12345);
        assert_eq!(source, ConfigSource::Explicit(file.path().to_path_buf()));
    }

    #[test]
    fn test_malformed_file_is_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "port = \"not a number\"").unwrap();

        let result = load_toml_config(file.path());
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
