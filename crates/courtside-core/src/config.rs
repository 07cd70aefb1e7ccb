// Configuration loading and parsing (config/courtside.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::chart::{ChartType, StatSelection};

/// Built-in defaults, written to `config/courtside.toml` on first run.
pub const DEFAULT_CONFIG: &str = include_str!("../defaults/courtside.toml");

const CONFIG_DIR: &str = "config";
const CONFIG_FILE: &str = "courtside.toml";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// courtside.toml structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub provider: ProviderConfig,
    #[serde(default)]
    pub directory: DirectoryConfig,
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub per_mode: PerMode,
    pub season_type: SeasonType,
}

/// Aggregation the provider applies to each season row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum PerMode {
    Totals,
    PerGame,
    Per36,
}

impl PerMode {
    pub fn as_query(self) -> &'static str {
        match self {
            PerMode::Totals => "Totals",
            PerMode::PerGame => "PerGame",
            PerMode::Per36 => "Per36",
        }
    }
}

/// Which season totals the career chart is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeasonType {
    Regular,
    Post,
}

impl SeasonType {
    /// Name of the provider result set holding these season totals.
    pub fn result_set_name(self) -> &'static str {
        match self {
            SeasonType::Regular => "SeasonTotalsRegularSeason",
            SeasonType::Post => "SeasonTotalsPostSeason",
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DirectoryConfig {
    /// Replacement players file. When omitted the built-in table is used.
    #[serde(default)]
    pub path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    pub default_stat: String,
    pub default_chart: String,
    pub tick_rate_ms: u64,
}

impl Config {
    /// The built-in configuration.
    pub fn defaults() -> Result<Config, ConfigError> {
        parse_config(DEFAULT_CONFIG, Path::new("<defaults>"))
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate `config/courtside.toml` relative to `base_dir`.
///
/// Does not create the file; see [`ensure_config_file`].
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join(CONFIG_DIR).join(CONFIG_FILE);
    load_config_file(&path)
}

/// Load and validate a config file at an explicit path.
pub fn load_config_file(path: &Path) -> Result<Config, ConfigError> {
    let text = read_file(path)?;
    parse_config(&text, path)
}

/// Write the built-in defaults to `config/courtside.toml` under `base_dir`
/// unless the file already exists. Returns the path when a file was written.
pub fn ensure_config_file(base_dir: &Path) -> Result<Option<PathBuf>, ConfigError> {
    let config_dir = base_dir.join(CONFIG_DIR);
    std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to create config directory: {e}"),
    })?;

    let target = config_dir.join(CONFIG_FILE);
    match std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&target)
    {
        Ok(mut dest) => {
            std::io::Write::write_all(&mut dest, DEFAULT_CONFIG.as_bytes()).map_err(|e| {
                ConfigError::DefaultsCopyError {
                    message: format!("failed to write {}: {e}", target.display()),
                }
            })?;
            Ok(Some(target))
        }
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => Ok(None),
        Err(e) => Err(ConfigError::DefaultsCopyError {
            message: format!("failed to create {}: {e}", target.display()),
        }),
    }
}

/// Platform config file (e.g. `~/.config/courtside/courtside.toml`).
pub fn user_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "courtside")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}

/// Convenience wrapper used by the binary.
///
/// Prefers `config/courtside.toml` in the working directory, then the
/// platform config file, and finally writes the defaults into the working
/// directory and loads those.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;

    let local = cwd.join(CONFIG_DIR).join(CONFIG_FILE);
    if local.exists() {
        return load_config_file(&local);
    }

    if let Some(user) = user_config_path() {
        if user.exists() {
            return load_config_file(&user);
        }
    }

    ensure_config_file(&cwd)?;
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

fn parse_config(text: &str, path: &Path) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;
    validate(&config)?;
    Ok(config)
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    let base_url = config.provider.base_url.trim();
    if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        return Err(ConfigError::ValidationError {
            field: "provider.base_url".into(),
            message: format!("must be an http(s) URL, got {base_url:?}"),
        });
    }

    if config.provider.timeout_secs == 0 {
        return Err(ConfigError::ValidationError {
            field: "provider.timeout_secs".into(),
            message: "must be greater than 0".into(),
        });
    }

    if config.ui.tick_rate_ms == 0 {
        return Err(ConfigError::ValidationError {
            field: "ui.tick_rate_ms".into(),
            message: "must be greater than 0".into(),
        });
    }

    if config.ui.default_stat.parse::<StatSelection>().is_err() {
        return Err(ConfigError::ValidationError {
            field: "ui.default_stat".into(),
            message: format!("unknown stat {:?}", config.ui.default_stat),
        });
    }

    if config.ui.default_chart.parse::<ChartType>().is_err() {
        return Err(ConfigError::ValidationError {
            field: "ui.default_chart".into(),
            message: format!("must be line, bar or scatter, got {:?}", config.ui.default_chart),
        });
    }

    if let Some(path) = &config.directory.path {
        if path.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                field: "directory.path".into(),
                message: "must not be empty when set".into(),
            });
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn temp_base(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("courtside_config_{name}"));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn defaults_parse_and_validate() {
        let config = Config::defaults().expect("built-in defaults should be valid");
        assert_eq!(config.provider.base_url, "https://stats.nba.com/stats");
        assert_eq!(config.provider.timeout_secs, 30);
        assert_eq!(config.provider.per_mode, PerMode::Totals);
        assert_eq!(config.provider.season_type, SeasonType::Regular);
        assert!(config.directory.path.is_none());
        assert_eq!(config.ui.default_stat, "PTS");
        assert_eq!(config.ui.default_chart, "line");
        assert_eq!(config.ui.tick_rate_ms, 33);
    }

    #[test]
    fn ensure_writes_defaults_once() {
        let base = temp_base("ensure");
        let written = ensure_config_file(&base).unwrap();
        assert_eq!(written, Some(base.join("config/courtside.toml")));

        let again = ensure_config_file(&base).unwrap();
        assert!(again.is_none(), "existing file must not be overwritten");

        let config = load_config_from(&base).unwrap();
        assert_eq!(config.ui.default_chart, "line");
    }

    #[test]
    fn missing_file_is_reported() {
        let base = temp_base("missing");
        let err = load_config_from(&base).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound { .. }));
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        let base = temp_base("bad_toml");
        fs::create_dir_all(base.join("config")).unwrap();
        fs::write(base.join("config/courtside.toml"), "[provider\nbase_url = 1").unwrap();
        let err = load_config_from(&base).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let text = DEFAULT_CONFIG.replace("timeout_secs = 30", "timeout_secs = 0");
        let err = parse_config(&text, Path::new("test.toml")).unwrap_err();
        match err {
            ConfigError::ValidationError { field, .. } => {
                assert_eq!(field, "provider.timeout_secs")
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unknown_default_chart_is_rejected() {
        let text = DEFAULT_CONFIG.replace("default_chart = \"line\"", "default_chart = \"pie\"");
        let err = parse_config(&text, Path::new("test.toml")).unwrap_err();
        assert!(
            matches!(err, ConfigError::ValidationError { ref field, .. } if field == "ui.default_chart")
        );
    }

    #[test]
    fn unknown_default_stat_is_rejected() {
        let text = DEFAULT_CONFIG.replace("default_stat = \"PTS\"", "default_stat = \"XYZ\"");
        let err = parse_config(&text, Path::new("test.toml")).unwrap_err();
        assert!(
            matches!(err, ConfigError::ValidationError { ref field, .. } if field == "ui.default_stat")
        );
    }

    #[test]
    fn post_season_and_per_game_parse() {
        let text = DEFAULT_CONFIG
            .replace("per_mode = \"Totals\"", "per_mode = \"PerGame\"")
            .replace("season_type = \"regular\"", "season_type = \"post\"");
        let config = parse_config(&text, Path::new("test.toml")).unwrap();
        assert_eq!(config.provider.per_mode.as_query(), "PerGame");
        assert_eq!(
            config.provider.season_type.result_set_name(),
            "SeasonTotalsPostSeason"
        );
    }

    #[test]
    fn non_http_base_url_is_rejected() {
        let text = DEFAULT_CONFIG.replace("https://stats.nba.com/stats", "ftp://example.com");
        let err = parse_config(&text, Path::new("test.toml")).unwrap_err();
        assert!(
            matches!(err, ConfigError::ValidationError { ref field, .. } if field == "provider.base_url")
        );
    }
}
