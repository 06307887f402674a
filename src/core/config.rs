//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.pagewise/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{LevelFilter, debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::SourceKind;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct PagewiseConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub file: FileConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub default_source: Option<String>,
    pub page_size: Option<usize>,
    pub prefetch_margin: Option<usize>,
    pub log_level: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SearchConfig {
    pub base_url: Option<String>,
    pub query: Option<String>,
    pub include_prerelease: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct FileConfig {
    pub path: Option<String>,
    pub latency_ms: Option<u64>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_PAGE_SIZE: usize = 25;
pub const DEFAULT_PREFETCH_MARGIN: usize = 2;
pub const DEFAULT_SEARCH_URL: &str = "https://azuresearch-usnc.nuget.org/query";
pub const DEFAULT_QUERY: &str = "json";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub source: SourceKind,
    pub page_size: usize,
    pub prefetch_margin: usize,
    pub log_level: LevelFilter,
    pub search_url: String,
    pub query: String,
    pub include_prerelease: bool,
    pub file_path: Option<PathBuf>,
    pub file_latency_ms: u64,
}

/// Values given on the command line. `None` means "not specified".
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub source: Option<SourceKind>,
    pub query: Option<String>,
    pub file: Option<PathBuf>,
    pub page_size: Option<usize>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.pagewise/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".pagewise").join("config.toml"))
}

/// Load config from `~/.pagewise/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `PagewiseConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<PagewiseConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(PagewiseConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(PagewiseConfig::default());
    }

    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<PagewiseConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: PagewiseConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

fn generate_default_config(path: &Path) {
    let default_content = r#"# Pagewise Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# default_source = "search"          # "search" or "file"
# page_size = 25
# prefetch_margin = 2                # rows from the end that trigger the next page
# log_level = "debug"                # "error", "warn", "info", "debug", "trace", "off"

# [search]
# base_url = "https://azuresearch-usnc.nuget.org/query"   # Or PAGEWISE_SEARCH_URL
# query = "json"                                           # Or PAGEWISE_QUERY
# include_prerelease = false

# [file]
# path = "/path/to/list.txt"
# latency_ms = 0                     # artificial delay per page
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &PagewiseConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

fn resolve_with_env(
    config: &PagewiseConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // Source: CLI → env → config → default
    let source = cli
        .source
        .or_else(|| env("PAGEWISE_SOURCE").and_then(|s| SourceKind::from_name(&s)))
        .or_else(|| {
            config
                .general
                .default_source
                .as_deref()
                .and_then(SourceKind::from_name)
        })
        .unwrap_or_default();

    let search_url = env("PAGEWISE_SEARCH_URL")
        .or_else(|| config.search.base_url.clone())
        .unwrap_or_else(|| DEFAULT_SEARCH_URL.to_string());

    // Query: CLI → env → config → default
    let query = cli
        .query
        .clone()
        .or_else(|| env("PAGEWISE_QUERY"))
        .or_else(|| config.search.query.clone())
        .unwrap_or_else(|| DEFAULT_QUERY.to_string());

    let file_path = cli
        .file
        .clone()
        .or_else(|| config.file.path.as_ref().map(PathBuf::from));

    let log_level = config
        .general
        .log_level
        .as_deref()
        .and_then(|l| l.parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Debug);

    ResolvedConfig {
        source,
        page_size: cli
            .page_size
            .or(config.general.page_size)
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .max(1),
        prefetch_margin: config
            .general
            .prefetch_margin
            .unwrap_or(DEFAULT_PREFETCH_MARGIN),
        log_level,
        search_url,
        query,
        include_prerelease: config.search.include_prerelease.unwrap_or(false),
        file_path,
        file_latency_ms: config.file.latency_ms.unwrap_or(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let resolved = resolve_with_env(&PagewiseConfig::default(), &CliOverrides::default(), no_env);
        assert_eq!(resolved.source, SourceKind::Search);
        assert_eq!(resolved.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(resolved.prefetch_margin, DEFAULT_PREFETCH_MARGIN);
        assert_eq!(resolved.search_url, DEFAULT_SEARCH_URL);
        assert_eq!(resolved.query, DEFAULT_QUERY);
        assert_eq!(resolved.log_level, LevelFilter::Debug);
        assert!(resolved.file_path.is_none());
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = PagewiseConfig {
            general: GeneralConfig {
                default_source: Some("file".to_string()),
                page_size: Some(10),
                prefetch_margin: Some(5),
                log_level: Some("warn".to_string()),
            },
            file: FileConfig {
                path: Some("/tmp/items.txt".to_string()),
                latency_ms: Some(250),
            },
            ..Default::default()
        };
        let resolved = resolve_with_env(&config, &CliOverrides::default(), no_env);
        assert_eq!(resolved.source, SourceKind::File);
        assert_eq!(resolved.page_size, 10);
        assert_eq!(resolved.prefetch_margin, 5);
        assert_eq!(resolved.log_level, LevelFilter::Warn);
        assert_eq!(resolved.file_path, Some(PathBuf::from("/tmp/items.txt")));
        assert_eq!(resolved.file_latency_ms, 250);
    }

    #[test]
    fn test_env_beats_config_and_cli_beats_env() {
        let config = PagewiseConfig {
            search: SearchConfig {
                query: Some("from-config".to_string()),
                base_url: Some("http://config".to_string()),
                include_prerelease: Some(true),
            },
            ..Default::default()
        };
        let env = |key: &str| match key {
            "PAGEWISE_QUERY" => Some("from-env".to_string()),
            "PAGEWISE_SEARCH_URL" => Some("http://env".to_string()),
            "PAGEWISE_SOURCE" => Some("file".to_string()),
            _ => None,
        };

        let resolved = resolve_with_env(&config, &CliOverrides::default(), env);
        assert_eq!(resolved.query, "from-env");
        assert_eq!(resolved.search_url, "http://env");
        assert_eq!(resolved.source, SourceKind::File);
        assert!(resolved.include_prerelease);

        let cli = CliOverrides {
            source: Some(SourceKind::Search),
            query: Some("from-cli".to_string()),
            ..Default::default()
        };
        let resolved = resolve_with_env(&config, &cli, env);
        assert_eq!(resolved.query, "from-cli");
        assert_eq!(resolved.source, SourceKind::Search);
    }

    #[test]
    fn test_page_size_never_zero() {
        let cli = CliOverrides {
            page_size: Some(0),
            ..Default::default()
        };
        let resolved = resolve_with_env(&PagewiseConfig::default(), &cli, no_env);
        assert_eq!(resolved.page_size, 1);
    }

    #[test]
    fn test_unknown_names_fall_back() {
        let config = PagewiseConfig {
            general: GeneralConfig {
                default_source: Some("gopher".to_string()),
                log_level: Some("loud".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let resolved = resolve_with_env(&config, &CliOverrides::default(), no_env);
        assert_eq!(resolved.source, SourceKind::Search);
        assert_eq!(resolved.log_level, LevelFilter::Debug);
    }

    #[test]
    fn test_sparse_toml_parses() {
        let toml_str = r#"
[search]
query = "serilog"
"#;
        let config: PagewiseConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.search.query.as_deref(), Some("serilog"));
        assert!(config.general.page_size.is_none());
        assert!(config.file.path.is_none());
    }

    #[test]
    fn test_full_toml_parses() {
        let toml_str = r#"
[general]
default_source = "file"
page_size = 50
prefetch_margin = 3
log_level = "info"

[search]
base_url = "http://localhost:5000/query"
query = "xunit"
include_prerelease = true

[file]
path = "items.txt"
latency_ms = 100
"#;
        let config: PagewiseConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.page_size, Some(50));
        assert_eq!(config.search.include_prerelease, Some(true));
        assert_eq!(config.file.latency_ms, Some(100));
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let path = std::env::temp_dir().join(format!("pagewise-config-{}.toml", std::process::id()));
        fs::write(&path, "[general\npage_size = ").unwrap();
        let result = load_config_from(&path);
        let _ = fs::remove_file(&path);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
