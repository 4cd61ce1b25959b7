// DevFinder - platform/config.rs
//
// Platform-specific configuration, data directory resolution, and
// config.toml loading with startup validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::core::model::MatchMode;
use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for DevFinder data and configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/devfinder/ or %APPDATA%\DevFinder\config\)
    pub config_dir: PathBuf,

    /// User tag catalog file (config_dir/tags.toml).
    pub user_catalog: PathBuf,

    /// Data directory, where the default dataset file is looked up.
    pub data_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            let user_catalog = config_dir.join(constants::USER_CATALOG_FILE_NAME);
            let data_dir = proj_dirs.data_dir().to_path_buf();

            tracing::debug!(
                config = %config_dir.display(),
                catalog = %user_catalog.display(),
                data = %data_dir.display(),
                "Platform paths resolved"
            );

            Self {
                config_dir,
                user_catalog,
                data_dir,
            }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            let fallback = PathBuf::from(".");
            Self {
                config_dir: fallback.clone(),
                user_catalog: fallback.join(constants::USER_CATALOG_FILE_NAME),
                data_dir: fallback,
            }
        }
    }

    /// Path of config.toml inside the config directory.
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(constants::CONFIG_FILE_NAME)
    }

    /// Default dataset location inside the data directory.
    pub fn default_dataset(&self) -> PathBuf {
        self.data_dir.join(constants::DEFAULT_DATASET_FILE_NAME)
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility -- a newer
/// config file can be used with an older binary without crashing.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[data]` section.
    pub data: DataSection,
    /// `[filter]` section.
    pub filter: FilterSection,
    /// `[catalog]` section.
    pub catalog: CatalogSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[data]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct DataSection {
    /// Dataset file path. Relative paths resolve against the config file.
    pub path: Option<String>,
}

/// `[filter]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct FilterSection {
    /// Initial match mode: "any" or "all".
    pub mode: Option<String>,
    /// Initially selected tags (replaces the catalog defaults).
    pub tags: Option<Vec<String>>,
    /// Initial search text.
    pub search: Option<String>,
}

/// `[catalog]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct CatalogSection {
    /// User catalog file. Relative paths resolve against the config file.
    pub file: Option<String>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
    /// Log file path (empty = stderr only).
    pub file: Option<String>,
}

/// Validated application configuration derived from `config.toml`.
///
/// Invalid values produce actionable warnings and fall back to defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppConfig {
    // -- Data --
    /// Dataset file, if configured.
    pub dataset_path: Option<PathBuf>,

    // -- Filter --
    /// Initial match mode.
    pub match_mode: MatchMode,
    /// Initial tag selection. `None` = use the catalog's defaults.
    pub initial_tags: Option<Vec<String>>,
    /// Initial search text (raw, normalised by the controller).
    pub initial_search: String,

    // -- Catalog --
    /// User catalog file, if configured.
    pub catalog_file: Option<PathBuf>,

    // -- Logging --
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
    /// Log file path.
    pub log_file: Option<String>,
}

/// Read and parse a config file without validation.
///
/// Used directly when the user names a config file on the command line,
/// where a missing or broken file is a hard error.
pub fn read_raw_config(path: &Path) -> Result<RawConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Load and validate `config.toml` at `config_path`.
///
/// Returns `AppConfig` with validated values and a list of non-fatal warnings.
/// If the file does not exist, returns defaults with no warnings (first-run).
/// If the file is unreadable or unparseable, returns defaults with a warning
/// so the application still starts but the user is informed.
pub fn load_config(config_path: &Path) -> (AppConfig, Vec<String>) {
    let mut warnings: Vec<String> = Vec::new();

    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "No config.toml found; using defaults");
        return (AppConfig::default(), warnings);
    }

    let raw = match read_raw_config(config_path) {
        Ok(r) => r,
        Err(e) => {
            let msg = format!("{e}. Using defaults.");
            tracing::warn!("{}", msg);
            warnings.push(msg);
            return (AppConfig::default(), warnings);
        }
    };

    tracing::info!(path = %config_path.display(), "Loaded config.toml");

    let base_dir = config_path.parent().unwrap_or(Path::new("."));
    let config = validate_config(raw, base_dir, &mut warnings);

    if !warnings.is_empty() {
        tracing::warn!(
            count = warnings.len(),
            "Config validation produced warnings"
        );
    }

    (config, warnings)
}

/// Validate each field of a raw config, accumulating all warnings.
///
/// Relative paths are resolved against `base_dir`.
pub fn validate_config(raw: RawConfig, base_dir: &Path, warnings: &mut Vec<String>) -> AppConfig {
    let mut config = AppConfig::default();

    // -- Data: path --
    if let Some(ref path) = raw.data.path {
        if path.trim().is_empty() {
            warnings.push("[data] path is empty. Ignoring.".to_string());
        } else {
            config.dataset_path = Some(base_dir.join(path.trim()));
        }
    }

    // -- Filter: mode --
    if let Some(ref mode) = raw.filter.mode {
        match mode.parse::<MatchMode>() {
            Ok(m) => config.match_mode = m,
            Err(_) => warnings.push(format!(
                "[filter] mode = \"{mode}\" is not recognised. \
                 Expected \"any\" or \"all\". Using default (any).",
            )),
        }
    }

    // -- Filter: tags --
    if let Some(tags) = raw.filter.tags {
        let cleaned: Vec<String> = tags
            .iter()
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
        if cleaned.len() != tags.len() {
            warnings.push(format!(
                "[filter] tags contains {} empty entr(y/ies). They were ignored.",
                tags.len() - cleaned.len()
            ));
        }
        config.initial_tags = Some(cleaned);
    }

    // -- Filter: search --
    if let Some(search) = raw.filter.search {
        if search.chars().count() > constants::MAX_SEARCH_TERM_CHARS {
            warnings.push(format!(
                "[filter] search is longer than {} characters and will be truncated.",
                constants::MAX_SEARCH_TERM_CHARS
            ));
        }
        config.initial_search = search;
    }

    // -- Catalog: file --
    if let Some(ref file) = raw.catalog.file {
        if !file.trim().is_empty() {
            config.catalog_file = Some(base_dir.join(file.trim()));
        }
    }

    // -- Logging: level --
    if let Some(ref level) = raw.logging.level {
        if constants::VALID_LOG_LEVELS.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.to_lowercase());
        } else {
            warnings.push(format!(
                "[logging] level = \"{level}\" is not recognised. \
                 Valid values: error, warn, info, debug, trace. Using default (info).",
            ));
        }
    }

    // -- Logging: file --
    if let Some(ref file) = raw.logging.file {
        if !file.is_empty() {
            config.log_file = Some(file.clone());
        }
    }

    config
}
