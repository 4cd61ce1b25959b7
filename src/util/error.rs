// DevFinder - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// The normaliser, indexer and filter engine are total and have no error
// type; everything here belongs to an I/O or parsing boundary.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all DevFinder operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum DevFinderError {
    /// Dataset loading failed ("dataset unavailable").
    Dataset(DatasetError),

    /// Tag catalog loading or validation failed.
    Catalog(CatalogError),

    /// Configuration loading failed.
    Config(ConfigError),

    /// Export operation failed.
    Export(ExportError),

    /// An interactive command could not be understood.
    Command(CommandError),
}

impl fmt::Display for DevFinderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dataset(e) => write!(f, "Dataset unavailable: {e}"),
            Self::Catalog(e) => write!(f, "Catalog error: {e}"),
            Self::Config(e) => write!(f, "Configuration error: {e}"),
            Self::Export(e) => write!(f, "Export error: {e}"),
            Self::Command(e) => write!(f, "Command error: {e}"),
        }
    }
}

impl std::error::Error for DevFinderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Dataset(e) => Some(e),
            Self::Catalog(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::Export(e) => Some(e),
            Self::Command(e) => Some(e),
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset errors
// ---------------------------------------------------------------------------

/// Errors raised while reading the raw people dataset.
#[derive(Debug)]
pub enum DatasetError {
    /// The dataset file does not exist.
    NotFound { path: PathBuf },

    /// The dataset file exceeds the maximum allowed size.
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    /// The content is not a JSON array of person objects.
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// More records than the in-memory cap allows.
    TooManyRecords { count: usize, max: usize },

    /// I/O error while reading the dataset.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for DatasetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { path } => {
                write!(f, "Dataset file '{}' does not exist", path.display())
            }
            Self::FileTooLarge {
                path,
                size,
                max_size,
            } => write!(
                f,
                "Dataset '{}' is {size} bytes, exceeds maximum of {max_size} bytes",
                path.display()
            ),
            Self::Json { path, source } => write!(
                f,
                "Dataset '{}' is not a valid JSON array of people: {source}",
                path.display()
            ),
            Self::TooManyRecords { count, max } => {
                write!(f, "Dataset holds {count} people, maximum is {max}")
            }
            Self::Io { path, source } => {
                write!(f, "I/O error reading dataset '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for DatasetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<DatasetError> for DevFinderError {
    fn from(e: DatasetError) -> Self {
        Self::Dataset(e)
    }
}

// ---------------------------------------------------------------------------
// Catalog errors
// ---------------------------------------------------------------------------

/// Errors related to tag catalog loading and validation.
#[derive(Debug)]
pub enum CatalogError {
    /// TOML file could not be parsed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// Catalog file exceeds the maximum allowed size.
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    /// A required field is empty.
    MissingField { tag_id: String, field: &'static str },

    /// A tag id does not match the allowed shape.
    InvalidId { id: String, reason: String },

    /// The same id appears twice in one catalog file.
    DuplicateId { id: String, path: PathBuf },

    /// The tag id validation pattern failed to compile.
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },

    /// Maximum number of tags exceeded.
    TooManyTags { count: usize, max: usize },

    /// I/O error reading a catalog file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Failed to parse TOML '{}': {source}", path.display())
            }
            Self::FileTooLarge {
                path,
                size,
                max_size,
            } => write!(
                f,
                "Catalog '{}' is {size} bytes, exceeds maximum of {max_size} bytes",
                path.display()
            ),
            Self::MissingField { tag_id, field } => {
                write!(f, "Tag '{tag_id}': missing required field '{field}'")
            }
            Self::InvalidId { id, reason } => write!(f, "Invalid tag id '{id}': {reason}"),
            Self::DuplicateId { id, path } => {
                write!(f, "Duplicate tag id '{id}' in '{}'", path.display())
            }
            Self::InvalidPattern { pattern, source } => {
                write!(f, "Invalid tag id pattern '{pattern}': {source}")
            }
            Self::TooManyTags { count, max } => {
                write!(f, "Too many tags in catalog ({count}), maximum is {max}")
            }
            Self::Io { path, source } => {
                write!(f, "I/O error reading catalog '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::InvalidPattern { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<CatalogError> for DevFinderError {
    fn from(e: CatalogError) -> Self {
        Self::Catalog(e)
    }
}

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

/// Errors related to export operations.
#[derive(Debug)]
pub enum ExportError {
    /// I/O error writing the export target.
    Io { path: PathBuf, source: io::Error },

    /// CSV serialisation error.
    Csv { path: PathBuf, source: csv::Error },

    /// JSON serialisation error.
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "Export I/O error '{}': {source}", path.display())
            }
            Self::Csv { path, source } => {
                write!(f, "CSV export error '{}': {source}", path.display())
            }
            Self::Json { path, source } => {
                write!(f, "JSON export error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Csv { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
        }
    }
}

impl From<ExportError> for DevFinderError {
    fn from(e: ExportError) -> Self {
        Self::Export(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading.
///
/// `load_config` degrades these to warnings; they surface as hard errors
/// only when the user names a config file explicitly on the command line.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
        }
    }
}

impl From<ConfigError> for DevFinderError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Command errors
// ---------------------------------------------------------------------------

/// Errors produced when parsing an interactive command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// The first word is not a known command.
    Unknown { command: String },

    /// A required argument was not supplied.
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    /// An argument was supplied but is not acceptable.
    InvalidArgument {
        command: &'static str,
        value: String,
        expected: &'static str,
    },
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown { command } => {
                write!(f, "Unknown command '{command}'. Type 'help' for a list.")
            }
            Self::MissingArgument { command, argument } => {
                write!(f, "'{command}' needs an argument: {argument}")
            }
            Self::InvalidArgument {
                command,
                value,
                expected,
            } => write!(f, "'{command}': '{value}' is not valid, expected {expected}"),
        }
    }
}

impl std::error::Error for CommandError {}

impl From<CommandError> for DevFinderError {
    fn from(e: CommandError) -> Self {
        Self::Command(e)
    }
}

/// Convenience type alias for DevFinder results.
pub type Result<T> = std::result::Result<T, DevFinderError>;
