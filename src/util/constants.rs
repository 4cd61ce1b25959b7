// DevFinder - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "DevFinder";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "DevFinder";

/// Current application version (updated by release script).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Dataset limits
// =============================================================================

/// Maximum size of a dataset file in bytes. Larger files are rejected
/// before any parsing is attempted.
pub const MAX_DATASET_FILE_SIZE: u64 = 16 * 1024 * 1024; // 16 MB

/// Hard upper bound on the number of people held in memory.
pub const MAX_RECORDS: usize = 100_000;

/// Default dataset file name, resolved against the data directory when
/// neither the CLI nor config.toml names one.
pub const DEFAULT_DATASET_FILE_NAME: &str = "devs.json";

// =============================================================================
// Tag catalog limits
// =============================================================================

/// Maximum number of tags in the merged catalog.
pub const MAX_CATALOG_TAGS: usize = 256;

/// Maximum size of a user catalog file in bytes.
pub const MAX_CATALOG_FILE_SIZE: u64 = 64 * 1024; // 64 KB

/// Maximum length of a single tag id.
pub const MAX_TAG_ID_LENGTH: usize = 64;

/// Allowed shape of a tag id. Lowercase so that ids compare equal to the
/// lowercased language names of indexed records.
pub const TAG_ID_PATTERN: &str = r"^[a-z0-9][a-z0-9+#._-]*$";

// =============================================================================
// Filter defaults
// =============================================================================

/// Maximum length of a search term accepted from the user (in chars).
/// Longer input is truncated before normalisation.
pub const MAX_SEARCH_TERM_CHARS: usize = 256;

// =============================================================================
// Output
// =============================================================================

/// Separator used when joining a person's languages into one CSV cell.
pub const CSV_LANGUAGE_SEPARATOR: &str = ";";

// =============================================================================
// Logging
// =============================================================================

/// Default log level when neither RUST_LOG, --debug, nor config sets one.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Log levels accepted in `[logging] level`.
pub const VALID_LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

// =============================================================================
// Platform
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// User catalog file name inside the config directory.
pub const USER_CATALOG_FILE_NAME: &str = "tags.toml";
