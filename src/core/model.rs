// DevFinder - core/model.rs
//
// Core data model types. Pure data definitions with no I/O and no
// platform dependencies.
//
// These types are the shared vocabulary across all layers.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;
use std::time::Duration;

/// Opaque JSON fields carried through untouched from input to output.
pub type ExtraFields = BTreeMap<String, serde_json::Value>;

// =============================================================================
// Raw input (as supplied by the dataset file)
// =============================================================================

/// One entry of a person's `programmingLanguages` list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawLanguage {
    /// Language identifier as supplied (e.g. "Java", "JavaScript").
    pub language: String,

    /// Any other fields on the entry (experience, etc.).
    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// A person exactly as read from the dataset, before indexing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawRecord {
    pub name: String,

    /// Picture URL. Never inspected.
    #[serde(default)]
    pub picture: String,

    /// Languages the person works with. A missing or `null` list is an
    /// empty list, not an error.
    #[serde(
        default,
        rename = "programmingLanguages",
        alias = "languages",
        deserialize_with = "null_as_empty"
    )]
    pub programming_languages: Vec<RawLanguage>,

    /// All remaining top-level fields.
    #[serde(flatten)]
    pub extra: ExtraFields,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<RawLanguage>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<RawLanguage>>::deserialize(deserializer)?.unwrap_or_default())
}

// =============================================================================
// Record (indexed, immutable)
// =============================================================================

/// A person after one-time indexing.
///
/// `search_key` and `language_tags` are derived by `core::index` when the
/// dataset is loaded and are never recomputed. Fields are private so a
/// record cannot drift away from its derived keys after creation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub(crate) name: String,
    pub(crate) picture: String,
    pub(crate) languages: Vec<String>,
    #[serde(skip)]
    pub(crate) search_key: String,
    #[serde(skip)]
    pub(crate) language_tags: Vec<String>,
    #[serde(flatten)]
    pub(crate) extra: ExtraFields,
}

impl Record {
    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Picture URL, passed through unchanged.
    pub fn picture(&self) -> &str {
        &self.picture
    }

    /// Raw language identifiers in dataset order.
    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    /// Lowercase, space-free, accent-free form of the name.
    pub fn search_key(&self) -> &str {
        &self.search_key
    }

    /// Lowercase language tags sorted ascending.
    pub fn language_tags(&self) -> &[String] {
        &self.language_tags
    }
}

// =============================================================================
// Match mode
// =============================================================================

/// How the active tag selection is compared against a person's tags.
///
/// A single enum rather than a pair of flags: exactly one mode is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// At least one active tag is among the person's tags.
    #[default]
    Any,

    /// The person's tag list equals the sorted active tags exactly.
    All,
}

impl MatchMode {
    /// Human-readable label for display.
    pub fn label(&self) -> &'static str {
        match self {
            MatchMode::Any => "any",
            MatchMode::All => "all",
        }
    }
}

impl std::fmt::Display for MatchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for MatchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "any" | "or" => Ok(MatchMode::Any),
            "all" | "and" => Ok(MatchMode::All),
            other => Err(format!(
                "unknown match mode '{other}', expected 'any' or 'all'"
            )),
        }
    }
}

// =============================================================================
// Filter parameters
// =============================================================================

/// Current filter configuration, owned by the state controller and passed
/// explicitly to `core::filter::apply_filters`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterParameters {
    /// Lowercase tag ids currently selected. Kept in a `BTreeSet` so the
    /// iteration order is already the sorted canonical order.
    pub active_tags: BTreeSet<String>,

    /// Tag matching mode.
    pub match_mode: MatchMode,

    /// Normalised search fragment. Empty = no text filter.
    pub search_term: String,
}

impl FilterParameters {
    /// Build parameters from raw user values, normalising each one.
    pub fn new<I, S>(active_tags: I, match_mode: MatchMode, search: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            active_tags: active_tags
                .into_iter()
                .map(|t| t.as_ref().trim().to_lowercase())
                .filter(|t| !t.is_empty())
                .collect(),
            match_mode,
            search_term: crate::core::normalize::normalize_search_input(search),
        }
    }
}

// =============================================================================
// Tag catalog entries
// =============================================================================

/// One selectable language in the tag catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagDefinition {
    /// Lowercase identifier (e.g. "javascript").
    pub id: String,

    /// Display label (e.g. "JavaScript").
    pub label: String,

    /// Icon/logo reference. Empty if none.
    pub image: String,

    /// Whether the tag starts out selected.
    pub default_active: bool,

    /// Whether this is a built-in tag (true) or user-defined (false).
    pub is_builtin: bool,
}

// =============================================================================
// Load progress (loader thread -> controller)
// =============================================================================

/// Messages sent from the dataset loader thread to its owner.
#[derive(Debug, Clone)]
pub enum LoadProgress {
    /// Reading has begun.
    Started { path: PathBuf },

    /// The dataset is available. This is the "data loaded" signal; no filter
    /// pass may run before it arrives.
    Loaded {
        records: Vec<RawRecord>,
        duration: Duration,
    },

    /// The dataset could not be loaded.
    Failed { error: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_mode_default_is_any() {
        assert_eq!(MatchMode::default(), MatchMode::Any);
    }

    #[test]
    fn test_match_mode_from_str() {
        assert_eq!("ANY".parse::<MatchMode>().unwrap(), MatchMode::Any);
        assert_eq!(" all ".parse::<MatchMode>().unwrap(), MatchMode::All);
        assert_eq!("and".parse::<MatchMode>().unwrap(), MatchMode::All);
        assert!("both".parse::<MatchMode>().is_err());
    }

    #[test]
    fn test_filter_parameters_new_normalises() {
        let params =
            FilterParameters::new(["Java", " PYTHON ", ""], MatchMode::All, "  São Paulo ");
        let tags: Vec<&str> = params.active_tags.iter().map(String::as_str).collect();
        assert_eq!(tags, vec!["java", "python"]);
        assert_eq!(params.search_term, "saopaulo");
    }

    #[test]
    fn test_filter_parameters_new_caps_search() {
        let long = "a".repeat(300);
        let params = FilterParameters::new(["java"], MatchMode::Any, &long);
        assert_eq!(
            params.search_term.chars().count(),
            crate::util::constants::MAX_SEARCH_TERM_CHARS
        );
    }

    #[test]
    fn test_raw_record_null_languages_is_empty() {
        let raw: RawRecord =
            serde_json::from_str(r#"{"name": "Ana", "programmingLanguages": null}"#).unwrap();
        assert!(raw.programming_languages.is_empty());
        assert_eq!(raw.picture, "");
    }

    #[test]
    fn test_raw_record_keeps_extra_fields() {
        let raw: RawRecord = serde_json::from_str(
            r#"{"id": 7, "name": "Ana", "picture": "p.png",
                "languages": [{"language": "Go", "experience": 3}]}"#,
        )
        .unwrap();
        assert_eq!(raw.programming_languages[0].language, "Go");
        assert_eq!(raw.programming_languages[0].extra["experience"], 3);
        assert_eq!(raw.extra["id"], 7);
    }
}
