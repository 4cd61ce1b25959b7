// DevFinder - core/catalog.rs
//
// Tag catalog parsing, validation, and lookup.
// Core layer: accepts TOML strings, never touches the filesystem.
// I/O is handled by app::catalog_mgr which feeds content here.
//
// The catalog defines the universe of selectable tags and their display
// labels/images. The filter engine never consults it.

use crate::core::model::TagDefinition;
use crate::util::constants;
use crate::util::error::CatalogError;
use regex::Regex;
use serde::Deserialize;
use std::collections::{BTreeSet, HashSet};
use std::path::Path;

// =============================================================================
// TOML deserialization structures (raw input)
// =============================================================================

/// Raw catalog file as deserialized from TOML.
#[derive(Debug, Deserialize, Default)]
pub struct CatalogFile {
    #[serde(default)]
    pub tag: Vec<TagDef>,
}

/// One `[[tag]]` table.
#[derive(Debug, Deserialize)]
pub struct TagDef {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub default_active: bool,
}

// =============================================================================
// Parsing and validation
// =============================================================================

/// Parse a TOML string into a `CatalogFile`.
///
/// `source_path` is used for error messages only (not for I/O).
pub fn parse_catalog_toml(
    toml_content: &str,
    source_path: &Path,
) -> Result<CatalogFile, CatalogError> {
    toml::from_str(toml_content).map_err(|e| CatalogError::TomlParse {
        path: source_path.to_path_buf(),
        source: e,
    })
}

/// Validate a `CatalogFile` and turn it into runtime tag definitions.
///
/// Validates:
/// - ids are non-empty, lowercase, within length limits and match `TAG_ID_PATTERN`
/// - labels are non-empty
/// - no id appears twice in the same file
pub fn validate_and_compile(
    file: CatalogFile,
    source_path: &Path,
    is_builtin: bool,
) -> Result<Vec<TagDefinition>, CatalogError> {
    let id_pattern =
        Regex::new(constants::TAG_ID_PATTERN).map_err(|e| CatalogError::InvalidPattern {
            pattern: constants::TAG_ID_PATTERN.to_string(),
            source: e,
        })?;

    if file.tag.len() > constants::MAX_CATALOG_TAGS {
        return Err(CatalogError::TooManyTags {
            count: file.tag.len(),
            max: constants::MAX_CATALOG_TAGS,
        });
    }

    let mut seen = HashSet::new();
    let mut tags = Vec::with_capacity(file.tag.len());

    for def in file.tag {
        let id = def.id.trim().to_string();
        validate_tag_id(&id, &id_pattern)?;

        let label = def.label.trim().to_string();
        if label.is_empty() {
            return Err(CatalogError::MissingField {
                tag_id: id,
                field: "label",
            });
        }

        if !seen.insert(id.clone()) {
            return Err(CatalogError::DuplicateId {
                id,
                path: source_path.to_path_buf(),
            });
        }

        tags.push(TagDefinition {
            id,
            label,
            image: def.image.trim().to_string(),
            default_active: def.default_active,
            is_builtin,
        });
    }

    Ok(tags)
}

fn validate_tag_id(id: &str, pattern: &Regex) -> Result<(), CatalogError> {
    let reason = if id.is_empty() {
        "id is empty".to_string()
    } else if id.len() > constants::MAX_TAG_ID_LENGTH {
        format!(
            "id is {} chars, exceeds maximum of {}",
            id.len(),
            constants::MAX_TAG_ID_LENGTH
        )
    } else if id != id.to_lowercase() {
        "id must be lowercase".to_string()
    } else if !pattern.is_match(id) {
        format!("id must match {}", constants::TAG_ID_PATTERN)
    } else {
        return Ok(());
    };

    Err(CatalogError::InvalidId {
        id: id.to_string(),
        reason,
    })
}

// =============================================================================
// Runtime catalog
// =============================================================================

/// Ordered, read-only set of selectable tags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagCatalog {
    tags: Vec<TagDefinition>,
}

impl TagCatalog {
    /// Build a catalog from already-validated definitions. Order is kept.
    pub fn new(tags: Vec<TagDefinition>) -> Self {
        Self { tags }
    }

    /// Look up a tag by id (case-insensitive).
    pub fn get(&self, id: &str) -> Option<&TagDefinition> {
        let id = id.to_lowercase();
        self.tags.iter().find(|t| t.id == id)
    }

    /// Whether `id` is a known tag.
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Display label for a tag, falling back to the id itself for tags the
    /// catalog does not know.
    pub fn label_for<'a>(&'a self, id: &'a str) -> &'a str {
        self.get(id).map_or(id, |t| t.label.as_str())
    }

    /// Image reference for a tag, if the catalog has a non-empty one.
    pub fn image_for(&self, id: &str) -> Option<&str> {
        self.get(id)
            .map(|t| t.image.as_str())
            .filter(|img| !img.is_empty())
    }

    /// Tags marked `default_active`, as the initial selection.
    pub fn default_active(&self) -> BTreeSet<String> {
        self.tags
            .iter()
            .filter(|t| t.default_active)
            .map(|t| t.id.clone())
            .collect()
    }

    /// All tags in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &TagDefinition> {
        self.tags.iter()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Insert or replace a tag by id. Replaced tags keep their position.
    /// Returns true if an existing tag was replaced.
    pub fn upsert(&mut self, tag: TagDefinition) -> bool {
        if let Some(pos) = self.tags.iter().position(|t| t.id == tag.id) {
            self.tags[pos] = tag;
            true
        } else {
            self.tags.push(tag);
            false
        }
    }

    /// Drop tags beyond `max`, keeping catalog order.
    pub fn truncate(&mut self, max: usize) {
        self.tags.truncate(max);
    }
}

// =============================================================================
// Built-in catalog (embedded at compile time)
// =============================================================================

/// Embedded TOML content for the built-in catalog.
/// Each tuple is (filename, TOML content).
pub fn builtin_catalog_sources() -> Vec<(&'static str, &'static str)> {
    vec![(
        "languages.toml",
        include_str!("../../catalog/languages.toml"),
    )]
}

/// Load and validate the built-in catalog.
///
/// Invalid sources are logged and skipped (non-fatal).
pub fn load_builtin_catalog() -> TagCatalog {
    let mut catalog = TagCatalog::default();

    for (filename, content) in builtin_catalog_sources() {
        let path = Path::new("<builtin>").join(filename);
        match parse_catalog_toml(content, &path)
            .and_then(|file| validate_and_compile(file, &path, true))
        {
            Ok(tags) => {
                tracing::debug!(file = filename, tags = tags.len(), "Loaded built-in tags");
                for tag in tags {
                    catalog.upsert(tag);
                }
            }
            Err(e) => {
                // Built-in failures are bugs, but we still degrade gracefully
                tracing::error!(file = filename, error = %e, "Failed to load built-in catalog");
            }
        }
    }

    catalog
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_CATALOG_TOML: &str = r#"
[[tag]]
id = "rust"
label = "Rust"
image = "rust.svg"
default_active = true

[[tag]]
id = "c++"
label = "C++"
"#;

    fn compile(toml: &str) -> Result<Vec<TagDefinition>, CatalogError> {
        let path = Path::new("test.toml");
        parse_catalog_toml(toml, path).and_then(|f| validate_and_compile(f, path, false))
    }

    #[test]
    fn test_parse_valid_catalog() {
        let tags = compile(VALID_CATALOG_TOML).unwrap();
        assert_eq!(tags.len(), 2);
        assert_eq!(tags[0].id, "rust");
        assert!(tags[0].default_active);
        assert_eq!(tags[1].id, "c++");
        assert_eq!(tags[1].image, "");
        assert!(!tags[1].default_active);
        assert!(!tags[1].is_builtin);
    }

    #[test]
    fn test_uppercase_id_rejected() {
        let result = compile("[[tag]]\nid = \"Rust\"\nlabel = \"Rust\"\n");
        assert!(matches!(result, Err(CatalogError::InvalidId { .. })));
    }

    #[test]
    fn test_id_with_space_rejected() {
        let result = compile("[[tag]]\nid = \"visual basic\"\nlabel = \"VB\"\n");
        assert!(matches!(result, Err(CatalogError::InvalidId { .. })));
    }

    #[test]
    fn test_empty_label_rejected() {
        let result = compile("[[tag]]\nid = \"go\"\nlabel = \"  \"\n");
        assert!(matches!(
            result,
            Err(CatalogError::MissingField { field: "label", .. })
        ));
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let result = compile(concat!(
            "[[tag]]\nid = \"go\"\nlabel = \"Go\"\n",
            "[[tag]]\nid = \"go\"\nlabel = \"Golang\"\n",
        ));
        assert!(matches!(result, Err(CatalogError::DuplicateId { .. })));
    }

    #[test]
    fn test_invalid_toml() {
        let result = compile("[[tag]\nid = ");
        assert!(matches!(result, Err(CatalogError::TomlParse { .. })));
    }

    #[test]
    fn test_builtin_catalog() {
        let catalog = load_builtin_catalog();
        let ids: Vec<&str> = catalog.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["java", "javascript", "python"]);
        assert_eq!(catalog.label_for("javascript"), "JavaScript");
        assert!(catalog.image_for("python").is_some());
        assert_eq!(catalog.default_active().len(), 3);
        assert!(catalog.iter().all(|t| t.is_builtin));
    }

    #[test]
    fn test_lookup_is_case_insensitive_and_falls_back() {
        let catalog = load_builtin_catalog();
        assert!(catalog.contains("JAVA"));
        assert_eq!(catalog.label_for("cobol"), "cobol");
        assert_eq!(catalog.image_for("cobol"), None);
    }

    #[test]
    fn test_upsert_replaces_in_place() {
        let mut catalog = load_builtin_catalog();
        let replaced = catalog.upsert(TagDefinition {
            id: "java".to_string(),
            label: "Java SE".to_string(),
            image: String::new(),
            default_active: false,
            is_builtin: false,
        });
        assert!(replaced);
        assert_eq!(catalog.iter().next().map(|t| t.label.as_str()), Some("Java SE"));
        assert_eq!(catalog.len(), 3);
    }
}
