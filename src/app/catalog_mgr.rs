// DevFinder - app/catalog_mgr.rs
//
// Loads the tag catalog from the built-in source (embedded in the binary)
// and an optional user-defined TOML file on disk.
// User tags override built-in tags with the same id.

use crate::core::catalog::{self, TagCatalog};
use crate::core::model::TagDefinition;
use crate::util::constants;
use crate::util::error::CatalogError;
use std::path::Path;

/// Load the catalog: built-in first, then user-defined overrides.
///
/// A missing user file is not an error. An invalid user file is reported
/// and ignored as a whole; the built-in catalog is still returned.
///
/// Returns the merged catalog and any non-fatal errors encountered.
pub fn load_catalog(user_catalog: Option<&Path>) -> (TagCatalog, Vec<CatalogError>) {
    let mut catalog = catalog::load_builtin_catalog();
    let mut errors = Vec::new();

    tracing::info!(builtin_count = catalog.len(), "Loaded built-in tags");

    if let Some(path) = user_catalog {
        if path.is_file() {
            match load_user_catalog(path) {
                Ok(tags) => {
                    for tag in tags {
                        let id = tag.id.clone();
                        if catalog.upsert(tag) {
                            tracing::info!(tag = %id, "User tag overrides built-in");
                        } else {
                            tracing::info!(tag = %id, "Loaded user-defined tag");
                        }
                    }
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "User catalog ignored");
                    errors.push(e);
                }
            }
        } else {
            tracing::debug!(
                path = %path.display(),
                "User catalog does not exist (skipping)"
            );
        }
    }

    if catalog.len() > constants::MAX_CATALOG_TAGS {
        tracing::warn!(
            count = catalog.len(),
            max = constants::MAX_CATALOG_TAGS,
            "Too many tags loaded, truncating"
        );
        errors.push(CatalogError::TooManyTags {
            count: catalog.len(),
            max: constants::MAX_CATALOG_TAGS,
        });
        catalog.truncate(constants::MAX_CATALOG_TAGS);
    }

    tracing::info!(total = catalog.len(), "Catalog loading complete");

    (catalog, errors)
}

/// Read, size-check, parse, and validate one user catalog file.
fn load_user_catalog(path: &Path) -> Result<Vec<TagDefinition>, CatalogError> {
    let metadata = std::fs::metadata(path).map_err(|e| CatalogError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    if metadata.len() > constants::MAX_CATALOG_FILE_SIZE {
        return Err(CatalogError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size: constants::MAX_CATALOG_FILE_SIZE,
        });
    }

    let content = std::fs::read_to_string(path).map_err(|e| CatalogError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    catalog::parse_catalog_toml(&content, path)
        .and_then(|file| catalog::validate_and_compile(file, path, false))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_user_catalog() {
        let (catalog, errors) = load_catalog(None);
        assert_eq!(catalog.len(), 3);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_missing_user_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let (catalog, errors) = load_catalog(Some(&dir.path().join("tags.toml")));
        assert_eq!(catalog.len(), 3);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_user_tags_override_and_extend() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tags.toml");
        std::fs::write(
            &path,
            concat!(
                "[[tag]]\nid = \"python\"\nlabel = \"Python 3\"\n\n",
                "[[tag]]\nid = \"rust\"\nlabel = \"Rust\"\ndefault_active = true\n",
            ),
        )
        .unwrap();

        let (catalog, errors) = load_catalog(Some(&path));
        assert!(errors.is_empty());
        let ids: Vec<&str> = catalog.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["java", "javascript", "python", "rust"]);
        assert_eq!(catalog.label_for("python"), "Python 3");
        // The override did not set default_active, so python is no longer preselected.
        assert!(!catalog.default_active().contains("python"));
        assert!(catalog.default_active().contains("rust"));
    }

    #[test]
    fn test_invalid_user_file_keeps_builtin() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tags.toml");
        std::fs::write(&path, "[[tag]]\nid = \"Bad Id\"\nlabel = \"x\"\n").unwrap();

        let (catalog, errors) = load_catalog(Some(&path));
        assert_eq!(catalog.len(), 3);
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], CatalogError::InvalidId { .. }));
    }

    #[test]
    fn test_oversized_user_file_keeps_builtin() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tags.toml");
        let file = std::fs::File::create(&path).unwrap();
        file.set_len(constants::MAX_CATALOG_FILE_SIZE + 1).unwrap();

        let (catalog, errors) = load_catalog(Some(&path));
        assert_eq!(catalog.len(), 3);
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            errors[0],
            CatalogError::FileTooLarge { max_size, .. }
                if max_size == constants::MAX_CATALOG_FILE_SIZE
        ));
    }

    #[test]
    fn test_merged_catalog_truncated_to_max() {
        // Each file stays under the per-file limit; built-in + user goes over.
        let extra = constants::MAX_CATALOG_TAGS - 1;
        let content: String = (0..extra)
            .map(|i| format!("[[tag]]\nid = \"lang{i}\"\nlabel = \"Lang {i}\"\n\n"))
            .collect();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tags.toml");
        std::fs::write(&path, content).unwrap();

        let (catalog, errors) = load_catalog(Some(&path));
        assert_eq!(catalog.len(), constants::MAX_CATALOG_TAGS);
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            errors[0],
            CatalogError::TooManyTags { count, max }
                if count == 3 + extra && max == constants::MAX_CATALOG_TAGS
        ));
        // Built-in tags come first and survive; the last user tag is dropped.
        assert!(catalog.contains("java"));
        assert!(catalog.contains("lang0"));
        assert!(!catalog.contains(&format!("lang{}", extra - 1)));
    }
}
