// DevFinder - core/dataset.rs
//
// Raw dataset parsing.
// Core layer: accepts JSON text, never touches the filesystem.
// File reading happens in app::loader.

use crate::core::model::RawRecord;
use crate::util::constants;
use crate::util::error::DatasetError;
use std::path::Path;

/// Parse a JSON array of people.
///
/// `source_path` is used for error messages only (not for I/O).
/// People without languages are kept; unknown fields are carried through.
pub fn parse_dataset(json: &str, source_path: &Path) -> Result<Vec<RawRecord>, DatasetError> {
    let records: Vec<RawRecord> = serde_json::from_str(json).map_err(|e| DatasetError::Json {
        path: source_path.to_path_buf(),
        source: e,
    })?;

    if records.len() > constants::MAX_RECORDS {
        return Err(DatasetError::TooManyRecords {
            count: records.len(),
            max: constants::MAX_RECORDS,
        });
    }

    tracing::debug!(
        path = %source_path.display(),
        records = records.len(),
        "Dataset parsed"
    );

    Ok(records)
}
