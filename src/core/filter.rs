// DevFinder - core/filter.rs
//
// Filter engine for indexed people.
// Tag matching (any/all) and name search are AND-combined.
// Core layer: pure logic, no I/O or UI dependencies.

use crate::core::model::{FilterParameters, MatchMode, Record};

/// Apply filters to a slice of records, returning indices of matching records.
///
/// Indices are ascending, so matching records keep their original relative
/// order. Always a full scan; never fails. An empty result is a valid result.
pub fn apply_filters(records: &[Record], params: &FilterParameters) -> Vec<usize> {
    // Lowercased and sorted so All mode can compare sequences directly.
    let mut sorted_active: Vec<String> = params
        .active_tags
        .iter()
        .map(|t| t.to_lowercase())
        .collect();
    sorted_active.sort();

    let result: Vec<usize> = records
        .iter()
        .enumerate()
        .filter(|(_, record)| matches_tags(record, &sorted_active, params.match_mode))
        .filter(|(_, record)| matches_search(record, &params.search_term))
        .map(|(idx, _)| idx)
        .collect();

    tracing::trace!(
        total = records.len(),
        matched = result.len(),
        mode = %params.match_mode,
        active_tags = sorted_active.len(),
        searching = !params.search_term.is_empty(),
        "Filter pass complete"
    );

    result
}

/// Convenience wrapper returning the matching records themselves.
pub fn filter_records<'a>(records: &'a [Record], params: &FilterParameters) -> Vec<&'a Record> {
    apply_filters(records, params)
        .into_iter()
        .map(|idx| &records[idx])
        .collect()
}

/// Tag predicate for one record.
fn matches_tags(record: &Record, sorted_active: &[String], mode: MatchMode) -> bool {
    match mode {
        // Record tags are sorted at index time.
        MatchMode::Any => sorted_active
            .iter()
            .any(|tag| record.language_tags.binary_search(tag).is_ok()),
        // Exact sequence equality: both membership and cardinality.
        MatchMode::All => record.language_tags.as_slice() == sorted_active,
    }
}

/// Name search predicate. Both sides are already normalised.
fn matches_search(record: &Record, search_term: &str) -> bool {
    search_term.is_empty() || record.search_key.contains(search_term)
}
