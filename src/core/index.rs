// DevFinder - core/index.rs
//
// One-time derivation of search keys and sorted language tags.
// Runs once per record when the dataset is loaded; the result is held
// for the lifetime of the dataset and never recomputed.

use crate::core::model::{RawRecord, Record};
use crate::core::normalize::normalize;

/// Index one raw record.
///
/// Never fails: a person with no languages gets an empty tag list.
pub fn index_record(raw: RawRecord) -> Record {
    let search_key = normalize(&raw.name);

    let languages: Vec<String> = raw
        .programming_languages
        .into_iter()
        .map(|entry| entry.language)
        .collect();

    let mut language_tags: Vec<String> = languages.iter().map(|l| l.to_lowercase()).collect();
    language_tags.sort();

    Record {
        name: raw.name,
        picture: raw.picture,
        languages,
        search_key,
        language_tags,
        extra: raw.extra,
    }
}

/// Index a whole dataset, preserving its order.
pub fn index_dataset(raws: Vec<RawRecord>) -> Vec<Record> {
    let records: Vec<Record> = raws.into_iter().map(index_record).collect();

    tracing::debug!(
        records = records.len(),
        untagged = records.iter().filter(|r| r.language_tags.is_empty()).count(),
        "Dataset indexed"
    );

    records
}
