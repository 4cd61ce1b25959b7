// DevFinder - core/export.rs
//
// CSV and JSON export of filtered people.
// Core layer: writes to any Write trait object.

use crate::core::model::Record;
use crate::util::constants;
use crate::util::error::ExportError;
use std::io::Write;
use std::path::Path;

/// Export records to CSV format.
///
/// Writes: name, picture, languages (joined with `CSV_LANGUAGE_SEPARATOR`).
/// `export_path` is used for error messages only.
pub fn export_csv<W: Write>(
    records: &[&Record],
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    let csv_err = |e: csv::Error| ExportError::Csv {
        path: export_path.to_path_buf(),
        source: e,
    };

    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer
        .write_record(["name", "picture", "languages"])
        .map_err(csv_err)?;

    for record in records {
        let languages = record.languages().join(constants::CSV_LANGUAGE_SEPARATOR);
        csv_writer
            .write_record([record.name(), record.picture(), languages.as_str()])
            .map_err(csv_err)?;
    }

    csv_writer.flush().map_err(|e| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    })?;

    Ok(records.len())
}

/// Export records to JSON format (array of objects, pass-through fields
/// included).
pub fn export_json<W: Write>(
    records: &[&Record],
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    serde_json::to_writer_pretty(writer, records).map_err(|e| ExportError::Json {
        path: export_path.to_path_buf(),
        source: e,
    })?;
    Ok(records.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::index::index_record;
    use crate::core::model::{RawLanguage, RawRecord};

    fn make_record(name: &str, languages: &[&str]) -> Record {
        let mut extra = crate::core::model::ExtraFields::new();
        extra.insert("id".to_string(), serde_json::json!(42));
        index_record(RawRecord {
            name: name.to_string(),
            picture: "pic.png".to_string(),
            programming_languages: languages
                .iter()
                .map(|l| RawLanguage {
                    language: l.to_string(),
                    extra: Default::default(),
                })
                .collect(),
            extra,
        })
    }

    #[test]
    fn test_csv_export() {
        let a = make_record("Ana Índio", &["Java"]);
        let b = make_record("Bruno", &["Python", "Java"]);
        let mut buf = Vec::new();
        let count = export_csv(&[&a, &b], &mut buf, Path::new("out.csv")).unwrap();
        assert_eq!(count, 2);

        let output = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "name,picture,languages");
        assert_eq!(lines[1], "Ana Índio,pic.png,Java");
        assert_eq!(lines[2], "Bruno,pic.png,Python;Java");
    }

    #[test]
    fn test_json_export() {
        let a = make_record("Ana", &["Go"]);
        let mut buf = Vec::new();
        let count = export_json(&[&a], &mut buf, Path::new("out.json")).unwrap();
        assert_eq!(count, 1);

        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value[0]["name"], "Ana");
        assert_eq!(value[0]["languages"][0], "Go");
        assert_eq!(value[0]["id"], 42);
        assert!(value[0].get("search_key").is_none());
    }

    #[test]
    fn test_empty_export() {
        let mut buf = Vec::new();
        let count = export_json(&[], &mut buf, Path::new("out.json")).unwrap();
        assert_eq!(count, 0);
        assert_eq!(String::from_utf8(buf).unwrap(), "[]");
    }
}
