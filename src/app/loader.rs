// DevFinder - app/loader.rs
//
// Dataset load lifecycle. Reads and parses the people dataset on a
// background thread, reporting progress to the owner via an mpsc channel.
//
// Architecture:
//   - `LoadManager` lives on the controlling thread; `run_load` runs on a
//     background thread.
//   - All cross-thread communication is via `LoadProgress` channel messages.
//   - `LoadProgress::Loaded` is the "data loaded" signal. The state
//     controller refuses to filter until it has seen it.

use crate::core::dataset;
use crate::core::model::{LoadProgress, RawRecord};
use crate::util::constants;
use crate::util::error::DatasetError;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Instant;

// =============================================================================
// LoadManager
// =============================================================================

/// Manages a dataset load on a background thread.
pub struct LoadManager {
    /// Channel receiver for the running load's progress messages.
    pub progress_rx: Option<mpsc::Receiver<LoadProgress>>,
}

impl LoadManager {
    pub fn new() -> Self {
        Self { progress_rx: None }
    }

    /// Start loading the dataset at `path`.
    ///
    /// Spawns a background thread immediately; progress is sent over the
    /// channel. A load already in flight is abandoned (its messages are
    /// dropped with the old receiver).
    pub fn start_load(&mut self, path: PathBuf) {
        let (tx, rx) = mpsc::channel();
        self.progress_rx = Some(rx);

        std::thread::spawn(move || {
            run_load(path, tx);
        });

        tracing::info!("Dataset load started");
    }

    /// Block until the load finishes, returning every message received,
    /// ending with `Loaded` or `Failed`.
    ///
    /// If no load was started, or the loader thread died without reporting,
    /// the last message is a synthesised `Failed`.
    pub fn wait_for_dataset(&mut self) -> Vec<LoadProgress> {
        let mut messages = Vec::new();
        let Some(rx) = self.progress_rx.take() else {
            messages.push(LoadProgress::Failed {
                error: "no dataset load was started".to_string(),
            });
            return messages;
        };

        loop {
            match rx.recv() {
                Ok(msg) => {
                    let finished =
                        matches!(msg, LoadProgress::Loaded { .. } | LoadProgress::Failed { .. });
                    messages.push(msg);
                    if finished {
                        return messages;
                    }
                }
                Err(_) => {
                    tracing::error!("Loader thread exited without reporting a result");
                    messages.push(LoadProgress::Failed {
                        error: "dataset loader stopped unexpectedly".to_string(),
                    });
                    return messages;
                }
            }
        }
    }
}

impl Default for LoadManager {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Background load
// =============================================================================

/// Read + parse pipeline. Runs on a background thread.
fn run_load(path: PathBuf, tx: mpsc::Sender<LoadProgress>) {
    macro_rules! send {
        ($msg:expr) => {
            if tx.send($msg).is_err() {
                return; // Receiver dropped; exit quietly.
            }
        };
    }

    send!(LoadProgress::Started { path: path.clone() });

    let started = Instant::now();
    match read_dataset_file(&path) {
        Ok(records) => {
            let duration = started.elapsed();
            tracing::info!(
                path = %path.display(),
                records = records.len(),
                elapsed_ms = duration.as_millis() as u64,
                "Dataset loaded"
            );
            send!(LoadProgress::Loaded { records, duration });
        }
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "Dataset load failed");
            send!(LoadProgress::Failed {
                error: e.to_string(),
            });
        }
    }
}

/// Read and parse a dataset file synchronously.
///
/// Enforces `MAX_DATASET_FILE_SIZE` before reading the content.
pub fn read_dataset_file(path: &Path) -> Result<Vec<RawRecord>, DatasetError> {
    let metadata = std::fs::metadata(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            DatasetError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            DatasetError::Io {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;

    if metadata.len() > constants::MAX_DATASET_FILE_SIZE {
        return Err(DatasetError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size: constants::MAX_DATASET_FILE_SIZE,
        });
    }

    let content = std::fs::read_to_string(path).map_err(|e| DatasetError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    dataset::parse_dataset(&content, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_dataset(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_signals_loaded() {
        let file = write_dataset(r#"[{"name": "Ana", "programmingLanguages": []}]"#);
        let mut manager = LoadManager::new();
        manager.start_load(file.path().to_path_buf());

        let messages = manager.wait_for_dataset();
        assert!(matches!(messages.first(), Some(LoadProgress::Started { .. })));
        match messages.last() {
            Some(LoadProgress::Loaded { records, .. }) => assert_eq!(records.len(), 1),
            other => panic!("expected Loaded, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_file_signals_failed() {
        let dir = tempfile::tempdir().unwrap();
        let mut manager = LoadManager::new();
        manager.start_load(dir.path().join("nope.json"));

        let messages = manager.wait_for_dataset();
        match messages.last() {
            Some(LoadProgress::Failed { error }) => assert!(error.contains("does not exist")),
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_json_is_dataset_error() {
        let file = write_dataset("not json");
        let result = read_dataset_file(file.path());
        assert!(matches!(result, Err(DatasetError::Json { .. })));
    }

    #[test]
    fn test_wait_without_start_fails() {
        let mut manager = LoadManager::new();
        let messages = manager.wait_for_dataset();
        assert!(matches!(messages.as_slice(), [LoadProgress::Failed { .. }]));
    }

    #[test]
    fn test_oversized_file_rejected_before_read() {
        let file = tempfile::NamedTempFile::new().unwrap();
        file.as_file()
            .set_len(constants::MAX_DATASET_FILE_SIZE + 1)
            .unwrap();

        match read_dataset_file(file.path()) {
            Err(DatasetError::FileTooLarge { size, max_size, .. }) => {
                assert_eq!(size, constants::MAX_DATASET_FILE_SIZE + 1);
                assert_eq!(max_size, constants::MAX_DATASET_FILE_SIZE);
            }
            other => panic!("expected FileTooLarge, got {other:?}"),
        }
    }

    #[test]
    fn test_oversized_file_signals_failed() {
        let file = tempfile::NamedTempFile::new().unwrap();
        file.as_file()
            .set_len(constants::MAX_DATASET_FILE_SIZE + 1)
            .unwrap();
        let mut manager = LoadManager::new();
        manager.start_load(file.path().to_path_buf());

        match manager.wait_for_dataset().last() {
            Some(LoadProgress::Failed { error }) => assert!(error.contains("exceeds maximum")),
            other => panic!("expected Failed, got {other:?}"),
        }
    }
}
