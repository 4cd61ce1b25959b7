// DevFinder - app/state.rs
//
// Application state management. Holds the indexed dataset, the tag
// catalog, the current filter parameters and the filtered view.
// Owned by a single controller (the CLI loop); every setter runs one
// synchronous filter pass before returning.

use crate::core::catalog::TagCatalog;
use crate::core::filter;
use crate::core::index;
use crate::core::model::{FilterParameters, LoadProgress, MatchMode, RawRecord, Record};
use crate::core::normalize::normalize_search_input;

/// Availability of the dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataStatus {
    /// Waiting for the loader's "data loaded" signal.
    Loading,

    /// Dataset indexed; filtering is allowed.
    Ready,

    /// Loading failed. No filter pass will run.
    Unavailable { reason: String },
}

/// Top-level application state.
#[derive(Debug)]
pub struct AppState {
    /// Tag catalog (labels and images for display, initial selection).
    pub catalog: TagCatalog,

    /// Indexed dataset. Written once by `on_dataset_loaded`.
    records: Vec<Record>,

    /// Current filter configuration.
    filter: FilterParameters,

    /// Indices of records matching the current filter (into `records`).
    filtered_indices: Vec<usize>,

    /// Dataset availability.
    status: DataStatus,

    /// Status message for display.
    pub status_message: String,
}

impl AppState {
    /// Create initial state. The dataset is not available yet.
    pub fn new(catalog: TagCatalog, filter: FilterParameters) -> Self {
        Self {
            catalog,
            records: Vec::new(),
            filter,
            filtered_indices: Vec::new(),
            status: DataStatus::Loading,
            status_message: "Loading people...".to_string(),
        }
    }

    // -------------------------------------------------------------------------
    // Dataset lifecycle
    // -------------------------------------------------------------------------

    /// Route a loader message to the matching lifecycle handler.
    pub fn handle_load_progress(&mut self, msg: LoadProgress) {
        match msg {
            LoadProgress::Started { path } => {
                tracing::debug!(path = %path.display(), "Dataset load reported started");
                self.status_message = format!("Loading {}...", path.display());
            }
            LoadProgress::Loaded { records, duration } => {
                tracing::debug!(elapsed_ms = duration.as_millis() as u64, "Load signal received");
                self.on_dataset_loaded(records);
            }
            LoadProgress::Failed { error } => self.on_dataset_failed(error),
        }
    }

    /// Index the raw dataset and run the first filter pass.
    ///
    /// The indexed dataset is built exactly once; later calls are ignored.
    pub fn on_dataset_loaded(&mut self, raws: Vec<RawRecord>) {
        if self.status == DataStatus::Ready {
            tracing::warn!("Dataset already loaded; ignoring second load");
            return;
        }

        self.records = index::index_dataset(raws);
        self.status = DataStatus::Ready;
        self.apply_filters();
        tracing::info!(
            people = self.records.len(),
            visible = self.filtered_indices.len(),
            "Dataset ready"
        );
    }

    /// Mark the dataset unavailable. Filtering stays disabled.
    pub fn on_dataset_failed(&mut self, reason: String) {
        if self.status == DataStatus::Ready {
            tracing::warn!(reason = %reason, "Late load failure ignored; dataset already loaded");
            return;
        }
        tracing::error!(reason = %reason, "Dataset unavailable");
        self.status_message = format!("Dataset unavailable: {reason}");
        self.status = DataStatus::Unavailable { reason };
        self.filtered_indices.clear();
    }

    pub fn status(&self) -> &DataStatus {
        &self.status
    }

    pub fn is_ready(&self) -> bool {
        self.status == DataStatus::Ready
    }

    // -------------------------------------------------------------------------
    // Setters (the only mutation entry points for filter state)
    // -------------------------------------------------------------------------

    /// Set the search text. Input is trimmed, capped and normalised.
    pub fn set_search_term(&mut self, raw: &str) {
        self.filter.search_term = normalize_search_input(raw);
        tracing::debug!(len = self.filter.search_term.len(), "Search term changed");
        self.apply_filters();
    }

    /// Select or deselect one tag. Unknown tags are accepted; they simply
    /// never match.
    pub fn set_active_tag(&mut self, tag_id: &str, active: bool) {
        let tag = tag_id.trim().to_lowercase();
        if tag.is_empty() {
            return;
        }
        if !self.catalog.contains(&tag) {
            tracing::debug!(tag = %tag, "Tag not in catalog");
        }

        let changed = if active {
            self.filter.active_tags.insert(tag.clone())
        } else {
            self.filter.active_tags.remove(&tag)
        };
        tracing::debug!(tag = %tag, active, changed, "Tag toggled");
        self.apply_filters();
    }

    /// Flip one tag, returning its new state.
    pub fn toggle_tag(&mut self, tag_id: &str) -> bool {
        let active = !self.is_tag_active(tag_id);
        self.set_active_tag(tag_id, active);
        active
    }

    /// Switch between any/all matching.
    pub fn set_match_mode(&mut self, mode: MatchMode) {
        tracing::debug!(from = %self.filter.match_mode, to = %mode, "Match mode changed");
        self.filter.match_mode = mode;
        self.apply_filters();
    }

    // -------------------------------------------------------------------------
    // Filtering
    // -------------------------------------------------------------------------

    /// Recompute filtered indices from the dataset and filter state.
    ///
    /// No-op (empty view) until the dataset is ready.
    pub fn apply_filters(&mut self) {
        if !self.is_ready() {
            tracing::debug!(status = ?self.status, "Filter skipped; dataset not ready");
            self.filtered_indices.clear();
            return;
        }

        self.filtered_indices = filter::apply_filters(&self.records, &self.filter);
        self.status_message = format!("{} person(s) found", self.filtered_indices.len());
    }

    // -------------------------------------------------------------------------
    // Read access for renderers
    // -------------------------------------------------------------------------

    pub fn filter(&self) -> &FilterParameters {
        &self.filter
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Records in the current filtered view, in dataset order.
    pub fn visible_records(&self) -> Vec<&Record> {
        self.filtered_indices
            .iter()
            .filter_map(|&idx| self.records.get(idx))
            .collect()
    }

    pub fn result_count(&self) -> usize {
        self.filtered_indices.len()
    }

    pub fn is_tag_active(&self, tag_id: &str) -> bool {
        self.filter
            .active_tags
            .contains(&tag_id.trim().to_lowercase())
    }

    /// Active tags ordered as in the catalog, followed by any active tags
    /// the catalog does not know (sorted).
    pub fn active_tags_in_catalog_order(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self
            .catalog
            .iter()
            .filter(|t| self.filter.active_tags.contains(&t.id))
            .map(|t| t.id.as_str())
            .collect();
        tags.extend(
            self.filter
                .active_tags
                .iter()
                .filter(|t| !self.catalog.contains(t))
                .map(String::as_str),
        );
        tags
    }
}
