//! Dataset loading.
//!
//! The ranking engine only ever sees an in-memory `Vec<Entry>`; this module
//! is the collaborator that produces it. The default provider reads
//! `<data_dir>/characters.jsonl`, one entry per line:
//!
//! ```json
//! {"id":"1","name":"...","kind":"local","records":[{"date":"2020-08-03","rank":1,"point":120}]}
//! ```

mod jsonl;

pub use jsonl::JsonlReader;

use std::path::PathBuf;

use thiserror::Error;
use tracing::{debug, info};

use crate::models::Entry;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration for storage paths.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl StorageConfig {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub fn dataset_path(&self) -> PathBuf {
        self.data_dir.join("characters.jsonl")
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new(PathBuf::from("./data"))
    }
}

/// Source of the full character dataset.
pub trait DatasetProvider: Send + Sync {
    /// Every rankable entry: at least one snapshot and a non-empty id.
    fn fetch_all(&self) -> Result<Vec<Entry>, StorageError>;
}

/// Keep entries that have snapshots and make sure each has an id.
pub fn prepare_entries(entries: Vec<Entry>) -> Vec<Entry> {
    entries
        .into_iter()
        .filter_map(|mut entry| {
            if !entry.has_records() {
                debug!("Skipping {} ({}): no snapshots", entry.name(), entry.id());
                return None;
            }
            entry.ensure_id();
            Some(entry)
        })
        .collect()
}

/// Dataset stored as a JSONL file.
#[derive(Debug, Clone)]
pub struct JsonlDataset {
    config: StorageConfig,
}

impl JsonlDataset {
    pub fn new(config: StorageConfig) -> Self {
        Self { config }
    }

    /// Every parsed entry, including ones with no snapshots.
    pub fn read_raw(&self) -> Result<Vec<Entry>, StorageError> {
        let mut entries = JsonlReader::<Entry>::new(self.config.dataset_path()).read_all()?;
        for entry in &mut entries {
            entry.ensure_id();
        }
        Ok(entries)
    }
}

impl DatasetProvider for JsonlDataset {
    fn fetch_all(&self) -> Result<Vec<Entry>, StorageError> {
        let raw = self.read_raw()?;
        let total = raw.len();
        let entries = prepare_entries(raw);
        info!(
            "Loaded {} characters from {:?} ({} without snapshots skipped)",
            entries.len(),
            self.config.dataset_path(),
            total - entries.len()
        );
        Ok(entries)
    }
}

/// Dataset held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDataset {
    entries: Vec<Entry>,
}

impl InMemoryDataset {
    pub fn new(entries: Vec<Entry>) -> Self {
        Self {
            entries: prepare_entries(entries),
        }
    }
}

impl DatasetProvider for InMemoryDataset {
    fn fetch_all(&self) -> Result<Vec<Entry>, StorageError> {
        Ok(self.entries.clone())
    }
}
