//! Tiered file store for extracted records
//!
//! One JSON document per record, grouped by tier:
//! `<root>/<tier>/<id>.json`. The store sits outside the pure extraction
//! core; the engine never touches the filesystem.

use crate::error::{MemsiftError, Result};
use crate::record::{Record, Tier};
use std::fs;
use std::path::{Path, PathBuf};

/// Record sink persisting one document per record under tier directories
pub struct RecordStore {
    root: PathBuf,
}

impl RecordStore {
    /// Open a store rooted at `root`, creating the directory if needed
    pub fn new(root: PathBuf) -> Result<Self> {
        fs::create_dir_all(&root).map_err(|e| MemsiftError::Io {
            source: e,
            context: format!("Failed to create record store root: {}", root.display()),
        })?;
        Ok(Self { root })
    }

    /// Directory holding one tier's records
    pub fn tier_dir(&self, tier: Tier) -> PathBuf {
        self.root.join(tier.as_str())
    }

    /// Path a record is (or would be) stored at
    pub fn record_path(&self, record: &Record) -> PathBuf {
        self.tier_dir(record.tier).join(format!("{}.json", record.id))
    }

    /// Persist one record, returning its path
    pub fn save(&self, record: &Record) -> Result<PathBuf> {
        let dir = self.tier_dir(record.tier);
        fs::create_dir_all(&dir).map_err(|e| MemsiftError::Io {
            source: e,
            context: format!("Failed to create tier directory: {}", dir.display()),
        })?;

        let path = self.record_path(record);
        let json = serde_json::to_string_pretty(record).map_err(|e| MemsiftError::Json {
            source: e,
            context: format!("Failed to serialize record {}", record.id),
        })?;
        fs::write(&path, json).map_err(|e| MemsiftError::Io {
            source: e,
            context: format!("Failed to write record file: {}", path.display()),
        })?;

        tracing::info!(
            "Saved record {}/{} - {}",
            record.category,
            record.tier,
            truncate(&record.content, 50)
        );
        Ok(path)
    }

    /// Persist a batch, logging and skipping failures. Returns how many
    /// records were saved; partial success is normal.
    pub fn save_all(&self, records: &[Record]) -> usize {
        let mut saved = 0;
        for record in records {
            match self.save(record) {
                Ok(_) => saved += 1,
                Err(e) => tracing::error!("Failed to save record {}: {}", record.id, e),
            }
        }
        saved
    }

    /// Read one record back by tier and id
    pub fn load(&self, tier: Tier, id: &str) -> Result<Record> {
        let path = self.tier_dir(tier).join(format!("{}.json", id));
        let content = fs::read_to_string(&path).map_err(|e| MemsiftError::Io {
            source: e,
            context: format!("Failed to read record file: {}", path.display()),
        })?;
        serde_json::from_str(&content).map_err(|e| MemsiftError::Json {
            source: e,
            context: format!("Failed to parse record file: {}", path.display()),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}
