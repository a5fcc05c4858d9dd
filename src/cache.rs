//! Normalized-table memoization keyed by source identity.
//!
//! The loaded table is read-only after construction, so it is shared via
//! `Arc` across repeated view requests. An entry is rebuilt only when the
//! underlying file's modification time changes; there is no other
//! invalidation because the source dataset is static.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::{Arc, RwLock};
use std::time::SystemTime;

use tracing::debug;

use crate::errors::PipelineError;
use crate::normalize::normalize_with_stats;
use crate::record::SalesRecord;
use crate::source::{CsvFileSource, RecordSource};
use crate::types::SourceKey;

/// Thread-safe memo of normalized tables keyed by source identity.
#[derive(Clone, Default)]
pub struct TableCache {
    inner: Arc<RwLock<HashMap<SourceKey, CachedTable>>>,
}

#[derive(Clone)]
struct CachedTable {
    modified: SystemTime,
    records: Arc<Vec<SalesRecord>>,
}

impl TableCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the normalized table for `path`, loading it on first use or
    /// when the file has been modified since it was cached.
    pub fn table(&self, path: &Path) -> Result<Arc<Vec<SalesRecord>>, PipelineError> {
        let source = CsvFileSource::new(path);
        let modified = fs::metadata(path)
            .and_then(|meta| meta.modified())
            .map_err(|err| PipelineError::DataSource {
                source: source.key().to_string(),
                reason: err.to_string(),
            })?;

        if let Some(hit) = self.lookup(source.key(), modified) {
            debug!(source = source.key(), "serving normalized table from cache");
            return Ok(hit);
        }

        let batch = source.load()?;
        let normalized = normalize_with_stats(&batch.rows);
        debug!(
            source = source.key(),
            rows_read = batch.stats.rows_read,
            kept = normalized.records.len(),
            screened_out = batch.stats.dropped(),
            invalid = normalized.stats.dropped(),
            "normalized table rebuilt"
        );
        let records = Arc::new(normalized.records);
        let mut guard = self.inner.write().expect("table cache poisoned");
        guard.insert(
            source.key().to_string(),
            CachedTable {
                modified,
                records: Arc::clone(&records),
            },
        );
        Ok(records)
    }

    fn lookup(&self, key: &str, modified: SystemTime) -> Option<Arc<Vec<SalesRecord>>> {
        let guard = self.inner.read().expect("table cache poisoned");
        guard
            .get(key)
            .filter(|entry| entry.modified == modified)
            .map(|entry| Arc::clone(&entry.records))
    }

    /// Drop the cached table for `key`, forcing the next request to reload.
    pub fn invalidate(&self, key: &str) {
        let mut guard = self.inner.write().expect("table cache poisoned");
        guard.remove(key);
    }

    /// Remove all cached tables.
    pub fn clear(&self) {
        let mut guard = self.inner.write().expect("table cache poisoned");
        guard.clear();
    }

    /// Number of sources currently cached.
    pub fn len(&self) -> usize {
        self.inner.read().expect("table cache poisoned").len()
    }

    /// Returns `true` when no source is cached.
    pub fn is_empty(&self) -> bool {
        self.inner.read().expect("table cache poisoned").is_empty()
    }
}
