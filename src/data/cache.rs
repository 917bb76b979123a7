//! Path-keyed cache of loaded tables.
//! Owned by the caller; there is no process-wide instance.

use crate::data::loader::{DataLoader, LoaderError, LoaderOptions};
use crate::data::table::SunspotTable;
use std::collections::HashMap;
use std::sync::Arc;

/// Caches one table per literal path string.
#[derive(Debug, Default)]
pub struct LoadCache {
    loader: DataLoader,
    tables: HashMap<String, Arc<SunspotTable>>,
}

impl LoadCache {
    pub fn new(options: LoaderOptions) -> Self {
        Self {
            loader: DataLoader::new(options),
            tables: HashMap::new(),
        }
    }

    /// Load a table, reading the file only on the first call for `path`.
    ///
    /// Failed loads are not cached, so a fixed file is picked up on the next call.
    pub fn load(&mut self, path: &str) -> Result<Arc<SunspotTable>, LoaderError> {
        if let Some(table) = self.tables.get(path) {
            log::debug!("Cache hit for '{}'", path);
            return Ok(Arc::clone(table));
        }

        log::debug!("Cache miss for '{}'", path);
        let table = Arc::new(self.loader.load_csv(path)?);
        self.tables.insert(path.to_string(), Arc::clone(&table));
        Ok(table)
    }

    /// Drop the cached table for `path`. Returns true if one was present.
    pub fn invalidate(&mut self, path: &str) -> bool {
        self.tables.remove(path).is_some()
    }

    pub fn clear(&mut self) {
        self.tables.clear();
    }

    pub fn contains(&self, path: &str) -> bool {
        self.tables.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn loader_options(&self) -> &LoaderOptions {
        self.loader.options()
    }
}
