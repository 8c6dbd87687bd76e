use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use super::{TableError, WeightingTable};

/// A file-backed table that is read on first use.
///
/// The first successful load is published and reused for the life of the
/// value. A failed load publishes nothing, so the next call tries again.
/// Two threads racing on the first call may both read the file; only one
/// result is kept and both see the same table.
#[derive(Debug)]
pub struct LazyTable {
    path: PathBuf,
    table: OnceLock<WeightingTable>,
}

impl LazyTable {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            table: OnceLock::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_loaded(&self) -> bool {
        self.table.get().is_some()
    }

    pub fn get(&self) -> Result<&WeightingTable, TableError> {
        if let Some(table) = self.table.get() {
            return Ok(table);
        }
        let loaded = WeightingTable::load(&self.path)?;
        Ok(self.table.get_or_init(|| loaded))
    }
}
