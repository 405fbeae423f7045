//! Collection settings: page size and where JSON-lines logs are written.

use crate::constants::{DEFAULT_LOGS_DIR, DEFAULT_PAGE_SIZE};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Settings that shape a collection run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionConfig {
    /// Events requested per page (`limit` query parameter)
    pub page_size: u32,
    /// Directory receiving `<name>.log` JSON-lines files
    pub logs_dir: PathBuf,
}

impl Default for CollectionConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            logs_dir: PathBuf::from(DEFAULT_LOGS_DIR),
        }
    }
}
