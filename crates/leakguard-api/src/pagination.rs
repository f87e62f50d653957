//! Paged list results
//!
//! The backend wraps list payloads in its standard page record:
//! `{records, total, size, current}`.

use serde::{Deserialize, Serialize};

/// One page of a list endpoint's results
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paged<T> {
    /// Items on this page
    pub records: Vec<T>,
    /// Total items across all pages
    pub total: u64,
    /// Page size the server applied
    pub size: u32,
    /// 1-based page number
    pub current: u32,
}

impl<T> Paged<T> {
    /// Whether another page exists after this one
    pub fn has_more(&self) -> bool {
        u64::from(self.current) * u64::from(self.size) < self.total
    }
}
