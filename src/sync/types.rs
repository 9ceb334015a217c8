//! Sync run summaries.

use serde::Serialize;

use crate::timeline::Post;

/// How a run was performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncMode {
    /// Whole history written to a fresh destination.
    Full,
    /// Newer posts spliced ahead of an existing archive.
    Update,
}

impl std::fmt::Display for SyncMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Full => write!(f, "full"),
            Self::Update => write!(f, "update"),
        }
    }
}

/// Statistics for one sync run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncStats {
    pub mode: SyncMode,
    /// Fetch calls made, including the terminating empty page.
    pub pages: usize,
    /// New records written.
    pub records: usize,
    /// Newest id already in the archive (update runs only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub newest_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oldest_id: Option<u64>,
}

impl SyncStats {
    #[must_use]
    pub fn new(mode: SyncMode) -> Self {
        Self {
            mode,
            pages: 0,
            records: 0,
            since_id: None,
            newest_id: None,
            oldest_id: None,
        }
    }

    /// Account for one written record. Records arrive newest first.
    pub fn record(&mut self, post: &Post) {
        self.records += 1;
        self.newest_id.get_or_insert(post.id());
        self.oldest_id = Some(post.id());
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records == 0
    }
}
