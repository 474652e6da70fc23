use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Provider-agnostic release record produced by indexer adapters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseInfo {
    /// Stable identifier, `"<provider>-<torrent id>"`.
    pub guid: String,
    /// Release title exactly as the tracker lists it.
    pub title: String,
    pub size: u64,
    pub download_url: String,
    pub info_url: String,
    /// Upload time as reported by the tracker, UTC.
    pub publish_date: DateTime<Utc>,
    pub seeders: u32,
    pub leechers: u32,
    pub info_hash: Option<String>,
    /// Tracker-side artist id, when the payload carries one.
    pub artist_id: Option<u64>,
}
