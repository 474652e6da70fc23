//! Response adapter for the Harmonia JSON-RPC tracker API.
//!
//! The transport layer hands over raw status and body; this module turns
//! them into release records:
//!
//!  1. Non-success status codes map to one [`IndexerError`] variant each.
//!  2. The body is decoded as a JSON-RPC envelope; an error object or a
//!     missing result is a payload failure.
//!  3. A zero result count is a valid empty outcome, not an error.
//!  4. Torrent entries map in key order, so output order is deterministic.

use std::collections::BTreeMap;

use chrono::DateTime;
use serde::Deserialize;

use crate::error::IndexerError;
use crate::model::ReleaseInfo;

const DETAIL_URL: &str = "https://harmonia.fm/torrents.php";

/// Raw indexer reply as handed over by the transport layer.
#[derive(Debug, Clone)]
pub struct IndexerResponse {
    pub status: u16,
    pub body: String,
}

// ── Wire types ──────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct JsonRpcEnvelope {
    #[serde(default)]
    error: Option<serde_json::Value>,
    #[serde(default)]
    result: Option<HarmoniaTorrents>,
}

#[derive(Debug, Deserialize)]
struct HarmoniaTorrents {
    #[serde(rename = "Results")]
    results: u32,
    #[serde(rename = "Torrents", default)]
    torrents: BTreeMap<String, HarmoniaTorrent>,
}

#[derive(Debug, Deserialize)]
struct HarmoniaTorrent {
    #[serde(rename = "TorrentID")]
    torrent_id: u64,
    #[serde(rename = "GroupID")]
    group_id: u64,
    #[serde(rename = "ReleaseName")]
    release_name: String,
    #[serde(rename = "Size")]
    size: u64,
    #[serde(rename = "DownloadURL")]
    download_url: String,
    #[serde(rename = "InfoHash")]
    info_hash: Option<String>,
    #[serde(rename = "Seeders")]
    seeders: u32,
    #[serde(rename = "Leechers")]
    leechers: u32,
    /// Upload time, seconds since the Unix epoch.
    #[serde(rename = "Time")]
    time: i64,
    #[serde(rename = "ArtistID")]
    artist_id: Option<u64>,
}

impl HarmoniaTorrent {
    fn into_release(self) -> ReleaseInfo {
        ReleaseInfo {
            guid: format!("Harmonia-{}", self.torrent_id),
            info_url: format!(
                "{DETAIL_URL}?id={}&torrentid={}",
                self.group_id, self.torrent_id
            ),
            publish_date: DateTime::from_timestamp(self.time, 0).unwrap_or_default(),
            title: self.release_name,
            size: self.size,
            download_url: self.download_url,
            info_hash: self.info_hash,
            seeders: self.seeders,
            leechers: self.leechers,
            artist_id: self.artist_id,
        }
    }
}

/// Classify a raw Harmonia reply and map its torrents to release records.
pub fn parse_response(response: &IndexerResponse) -> Result<Vec<ReleaseInfo>, IndexerError> {
    match response.status {
        200 => {}
        401 => {
            tracing::warn!(status = response.status, "indexer rejected the API key");
            return Err(IndexerError::Auth(
                "API Key invalid or not authorized".to_string(),
            ));
        }
        404 => {
            tracing::warn!(status = response.status, "indexer endpoint not found");
            return Err(IndexerError::ProtocolDrift(
                "Indexer API call returned NotFound, the Indexer API may have changed."
                    .to_string(),
            ));
        }
        503 => {
            tracing::warn!(status = response.status, "indexer request limit reached");
            return Err(IndexerError::RateLimited(
                "Cannot do more than 150 API requests per hour.".to_string(),
            ));
        }
        status => {
            tracing::warn!(status, "unexpected indexer status code");
            return Err(IndexerError::UnexpectedStatus(status));
        }
    }

    let envelope: JsonRpcEnvelope = serde_json::from_str(&response.body).map_err(|err| {
        tracing::warn!(%err, "indexer response body is not a JSON-RPC envelope");
        IndexerError::Payload(format!("Indexer API call returned an undecodable body: {err}"))
    })?;

    let result = match (envelope.error, envelope.result) {
        (None, Some(result)) => result,
        (error, _) => {
            let error = error.map_or_else(|| "null result".to_string(), |value| value.to_string());
            tracing::warn!(%error, "indexer API returned an error envelope");
            return Err(IndexerError::Payload(format!(
                "Indexer API call returned an error [{error}]"
            )));
        }
    };

    if result.results == 0 {
        return Ok(Vec::new());
    }

    Ok(result
        .torrents
        .into_values()
        .map(HarmoniaTorrent::into_release)
        .collect())
}
