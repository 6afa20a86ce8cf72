use std::collections::BTreeMap;
use std::ops::Range;

use serde::Serialize;

use crate::client::GatewayError;
use crate::domain::value::ErrorCode;

/// Parsed reply to one send request (one recipient chunk).
///
/// `message_ids` holds every non-reserved `key=value` line of the reply: the gateway keys
/// them by recipient and the value is the message id it assigned.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SendOutcome {
    pub error_code: ErrorCode,
    pub remaining_quota: i64,
    pub message_ids: BTreeMap<String, String>,
}

/// What happened to one recipient chunk of a send.
#[derive(Debug)]
pub struct ChunkReport {
    /// Positions of this chunk's recipients in the original request.
    pub recipients: Range<usize>,
    pub result: Result<SendOutcome, GatewayError>,
}

/// Result of [`crate::MessageNetClient::send`]: one report per recipient chunk, in order.
///
/// A failed chunk never stops later chunks, so any subset of the reports may be errors.
#[derive(Debug, Default)]
pub struct SendResult {
    pub chunks: Vec<ChunkReport>,
}

impl SendResult {
    /// Parsed outcome per chunk; `None` where that chunk failed in transport.
    pub fn outcomes(&self) -> impl Iterator<Item = Option<&SendOutcome>> {
        self.chunks.iter().map(|chunk| chunk.result.as_ref().ok())
    }

    /// Transport error per chunk; `None` where that chunk was delivered and parsed.
    pub fn errors(&self) -> impl Iterator<Item = Option<&GatewayError>> {
        self.chunks.iter().map(|chunk| chunk.result.as_ref().err())
    }

    /// `true` when every chunk reached the gateway. Says nothing about `ErrorCode`.
    pub fn is_complete(&self) -> bool {
        self.chunks.iter().all(|chunk| chunk.result.is_ok())
    }

    /// Total recipients covered by the request, delivered or not.
    pub fn total_recipients(&self) -> usize {
        self.chunks.last().map_or(0, |chunk| chunk.recipients.end)
    }

    /// Message ids of all successfully transported chunks merged into one map.
    pub fn message_ids(&self) -> BTreeMap<&str, &str> {
        self.outcomes()
            .flatten()
            .flat_map(|outcome| outcome.message_ids.iter())
            .map(|(key, id)| (key.as_str(), id.as_str()))
            .collect()
    }
}

/// One row of the sent-message log.
///
/// `row_id` is the row index the gateway attached to the line (`item7` → `"7"`), kept apart
/// from `fields` so that a caption column named `id` does not shadow it. `fields` holds one
/// value per caption column; `msg` and `prms` are already decoded from Big5.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct LogEntry {
    pub row_id: String,
    pub fields: BTreeMap<String, String>,
}

impl LogEntry {
    /// Value of the named caption column.
    ///
    /// Only caption columns live here: the synthetic row index (the `N` of `item<N>`) is
    /// [`LogEntry::row_id`], so `get("id")` is the gateway's own `id` column, if requested.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }
}

/// Parsed reply to a log query. `entries` is keyed by the full row key (`item<N>`).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct QueryLogResult {
    pub error_code: ErrorCode,
    pub remaining_quota: i64,
    pub entries: BTreeMap<String, LogEntry>,
}

/// Parsed reply to a reservation delete: per message id, the gateway's status code.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ReserveDeleteResult {
    pub error_code: ErrorCode,
    pub remaining_quota: i64,
    pub statuses: BTreeMap<String, i32>,
}
