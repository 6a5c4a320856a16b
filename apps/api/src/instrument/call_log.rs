//! In-memory log of recent dispatches, for the DevTools panel.
//!
//! CRITICAL: the log is bounded by recency alone. When the 51st record
//! arrives, the oldest one is dropped even if it is still `Pending`; a late
//! update for an evicted id is a silent no-op and never resurrects the
//! record. Callers must treat presence in this log as best-effort.

use std::collections::VecDeque;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Most recent calls kept. Matches what the DevTools panel renders.
pub const CALL_LOG_CAPACITY: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallStatus {
    Pending,
    Success,
    Error,
}

/// One dispatched call as DevTools sees it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiCallRecord {
    pub id: u64,
    pub timestamp: DateTime<Utc>,
    pub endpoint: String,
    pub request: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
    pub status: CallStatus,
}

/// Partial update merged into a pending record once its call settles.
/// `None` fields leave the stored value untouched.
#[derive(Debug, Default)]
pub struct CallUpdate {
    pub response: Option<Value>,
    pub error: Option<Value>,
    pub duration_ms: Option<u64>,
    pub status: Option<CallStatus>,
}

#[derive(Debug, Default)]
struct LogInner {
    next_id: u64,
    records: VecDeque<ApiCallRecord>,
}

/// Bounded, newest-first call log. Cheap to share behind an `Arc`; every
/// method takes `&self` and holds the lock only to touch the deque.
#[derive(Debug, Default)]
pub struct ApiCallLog {
    inner: Mutex<LogInner>,
}

impl ApiCallLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new pending call and returns its id.
    pub fn append(&self, endpoint: &str, request: Value) -> u64 {
        let mut inner = self.inner.lock().unwrap();
        inner.next_id += 1;
        let id = inner.next_id;
        inner.records.push_front(ApiCallRecord {
            id,
            timestamp: Utc::now(),
            endpoint: endpoint.to_string(),
            request,
            response: None,
            error: None,
            duration_ms: None,
            status: CallStatus::Pending,
        });
        inner.records.truncate(CALL_LOG_CAPACITY);
        id
    }

    /// Merges `update` into the record with `id`, if it is still held.
    pub fn update(&self, id: u64, update: CallUpdate) {
        let mut inner = self.inner.lock().unwrap();
        if let Some(record) = inner.records.iter_mut().find(|r| r.id == id) {
            if let Some(response) = update.response {
                record.response = Some(response);
            }
            if let Some(error) = update.error {
                record.error = Some(error);
            }
            if let Some(duration_ms) = update.duration_ms {
                record.duration_ms = Some(duration_ms);
            }
            if let Some(status) = update.status {
                record.status = status;
            }
        }
    }

    /// Current records, newest first.
    pub fn snapshot(&self) -> Vec<ApiCallRecord> {
        self.inner.lock().unwrap().records.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.inner.lock().unwrap().records.clear();
    }
}
