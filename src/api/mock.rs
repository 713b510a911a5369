//! Scripted API double for testing.
//!
//! `MockApi` implements [`ScanApi`] against per-operation reply queues,
//! so poll, retry, and orchestration logic can be exercised without a
//! network and without real delays.

use crate::api::traits::ScanApi;
use crate::core::error::{VtError, VtResult};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// A scripted implementation of [`ScanApi`].
///
/// Replies are drained in push order, one per call; an exhausted queue
/// fails the call loudly so a test that issues more requests than it
/// scripted cannot pass by accident.
///
/// # Examples
///
/// ```rust
/// use vtsweep::api::MockApi;
/// use serde_json::json;
///
/// let api = MockApi::new()
///     .with_report(Ok(json!({ "response_code": 0 })))
///     .with_report(Ok(json!({ "response_code": 1, "scans": {} })));
/// ```
#[derive(Debug, Default)]
pub struct MockApi {
    submit_replies: Mutex<VecDeque<VtResult<Value>>>,
    rescan_replies: Mutex<VecDeque<VtResult<Value>>>,
    report_replies: Mutex<VecDeque<VtResult<Value>>>,
    submit_calls: AtomicU64,
    rescan_calls: AtomicU64,
    report_calls: AtomicU64,
}

impl MockApi {
    /// Creates a mock with empty reply queues.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a reply for the next unanswered `submit` call.
    pub fn with_submit(self, reply: VtResult<Value>) -> Self {
        self.submit_replies.lock().unwrap().push_back(reply);
        self
    }

    /// Queues a reply for the next unanswered `rescan` call.
    pub fn with_rescan(self, reply: VtResult<Value>) -> Self {
        self.rescan_replies.lock().unwrap().push_back(reply);
        self
    }

    /// Queues a reply for the next unanswered `query_report` call.
    pub fn with_report(self, reply: VtResult<Value>) -> Self {
        self.report_replies.lock().unwrap().push_back(reply);
        self
    }

    /// Number of `submit` calls received.
    pub fn submit_calls(&self) -> u64 {
        self.submit_calls.load(Ordering::Relaxed)
    }

    /// Number of `rescan` calls received.
    pub fn rescan_calls(&self) -> u64 {
        self.rescan_calls.load(Ordering::Relaxed)
    }

    /// Number of `query_report` calls received.
    pub fn report_calls(&self) -> u64 {
        self.report_calls.load(Ordering::Relaxed)
    }

    /// Total calls received across all operations.
    pub fn total_calls(&self) -> u64 {
        self.submit_calls() + self.rescan_calls() + self.report_calls()
    }

    fn pop(queue: &Mutex<VecDeque<VtResult<Value>>>, operation: &str) -> VtResult<Value> {
        queue.lock().unwrap().pop_front().unwrap_or_else(|| {
            Err(VtError::transport(
                operation,
                "mock has no scripted reply left",
            ))
        })
    }
}

#[async_trait]
impl ScanApi for MockApi {
    async fn submit(&self, _resource: &str) -> VtResult<Value> {
        self.submit_calls.fetch_add(1, Ordering::Relaxed);
        Self::pop(&self.submit_replies, "submit")
    }

    async fn rescan(&self, _resource: &str) -> VtResult<Value> {
        self.rescan_calls.fetch_add(1, Ordering::Relaxed);
        Self::pop(&self.rescan_replies, "rescan")
    }

    async fn query_report(&self, _resource: &str) -> VtResult<Value> {
        self.report_calls.fetch_add(1, Ordering::Relaxed);
        Self::pop(&self.report_replies, "report")
    }
}
