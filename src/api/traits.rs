//! The capability interface over the service's endpoints.
//!
//! Each resource variant gets its own implementation of [`ScanApi`].
//! All three operations return the raw JSON reply; decoding is the
//! classifier's job, which keeps this seam mockable at the wire level.

use crate::core::error::VtResult;
use async_trait::async_trait;
use serde_json::Value;
use std::fmt::Debug;

/// The three calls a resource flow is built from.
///
/// Implementations issue exactly one HTTP request per call and never
/// retry; the retry policy wraps them from the outside.
#[async_trait]
pub trait ScanApi: Send + Sync + Debug {
    /// Submits a new resource for analysis (file upload or URL scan).
    async fn submit(&self, resource: &str) -> VtResult<Value>;

    /// Requests re-analysis of an already-known resource. Accepts a
    /// comma-joined list, in which case the reply is a JSON array.
    async fn rescan(&self, resource: &str) -> VtResult<Value>;

    /// Queries the analysis report for a resource.
    async fn query_report(&self, resource: &str) -> VtResult<Value>;
}

/// An arc-wrapped API for shared ownership.
pub type ArcScanApi = std::sync::Arc<dyn ScanApi>;
