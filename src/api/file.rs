//! File-resource endpoints.
//!
//! Covers the three `/file/*` operations: multipart upload, rescan of
//! known hashes, and report queries.

use crate::api::traits::ScanApi;
use crate::api::transport::Transport;
use crate::core::error::VtResult;
use async_trait::async_trait;
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;

/// `ScanApi` implementation for file resources.
#[derive(Debug, Clone)]
pub struct FileApi {
    transport: Arc<Transport>,
}

impl FileApi {
    /// Creates a file API over a shared transport.
    pub fn new(transport: Arc<Transport>) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl ScanApi for FileApi {
    /// Uploads the file at `resource` for analysis.
    async fn submit(&self, resource: &str) -> VtResult<Value> {
        self.transport
            .post_file("submit", "/file/scan", Path::new(resource))
            .await
    }

    /// Requests re-analysis of one hash or a comma-joined hash list.
    async fn rescan(&self, resource: &str) -> VtResult<Value> {
        self.transport
            .post_form("rescan", "/file/rescan", &[("resource", resource)])
            .await
    }

    async fn query_report(&self, resource: &str) -> VtResult<Value> {
        self.transport
            .post_form("report", "/file/report", &[("resource", resource)])
            .await
    }
}
