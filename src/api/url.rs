//! URL-resource endpoints.
//!
//! Covers `/url/scan` and `/url/report`. The v2 API has no URL rescan;
//! rescanning a URL is just scanning it again.

use crate::api::traits::ScanApi;
use crate::api::transport::Transport;
use crate::core::error::VtResult;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// `ScanApi` implementation for URL resources.
#[derive(Debug, Clone)]
pub struct UrlApi {
    transport: Arc<Transport>,
}

impl UrlApi {
    /// Creates a URL API over a shared transport.
    pub fn new(transport: Arc<Transport>) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl ScanApi for UrlApi {
    async fn submit(&self, resource: &str) -> VtResult<Value> {
        self.transport
            .post_form("submit", "/url/scan", &[("url", resource)])
            .await
    }

    async fn rescan(&self, resource: &str) -> VtResult<Value> {
        self.submit(resource).await
    }

    async fn query_report(&self, resource: &str) -> VtResult<Value> {
        self.transport
            .post_form("report", "/url/report", &[("resource", resource)])
            .await
    }
}
