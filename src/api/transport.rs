//! HTTP transport against the scanning service.
//!
//! One outbound request per call, authenticated with the `apikey` form
//! field. Every transport-level fault (connection, TLS, timeout,
//! non-success status, undecodable body) maps to a single retryable
//! error; retrying is the caller's concern, never this module's.

use crate::config::Config;
use crate::core::error::{VtError, VtResult};
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use std::path::Path;
use std::time::Duration;

/// Base path of the service's v2 API.
pub const API_BASE: &str = "https://www.virustotal.com/vtapi/v2";

/// Per-request timeout. Distinct from the config `timeout` key, which
/// paces batch items.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Authenticated HTTP client for the service API.
#[derive(Debug)]
pub struct Transport {
    http: reqwest::Client,
    api_key: SecretString,
    base_url: String,
}

impl Transport {
    /// Builds a transport from the process configuration, honoring its
    /// proxy and TLS settings.
    ///
    /// # Errors
    ///
    /// Returns [`VtError::Configuration`] when the proxy URL or CA
    /// certificate is unusable.
    pub fn new(config: &Config) -> VtResult<Self> {
        let mut builder = reqwest::Client::builder().timeout(REQUEST_TIMEOUT);

        if let Some(proxy) = &config.proxy {
            let proxy = reqwest::Proxy::all(proxy)
                .map_err(|e| VtError::configuration(format!("bad proxy '{proxy}': {e}")))?;
            builder = builder.proxy(proxy);
        }

        if let Some(ca_path) = &config.ssl_ca_cert {
            let pem = std::fs::read(ca_path)?;
            let cert = reqwest::Certificate::from_pem(&pem).map_err(|e| {
                VtError::configuration(format!("bad CA certificate {}: {e}", ca_path.display()))
            })?;
            builder = builder.add_root_certificate(cert);
        }

        if !config.verify_ssl {
            builder = builder.danger_accept_invalid_certs(true);
        }

        let http = builder
            .build()
            .map_err(|e| VtError::configuration(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            api_key: config.api_key.clone(),
            base_url: API_BASE.to_string(),
        })
    }

    /// Overrides the API base URL. Used by tests to point at a local
    /// mock server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Form-POSTs `params` (plus the `apikey` field) to `path` and
    /// decodes the JSON reply.
    pub async fn post_form(
        &self,
        operation: &str,
        path: &str,
        params: &[(&str, &str)],
    ) -> VtResult<Value> {
        let mut form: Vec<(&str, &str)> = vec![("apikey", self.api_key.expose_secret())];
        form.extend_from_slice(params);

        let response = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .form(&form)
            .send()
            .await
            .map_err(|e| VtError::transport(operation, e.to_string()))?;

        self.decode(operation, response).await
    }

    /// Multipart-POSTs a local file (plus the `apikey` field) to `path`
    /// and decodes the JSON reply.
    ///
    /// The file is read before the request is issued; a read failure is
    /// an I/O error, not a transport fault, and is not retried.
    pub async fn post_file(&self, operation: &str, path: &str, file_path: &Path) -> VtResult<Value> {
        let contents = tokio::fs::read(file_path).await?;
        let file_name = file_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "sample".to_string());

        let form = reqwest::multipart::Form::new()
            .text("apikey", self.api_key.expose_secret().to_string())
            .part(
                "file",
                reqwest::multipart::Part::bytes(contents).file_name(file_name),
            );

        let response = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .multipart(form)
            .send()
            .await
            .map_err(|e| VtError::transport(operation, e.to_string()))?;

        self.decode(operation, response).await
    }

    async fn decode(&self, operation: &str, response: reqwest::Response) -> VtResult<Value> {
        let status = response.status();
        if !status.is_success() {
            return Err(VtError::transport(operation, format!("HTTP {status}")));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| VtError::transport(operation, format!("undecodable body: {e}")))
    }
}
