//! The run driver.
//!
//! Processes a resolved batch category by category (hashes, then
//! URLs, then uploads), one resource at a time, pacing consecutive
//! items of the same category. Each completed result is encoded and
//! written immediately; nothing is buffered across resources.
//!
//! Per-resource failures skip that resource and the run continues; a
//! rate-limit signal aborts the whole run at once.

use crate::api::file::FileApi;
use crate::api::traits::{ArcScanApi, ScanApi};
use crate::api::transport::Transport;
use crate::api::url::UrlApi;
use crate::config::Config;
use crate::core::classify::{classify_report, classify_submission};
use crate::core::error::{VtError, VtResult};
use crate::core::result::ScanResult;
use crate::core::types::{Resource, ResponseStatus};
use crate::output::Format;
use crate::runner::batch::Batch;
use crate::runner::pacer::Pacer;
use crate::runner::poll;
use crate::runner::retry::{RetryConfig, RetryState};
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

/// Configuration for a run.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Retry policy for transport faults.
    pub retry: RetryConfig,

    /// Delay between report queries while an analysis is pending.
    pub poll_interval: Duration,

    /// Delay between consecutive items of the same batch category.
    pub pause: Duration,

    /// Output encoding for completed results.
    pub format: Format,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            retry: RetryConfig::default(),
            poll_interval: Duration::from_secs(60),
            pause: Duration::from_secs(25),
            format: Format::Stdout,
        }
    }
}

impl RunnerConfig {
    /// Creates a new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the retry policy.
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Sets the poll interval.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Sets the inter-item pause.
    pub fn with_pause(mut self, pause: Duration) -> Self {
        self.pause = pause;
        self
    }

    /// Sets the output format.
    pub fn with_format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }
}

/// Counters for one finished run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunStats {
    /// Resources that produced at least one result.
    pub completed: usize,

    /// Resources that produced nothing: unknown, not found, retries
    /// exhausted, or a per-resource error.
    pub skipped: usize,

    /// Inter-item pauses taken.
    pub pauses: u64,
}

/// Drives a batch of resources through submission, polling, and
/// normalization.
#[derive(Debug)]
pub struct Runner {
    file_api: ArcScanApi,
    url_api: ArcScanApi,
    config: RunnerConfig,
}

impl Runner {
    /// Creates a runner over explicit API implementations. Tests pass
    /// scripted mocks here.
    pub fn new(file_api: ArcScanApi, url_api: ArcScanApi, config: RunnerConfig) -> Self {
        Self {
            file_api,
            url_api,
            config,
        }
    }

    /// Creates a runner with a real transport built from the process
    /// configuration.
    pub fn from_config(config: &Config, runner_config: RunnerConfig) -> VtResult<Self> {
        let transport = Arc::new(Transport::new(config)?);
        Ok(Self::new(
            Arc::new(FileApi::new(Arc::clone(&transport))),
            Arc::new(UrlApi::new(transport)),
            runner_config,
        ))
    }

    /// Processes the whole batch, writing each completed result to
    /// `out` as soon as it exists.
    ///
    /// # Errors
    ///
    /// Returns [`VtError::RateLimited`] the moment the service signals
    /// quota exhaustion (nothing after that is processed), or an I/O
    /// error when `out` cannot be written.
    pub async fn run<W: Write>(&self, batch: Batch, out: &mut W) -> VtResult<RunStats> {
        let resolved = batch.resolve()?;
        let mut stats = RunStats::default();

        let mut pacer = Pacer::new(self.config.pause);
        let count = resolved.hashes.len();
        for (index, hash) in resolved.hashes.iter().enumerate() {
            match Resource::hash(hash.clone()) {
                Ok(resource) => {
                    let outcome = if resolved.rescan {
                        self.scan_and_wait(self.file_api.as_ref(), &resource, true)
                            .await
                    } else {
                        self.lookup_hash(&resource).await
                    };
                    self.settle(&resource, outcome, out, &mut stats)?;
                }
                Err(e) => {
                    tracing::warn!(error = %e, "skipping invalid hash");
                    stats.skipped += 1;
                }
            }
            if index != count - 1 {
                pacer.pause().await;
            }
        }
        stats.pauses += pacer.paused();

        let mut pacer = Pacer::new(self.config.pause);
        let count = resolved.urls.len();
        for (index, url) in resolved.urls.iter().enumerate() {
            let resource = Resource::url(url.clone());
            let outcome = self
                .scan_and_wait(self.url_api.as_ref(), &resource, false)
                .await;
            self.settle(&resource, outcome, out, &mut stats)?;
            if index != count - 1 {
                pacer.pause().await;
            }
        }
        stats.pauses += pacer.paused();

        let mut pacer = Pacer::new(self.config.pause);
        let count = resolved.uploads.len();
        for (index, path) in resolved.uploads.iter().enumerate() {
            let resource = Resource::file(path.clone());
            let outcome = self
                .scan_and_wait(self.file_api.as_ref(), &resource, false)
                .await;
            self.settle(&resource, outcome, out, &mut stats)?;
            if index != count - 1 {
                pacer.pause().await;
            }
        }
        stats.pauses += pacer.paused();

        tracing::info!(
            completed = stats.completed,
            skipped = stats.skipped,
            "run finished"
        );
        Ok(stats)
    }

    /// Applies one resource's outcome to the stats and result stream.
    fn settle<W: Write>(
        &self,
        resource: &Resource,
        outcome: VtResult<Vec<ScanResult>>,
        out: &mut W,
        stats: &mut RunStats,
    ) -> VtResult<()> {
        match outcome {
            Ok(results) if results.is_empty() => {
                stats.skipped += 1;
            }
            Ok(results) => {
                for result in &results {
                    let encoded = self.config.format.encode(result)?;
                    out.write_all(encoded.as_bytes())?;
                }
                out.flush()?;
                stats.completed += 1;
            }
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => {
                tracing::warn!(resource = %resource, error = %e, "resource failed, skipping");
                stats.skipped += 1;
            }
        }
        Ok(())
    }

    /// Looks up an existing report for a hash. No submission, no
    /// polling: an unknown hash is skipped immediately.
    async fn lookup_hash(&self, resource: &Resource) -> VtResult<Vec<ScanResult>> {
        let id = resource.identifier();
        let mut state = RetryState::new(&self.config.retry);

        loop {
            match self.file_api.query_report(&id).await {
                Ok(raw) => {
                    let report = classify_report(&raw, &id)?;
                    return match report.status {
                        ResponseStatus::Success => {
                            Ok(vec![ScanResult::from_report(resource, &id, report)?])
                        }
                        ResponseStatus::RateLimited => Err(VtError::rate_limited(&id)),
                        status => {
                            tracing::warn!(resource = %id, %status, "no report available, skipping");
                            Ok(Vec::new())
                        }
                    };
                }
                Err(e) if e.is_retryable() => {
                    if !state.try_consume() {
                        tracing::warn!(resource = %id, error = %e, "retry budget exhausted, skipping");
                        return Ok(Vec::new());
                    }
                    tracing::warn!(
                        resource = %id,
                        error = %e,
                        remaining = state.remaining(),
                        "transport failure during lookup, backing off"
                    );
                    tokio::time::sleep(self.config.retry.backoff).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Submits (or rescans) a resource, then polls every queued outcome
    /// to completion. One retry budget covers the whole lifecycle.
    async fn scan_and_wait(
        &self,
        api: &dyn ScanApi,
        resource: &Resource,
        rescan: bool,
    ) -> VtResult<Vec<ScanResult>> {
        let id = resource.identifier();
        let mut state = RetryState::new(&self.config.retry);

        let raw = loop {
            let attempt = if rescan {
                api.rescan(&id).await
            } else {
                api.submit(&id).await
            };
            match attempt {
                Ok(raw) => break raw,
                Err(e) if e.is_retryable() => {
                    if !state.try_consume() {
                        tracing::warn!(resource = %id, error = %e, "retry budget exhausted, skipping");
                        return Ok(Vec::new());
                    }
                    tracing::warn!(
                        resource = %id,
                        error = %e,
                        remaining = state.remaining(),
                        "transport failure during submission, backing off"
                    );
                    tokio::time::sleep(self.config.retry.backoff).await;
                }
                Err(e) => return Err(e),
            }
        };

        let outcomes = classify_submission(&raw, &id)?;
        let mut results = Vec::new();

        for outcome in outcomes {
            match outcome.status {
                ResponseStatus::Success => {
                    let report = poll::await_completion(
                        api,
                        &outcome.resource,
                        &mut state,
                        &self.config.retry,
                        self.config.poll_interval,
                    )
                    .await?;
                    if let Some(report) = report {
                        results.push(ScanResult::from_report(resource, &outcome.resource, report)?);
                    }
                }
                ResponseStatus::Unknown => {
                    tracing::warn!(resource = %outcome.resource, "unknown service reply, skipping");
                }
                ResponseStatus::NotFound => {
                    tracing::warn!(resource = %outcome.resource, "no sample on record, skipping");
                }
                ResponseStatus::RateLimited => {
                    return Err(VtError::rate_limited(&outcome.resource));
                }
            }
        }

        Ok(results)
    }
}
