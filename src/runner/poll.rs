//! The report poll loop.
//!
//! A queued submission is driven to completion by re-querying the
//! report endpoint at a fixed interval. There is no iteration bound:
//! the backend is trusted to eventually complete the analysis or emit
//! a rate-limit signal, and only transport faults consume the retry
//! budget. Delays are injected so tests can shrink them to zero.

use crate::api::traits::ScanApi;
use crate::core::classify::classify_report;
use crate::core::error::{VtError, VtResult};
use crate::core::result::AnalysisReport;
use crate::core::types::ResponseStatus;
use crate::runner::retry::{RetryConfig, RetryState};
use std::time::Duration;

/// Polls the report endpoint until the analysis completes.
///
/// Returns `Ok(None)` when the retry budget runs out on transport
/// faults; the resource is then skipped by the caller.
///
/// # Errors
///
/// [`VtError::RateLimited`] when the service signals quota exhaustion
/// mid-poll, [`VtError::MalformedReply`] for an undecodable reply, or
/// any non-retryable transport-layer error.
pub async fn await_completion(
    api: &dyn ScanApi,
    resource: &str,
    state: &mut RetryState,
    retry: &RetryConfig,
    poll_interval: Duration,
) -> VtResult<Option<AnalysisReport>> {
    loop {
        match api.query_report(resource).await {
            Ok(raw) => {
                let report = classify_report(&raw, resource)?;
                match report.status {
                    ResponseStatus::Success => return Ok(Some(report)),
                    ResponseStatus::RateLimited => {
                        return Err(VtError::rate_limited(resource));
                    }
                    status => {
                        tracing::debug!(
                            resource,
                            %status,
                            delay_secs = poll_interval.as_secs(),
                            "analysis not complete yet, waiting"
                        );
                        tokio::time::sleep(poll_interval).await;
                    }
                }
            }
            Err(e) if e.is_retryable() => {
                if !state.try_consume() {
                    tracing::warn!(resource, error = %e, "retry budget exhausted, skipping");
                    return Ok(None);
                }
                tracing::warn!(
                    resource,
                    error = %e,
                    remaining = state.remaining(),
                    "transport failure while polling, backing off"
                );
                tokio::time::sleep(retry.backoff).await;
            }
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockApi;
    use serde_json::json;

    const HASH: &str = "d41d8cd98f00b204e9800998ecf8427e";

    fn fast() -> (RetryConfig, Duration) {
        (
            RetryConfig::new().with_max_attempts(2).with_backoff(Duration::ZERO),
            Duration::ZERO,
        )
    }

    fn complete_reply() -> serde_json::Value {
        json!({
            "response_code": 1,
            "resource": HASH,
            "positives": 0,
            "total": 1,
            "scans": { "TestAV": { "detected": false, "version": "1.0", "result": null } }
        })
    }

    #[tokio::test]
    async fn test_polls_until_complete() {
        let api = MockApi::new()
            .with_report(Ok(json!({ "response_code": 0 })))
            .with_report(Ok(json!({ "response_code": 0 })))
            .with_report(Ok(complete_reply()));

        let (retry, interval) = fast();
        let mut state = RetryState::new(&retry);
        let report = await_completion(&api, HASH, &mut state, &retry, interval)
            .await
            .unwrap()
            .unwrap();

        assert!(report.is_complete());
        assert_eq!(api.report_calls(), 3);
        // The not-yet-analyzed waits never touch the retry budget
        assert_eq!(state.remaining(), 2);
    }

    #[tokio::test]
    async fn test_rate_limit_aborts_poll() {
        let api = MockApi::new().with_report(Ok(json!({ "response_code": -2 })));

        let (retry, interval) = fast();
        let mut state = RetryState::new(&retry);
        let err = await_completion(&api, HASH, &mut state, &retry, interval)
            .await
            .unwrap_err();

        assert!(matches!(err, VtError::RateLimited { .. }));
    }

    #[tokio::test]
    async fn test_transport_faults_exhaust_budget() {
        let api = MockApi::new()
            .with_report(Err(VtError::transport("report", "refused")))
            .with_report(Err(VtError::transport("report", "refused")))
            .with_report(Err(VtError::transport("report", "refused")));

        let (retry, interval) = fast();
        let mut state = RetryState::new(&retry);
        let outcome = await_completion(&api, HASH, &mut state, &retry, interval)
            .await
            .unwrap();

        assert!(outcome.is_none());
        assert_eq!(api.report_calls(), 3);
    }

    #[tokio::test]
    async fn test_transport_fault_then_recovery() {
        let api = MockApi::new()
            .with_report(Err(VtError::transport("report", "reset")))
            .with_report(Ok(complete_reply()));

        let (retry, interval) = fast();
        let mut state = RetryState::new(&retry);
        let report = await_completion(&api, HASH, &mut state, &retry, interval)
            .await
            .unwrap();

        assert!(report.is_some());
        assert_eq!(state.remaining(), 1);
    }

    #[tokio::test]
    async fn test_undocumented_code_is_error() {
        let api = MockApi::new().with_report(Ok(json!({ "response_code": 9 })));

        let (retry, interval) = fast();
        let mut state = RetryState::new(&retry);
        let err = await_completion(&api, HASH, &mut state, &retry, interval)
            .await
            .unwrap_err();

        assert!(matches!(err, VtError::MalformedReply { .. }));
    }
}
