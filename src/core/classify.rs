//! Reply classification.
//!
//! Pure mapping from raw JSON replies to typed outcomes. The service is
//! inconsistent about reply shape: a rescan of multiple resources
//! returns an array, everything else a single object. So submission
//! replies are always normalized to an ordered sequence here. No retry
//! or sleep logic lives in this module.

use crate::core::error::{VtError, VtResult};
use crate::core::result::AnalysisReport;
use crate::core::types::{ResponseStatus, SubmissionOutcome};
use serde_json::Value;

/// Decodes a submit/rescan reply into an ordered sequence of
/// per-resource outcomes.
///
/// A single-object reply yields a sequence of length one. `fallback` is
/// the identifier as submitted, used when a reply omits `resource`
/// (rate-limit replies routinely do).
///
/// # Errors
///
/// Returns [`VtError::MalformedReply`] when a reply element is not an
/// object, lacks an integer `response_code`, or carries a code outside
/// the documented domain.
pub fn classify_submission(raw: &Value, fallback: &str) -> VtResult<Vec<SubmissionOutcome>> {
    let elements: Vec<&Value> = match raw {
        Value::Array(items) => items.iter().collect(),
        other => vec![other],
    };

    elements
        .into_iter()
        .map(|element| {
            let status = decode_status(element, fallback)?;
            let resource = element
                .get("resource")
                .and_then(Value::as_str)
                .unwrap_or(fallback)
                .to_string();
            let permalink = element
                .get("permalink")
                .and_then(Value::as_str)
                .map(str::to_string);

            Ok(SubmissionOutcome {
                status,
                resource,
                permalink,
            })
        })
        .collect()
}

/// Decodes a report-query reply.
///
/// The payload fields are deserialized regardless of status; they are
/// only meaningful once `status` is [`ResponseStatus::Success`].
///
/// # Errors
///
/// Returns [`VtError::MalformedReply`] for a missing or out-of-domain
/// `response_code`, or a payload that does not deserialize.
pub fn classify_report(raw: &Value, fallback: &str) -> VtResult<AnalysisReport> {
    let status = decode_status(raw, fallback)?;
    let mut report: AnalysisReport = serde_json::from_value(raw.clone())
        .map_err(|e| VtError::malformed(fallback, format!("undecodable report payload: {e}")))?;
    report.status = status;
    Ok(report)
}

fn decode_status(element: &Value, fallback: &str) -> VtResult<ResponseStatus> {
    let code = element
        .get("response_code")
        .and_then(Value::as_i64)
        .ok_or_else(|| VtError::malformed(fallback, "reply has no integer response_code"))?;

    ResponseStatus::from_code(code)
        .ok_or_else(|| VtError::malformed(fallback, format!("response_code {code} is undocumented")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const HASH_A: &str = "d41d8cd98f00b204e9800998ecf8427e";
    const HASH_B: &str = "c4ca4238a0b923820dcc509a6f75849b";

    #[test]
    fn test_single_object_yields_sequence_of_one() {
        let raw = json!({
            "response_code": 1,
            "resource": HASH_A,
            "permalink": "https://www.virustotal.com/file/x/analysis/"
        });
        let outcomes = classify_submission(&raw, HASH_A).unwrap();
        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].status, ResponseStatus::Success);
        assert_eq!(outcomes[0].resource, HASH_A);
        assert!(outcomes[0].permalink.is_some());
    }

    #[test]
    fn test_array_reply_preserves_order() {
        let raw = json!([
            { "response_code": 1, "resource": HASH_A },
            { "response_code": -1, "resource": HASH_B },
        ]);
        let outcomes = classify_submission(&raw, "unused").unwrap();
        assert_eq!(outcomes.len(), 2);
        assert_eq!(outcomes[0].resource, HASH_A);
        assert_eq!(outcomes[1].status, ResponseStatus::NotFound);
    }

    #[test]
    fn test_code_domain_is_total() {
        for (code, status) in [
            (1, ResponseStatus::Success),
            (0, ResponseStatus::Unknown),
            (-1, ResponseStatus::NotFound),
            (-2, ResponseStatus::RateLimited),
        ] {
            let raw = json!({ "response_code": code, "resource": HASH_A });
            let outcomes = classify_submission(&raw, HASH_A).unwrap();
            assert_eq!(outcomes[0].status, status);
        }
    }

    #[test]
    fn test_undocumented_code_is_malformed() {
        let raw = json!({ "response_code": 7, "resource": HASH_A });
        assert!(classify_submission(&raw, HASH_A).is_err());
    }

    #[test]
    fn test_missing_code_is_malformed() {
        let raw = json!({ "resource": HASH_A });
        let err = classify_submission(&raw, HASH_A).unwrap_err();
        assert!(matches!(err, VtError::MalformedReply { .. }));
    }

    #[test]
    fn test_missing_resource_falls_back_to_submitted() {
        let raw = json!({ "response_code": -2 });
        let outcomes = classify_submission(&raw, HASH_A).unwrap();
        assert_eq!(outcomes[0].resource, HASH_A);
        assert_eq!(outcomes[0].status, ResponseStatus::RateLimited);
    }

    #[test]
    fn test_classify_pending_report() {
        let raw = json!({
            "response_code": -2,
            "resource": HASH_A,
        });
        let report = classify_report(&raw, HASH_A).unwrap();
        assert_eq!(report.status, ResponseStatus::RateLimited);
        assert!(!report.is_complete());
    }

    #[test]
    fn test_classify_complete_report() {
        let raw = json!({
            "response_code": 1,
            "resource": HASH_A,
            "positives": 2,
            "total": 55,
            "md5": HASH_A,
            "sha1": "da39a3ee5e6b4b0d3255bfef95601890afd80709",
            "sha256": "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855",
            "scan_date": "2016-04-08 17:49:11",
            "permalink": "https://www.virustotal.com/file/x/analysis/",
            "scans": {
                "TestAV": { "detected": true, "version": "1.0", "result": "Eicar-Test" }
            }
        });
        let report = classify_report(&raw, HASH_A).unwrap();
        assert!(report.is_complete());
        assert_eq!(report.positives, Some(2));
        let scans = report.scans.unwrap();
        assert!(scans["TestAV"].detected);
        assert_eq!(scans["TestAV"].result.as_deref(), Some("Eicar-Test"));
    }
}
