//! Report decoding and result normalization.
//!
//! `AnalysisReport` is the decoded reply to a report query, possibly
//! still pending. `ScanResult` is the normalized, encoder-ready entity
//! built from a completed report: one per resource, regardless of
//! whether the origin was a hash lookup, file upload, or URL scan.

use crate::core::error::{VtError, VtResult};
use crate::core::types::{Resource, ResponseStatus, ScannerVerdict};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Wire format of the `scan_date` field.
pub const SCAN_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// The decoded reply to a report-query call.
///
/// Only `status` is always meaningful; the remaining fields are present
/// when the analysis is complete. The classifier fills `status` from the
/// wire `response_code` after deserializing the payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalysisReport {
    /// Decoded reply status; `Success` means the analysis is complete.
    #[serde(skip)]
    pub status: ResponseStatus,

    /// Service-resolved resource identifier.
    #[serde(default)]
    pub resource: Option<String>,

    /// Per-scanner verdicts, keyed by scanner name.
    #[serde(default)]
    pub scans: Option<BTreeMap<String, ScannerVerdict>>,

    /// Number of scanners that flagged the resource.
    #[serde(default)]
    pub positives: Option<u32>,

    /// Number of scanners consulted.
    #[serde(default)]
    pub total: Option<u32>,

    /// Content hashes of the analyzed sample. URL reports carry none.
    #[serde(default)]
    pub md5: Option<String>,
    #[serde(default)]
    pub sha1: Option<String>,
    #[serde(default)]
    pub sha256: Option<String>,

    /// When the analysis last ran, as `%Y-%m-%d %H:%M:%S`.
    #[serde(default)]
    pub scan_date: Option<String>,

    /// Permalink to the analysis page.
    #[serde(default)]
    pub permalink: Option<String>,
}

impl AnalysisReport {
    /// Returns `true` once the analysis is complete and the payload
    /// fields are meaningful.
    pub fn is_complete(&self) -> bool {
        self.status == ResponseStatus::Success
    }
}

/// The normalized result for one analyzed resource.
///
/// Built once by [`ScanResult::from_report`] and immutable afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanResult {
    /// The resource identifier this result describes.
    pub resource: String,

    /// Detection ratio: scanners that flagged the resource.
    pub positives: u32,

    /// Detection ratio: scanners consulted.
    pub total: u32,

    /// Per-scanner verdicts, keyed by scanner name.
    pub scans: BTreeMap<String, ScannerVerdict>,

    /// md5 of the analyzed sample; absent for URL resources.
    pub md5: Option<String>,
    /// sha1 of the analyzed sample; absent for URL resources.
    pub sha1: Option<String>,
    /// sha256 of the analyzed sample; absent for URL resources.
    pub sha256: Option<String>,

    /// When the analysis last ran.
    pub scan_date: Option<DateTime<Utc>>,

    /// Permalink to the analysis page.
    pub permalink: Option<String>,
}

impl ScanResult {
    /// Builds the normalized result from a completed report.
    ///
    /// `origin` is the resource as submitted (its variant decides whether
    /// a hash set is required); `resource_id` is the service-resolved
    /// identifier the report was queried under.
    ///
    /// # Errors
    ///
    /// Returns [`VtError::MalformedReply`] when the report is not
    /// complete, when its scanner map is absent, when a hash/file-origin
    /// report is missing its hash set, or when `scan_date` does not parse.
    pub fn from_report(
        origin: &Resource,
        resource_id: &str,
        report: AnalysisReport,
    ) -> VtResult<Self> {
        if !report.is_complete() {
            return Err(VtError::malformed(
                resource_id,
                format!("aggregating a report with status '{}'", report.status),
            ));
        }

        let scans = report
            .scans
            .ok_or_else(|| VtError::malformed(resource_id, "completed report has no scanner map"))?;

        if origin.expects_hashes()
            && (report.md5.is_none() || report.sha1.is_none() || report.sha256.is_none())
        {
            return Err(VtError::malformed(
                resource_id,
                "completed report has no hash set",
            ));
        }

        let scan_date = match report.scan_date {
            Some(raw) => Some(parse_scan_date(resource_id, &raw)?),
            None => None,
        };

        Ok(Self {
            resource: resource_id.to_string(),
            positives: report.positives.unwrap_or(0),
            total: report.total.unwrap_or(0),
            scans,
            md5: report.md5,
            sha1: report.sha1,
            sha256: report.sha256,
            scan_date,
            permalink: report.permalink,
        })
    }

    /// The detection ratio as `positives/total`.
    pub fn ratio(&self) -> String {
        format!("{}/{}", self.positives, self.total)
    }

    /// Flattens this result into one output row per scanner, in scanner
    /// name order.
    pub fn records(&self) -> Vec<ResultRecord> {
        let update = self
            .scan_date
            .map(|d| d.format(SCAN_DATE_FORMAT).to_string());

        self.scans
            .iter()
            .map(|(scanner, verdict)| ResultRecord {
                hash: self.resource.clone(),
                scanner: scanner.clone(),
                version: verdict.version.clone(),
                detected: verdict.detected,
                result: verdict.result.clone(),
                md5: self.md5.clone(),
                sha1: self.sha1.clone(),
                sha256: self.sha256.clone(),
                update: update.clone(),
                permalink: self.permalink.clone(),
            })
            .collect()
    }
}

/// One flattened output row: a single scanner's verdict together with
/// the identifying fields of its resource.
///
/// This is the exact field set every encoder emits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    /// The resource identifier (a hash for file flows, the URL for
    /// URL flows).
    pub hash: String,
    /// Scanner name.
    pub scanner: String,
    /// Scanner engine version.
    pub version: Option<String>,
    /// Whether this scanner flagged the resource.
    pub detected: bool,
    /// The scanner's verdict string.
    pub result: Option<String>,
    /// md5 of the sample, when the report carried it.
    pub md5: Option<String>,
    /// sha1 of the sample, when the report carried it.
    pub sha1: Option<String>,
    /// sha256 of the sample, when the report carried it.
    pub sha256: Option<String>,
    /// Analysis timestamp, `%Y-%m-%d %H:%M:%S`.
    pub update: Option<String>,
    /// Permalink to the analysis page.
    pub permalink: Option<String>,
}

fn parse_scan_date(resource: &str, raw: &str) -> VtResult<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(raw, SCAN_DATE_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|e| VtError::malformed(resource, format!("bad scan_date '{raw}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    const MD5: &str = "d41d8cd98f00b204e9800998ecf8427e";

    fn completed_report() -> AnalysisReport {
        let mut scans = BTreeMap::new();
        scans.insert(
            "TestAV".to_string(),
            ScannerVerdict {
                detected: true,
                version: Some("1.2.3".to_string()),
                result: Some("Trojan.Generic".to_string()),
            },
        );
        scans.insert(
            "OtherAV".to_string(),
            ScannerVerdict {
                detected: false,
                version: Some("9.0".to_string()),
                result: None,
            },
        );
        AnalysisReport {
            status: ResponseStatus::Success,
            resource: Some(MD5.to_string()),
            scans: Some(scans),
            positives: Some(1),
            total: Some(2),
            md5: Some(MD5.to_string()),
            sha1: Some("da39a3ee5e6b4b0d3255bfef95601890afd80709".to_string()),
            sha256: Some(
                "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855".to_string(),
            ),
            scan_date: Some("2016-04-08 17:49:11".to_string()),
            permalink: Some("https://www.virustotal.com/file/e3b0/analysis/".to_string()),
        }
    }

    #[test]
    fn test_from_report_complete() {
        let origin = Resource::hash(MD5).unwrap();
        let result = ScanResult::from_report(&origin, MD5, completed_report()).unwrap();

        assert_eq!(result.resource, MD5);
        assert_eq!(result.ratio(), "1/2");
        assert_eq!(result.scans.len(), 2);
        assert!(result.scan_date.is_some());
    }

    #[test]
    fn test_from_report_rejects_pending() {
        let origin = Resource::hash(MD5).unwrap();
        let report = AnalysisReport {
            status: ResponseStatus::Unknown,
            ..Default::default()
        };
        let err = ScanResult::from_report(&origin, MD5, report).unwrap_err();
        assert!(matches!(err, VtError::MalformedReply { .. }));
    }

    #[test]
    fn test_from_report_requires_scanner_map() {
        let origin = Resource::hash(MD5).unwrap();
        let report = AnalysisReport {
            scans: None,
            ..completed_report()
        };
        let err = ScanResult::from_report(&origin, MD5, report).unwrap_err();
        assert!(matches!(err, VtError::MalformedReply { .. }));
    }

    #[test]
    fn test_from_report_requires_hashes_for_hash_origin() {
        let origin = Resource::hash(MD5).unwrap();
        let report = AnalysisReport {
            sha256: None,
            ..completed_report()
        };
        assert!(ScanResult::from_report(&origin, MD5, report).is_err());
    }

    #[test]
    fn test_from_report_url_origin_needs_no_hashes() {
        let origin = Resource::url("http://example.com/");
        let report = AnalysisReport {
            md5: None,
            sha1: None,
            sha256: None,
            ..completed_report()
        };
        let result = ScanResult::from_report(&origin, "http://example.com/", report).unwrap();
        assert_eq!(result.md5, None);
        assert_eq!(result.resource, "http://example.com/");
    }

    #[test]
    fn test_from_report_rejects_bad_scan_date() {
        let origin = Resource::hash(MD5).unwrap();
        let report = AnalysisReport {
            scan_date: Some("April 8th".to_string()),
            ..completed_report()
        };
        assert!(ScanResult::from_report(&origin, MD5, report).is_err());
    }

    #[test]
    fn test_records_flatten_in_scanner_order() {
        let origin = Resource::hash(MD5).unwrap();
        let result = ScanResult::from_report(&origin, MD5, completed_report()).unwrap();
        let records = result.records();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].scanner, "OtherAV");
        assert_eq!(records[1].scanner, "TestAV");
        assert!(records[1].detected);
        assert_eq!(records[1].result.as_deref(), Some("Trojan.Generic"));
        assert_eq!(records[0].hash, MD5);
        assert_eq!(records[0].update.as_deref(), Some("2016-04-08 17:49:11"));
    }
}
