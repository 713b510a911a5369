//! Plain-text rendering.

use crate::core::result::{ScanResult, SCAN_DATE_FORMAT};

/// Renders one result as a header line followed by one line per
/// scanner verdict.
pub fn render(result: &ScanResult) -> String {
    let mut out = String::new();

    out.push_str(&result.resource);
    out.push_str(&format!(" ({} detections", result.ratio()));
    if let Some(date) = result.scan_date {
        out.push_str(&format!(", scanned {}", date.format(SCAN_DATE_FORMAT)));
    }
    out.push_str(")\n");

    if let (Some(md5), Some(sha1), Some(sha256)) = (&result.md5, &result.sha1, &result.sha256) {
        out.push_str(&format!("  md5:    {md5}\n"));
        out.push_str(&format!("  sha1:   {sha1}\n"));
        out.push_str(&format!("  sha256: {sha256}\n"));
    }

    for (scanner, verdict) in &result.scans {
        let version = verdict.version.as_deref().unwrap_or("-");
        let verdict_text = if verdict.detected {
            verdict.result.as_deref().unwrap_or("detected")
        } else {
            "clean"
        };
        out.push_str(&format!("  {scanner} [{version}]: {verdict_text}\n"));
    }

    if let Some(permalink) = &result.permalink {
        out.push_str(&format!("  permalink: {permalink}\n"));
    }

    out
}
