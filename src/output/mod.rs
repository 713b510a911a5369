//! Output encodings.
//!
//! Every encoder consumes the flattened ten-field records of a
//! [`ScanResult`](crate::core::ScanResult) and produces text. Pure
//! formatting: no decisions, no I/O.

pub mod json;
pub mod text;
pub mod xml;
pub mod yaml;

use crate::core::error::VtResult;
use crate::core::result::ScanResult;
use clap::ValueEnum;

/// The supported output encodings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum Format {
    /// Line-per-verdict plain text.
    #[default]
    Stdout,
    /// Pretty-printed JSON.
    Json,
    /// YAML.
    Yaml,
    /// XML with one element per verdict.
    Xml,
}

impl Format {
    /// Encodes one result in this format.
    pub fn encode(&self, result: &ScanResult) -> VtResult<String> {
        match self {
            Self::Stdout => Ok(text::render(result)),
            Self::Json => json::render(result),
            Self::Yaml => yaml::render(result),
            Self::Xml => Ok(xml::render(result)),
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Stdout => "stdout",
            Self::Json => "json",
            Self::Yaml => "yaml",
            Self::Xml => "xml",
        })
    }
}

#[cfg(test)]
pub(crate) mod test_fixtures {
    use crate::core::result::{AnalysisReport, ScanResult};
    use crate::core::types::{Resource, ResponseStatus, ScannerVerdict};
    use std::collections::BTreeMap;

    pub const MD5: &str = "d41d8cd98f00b204e9800998ecf8427e";

    /// A two-scanner completed result with every optional field set.
    pub fn sample_result() -> ScanResult {
        let mut scans = BTreeMap::new();
        scans.insert(
            "TestAV".to_string(),
            ScannerVerdict {
                detected: true,
                version: Some("1.2.3".to_string()),
                result: Some("Trojan.Generic <evil&\"quoted\">".to_string()),
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
        let report = AnalysisReport {
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
        };
        let origin = Resource::hash(MD5).unwrap();
        ScanResult::from_report(&origin, MD5, report).unwrap()
    }
}
