//! Core types used throughout the vtsweep library.
//!
//! This module defines the resource variants submitted for analysis,
//! the service's response-code domain, and the decoded per-resource
//! submission outcome.

use crate::core::error::{VtError, VtResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// A resource submitted for analysis.
///
/// The three variants correspond to the three submission flows: looking
/// up (or rescanning) a known content hash, uploading a local file, and
/// scanning a URL. The variant tag drives endpoint selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resource {
    /// A content hash: md5, sha1, or sha256 in hexadecimal.
    Hash(String),

    /// A local file to upload for analysis.
    File(PathBuf),

    /// A URL to scan.
    Url(String),
}

impl Resource {
    /// Creates a hash resource, validating shape and length.
    ///
    /// Accepts 32 (md5), 40 (sha1), or 64 (sha256) hex characters.
    /// Comma-joined lists of such hashes are also accepted, since the
    /// rescan endpoint takes them in one request.
    pub fn hash(s: impl Into<String>) -> VtResult<Self> {
        let s = s.into();
        for part in s.split(',') {
            if !matches!(part.len(), 32 | 40 | 64)
                || !part.chars().all(|c| c.is_ascii_hexdigit())
            {
                return Err(VtError::configuration(format!(
                    "'{part}' is not an md5, sha1, or sha256 hash"
                )));
            }
        }
        Ok(Self::Hash(s))
    }

    /// Creates a file-upload resource.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File(path.into())
    }

    /// Creates a URL resource.
    pub fn url(s: impl Into<String>) -> Self {
        Self::Url(s.into())
    }

    /// The identifier sent to the service for this resource.
    pub fn identifier(&self) -> String {
        match self {
            Self::Hash(h) => h.clone(),
            Self::File(p) => p.display().to_string(),
            Self::Url(u) => u.clone(),
        }
    }

    /// Returns `true` for resources that carry content hashes in their
    /// completed reports. URL reports have no hash set.
    pub fn expects_hashes(&self) -> bool {
        !matches!(self, Self::Url(_))
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.identifier())
    }
}

/// The service's reply status, decoded from the `response_code` integer
/// present in every reply.
///
/// `1` means success: queued for submit/rescan replies, analysis complete
/// for report replies. `0`, `-1`, and `-2` are uniform across operations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResponseStatus {
    /// Code `1`: the request succeeded (queued, or report complete).
    Success,
    /// Code `0`: valid request, but no actionable result.
    #[default]
    Unknown,
    /// Code `-1`: the service holds no sample for this resource.
    NotFound,
    /// Code `-2`: request quota exceeded. Always fatal.
    RateLimited,
}

impl ResponseStatus {
    /// Maps a wire `response_code` onto the status domain.
    ///
    /// Codes outside {1, 0, -1, -2} are a contract violation.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Self::Success),
            0 => Some(Self::Unknown),
            -1 => Some(Self::NotFound),
            -2 => Some(Self::RateLimited),
            _ => None,
        }
    }
}

impl fmt::Display for ResponseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Unknown => write!(f, "unknown"),
            Self::NotFound => write!(f, "not-found"),
            Self::RateLimited => write!(f, "rate-limited"),
        }
    }
}

/// The decoded reply to a submit or rescan call for one resource.
///
/// The `resource` field is the identifier as resolved by the service,
/// which may differ from what was submitted (a rescanned hash comes back
/// normalized; an uploaded file comes back as its hash).
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionOutcome {
    /// The decoded reply status.
    pub status: ResponseStatus,

    /// The service-resolved resource identifier.
    pub resource: String,

    /// Permalink to the analysis page, when the service provides one.
    pub permalink: Option<String>,
}

/// A single scanner's verdict inside a completed report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScannerVerdict {
    /// Whether this scanner flagged the resource.
    pub detected: bool,

    /// Scanner engine version.
    #[serde(default)]
    pub version: Option<String>,

    /// The scanner's verdict string, absent when nothing was detected.
    #[serde(default)]
    pub result: Option<String>,
}
