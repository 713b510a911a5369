//! Core types for the vtsweep library.
//!
//! This module provides the fundamental building blocks used throughout
//! the crate:
//!
//! - [`types`] - Resources, reply statuses, submission outcomes
//! - [`error`] - Structured error types
//! - [`classify`] - Raw-reply classification
//! - [`result`] - Report decoding and result normalization
//! - [`hasher`] - Streaming md5/sha1/sha256 digests

pub mod classify;
pub mod error;
pub mod hasher;
pub mod result;
pub mod types;

// Re-export commonly used types at the core level
pub use classify::{classify_report, classify_submission};
pub use error::{VtError, VtResult};
pub use hasher::DigestSet;
pub use result::{AnalysisReport, ResultRecord, ScanResult};
pub use types::{Resource, ResponseStatus, ScannerVerdict, SubmissionOutcome};
