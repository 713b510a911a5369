//! Error types for the vtsweep library.
//!
//! Every failure mode carries enough context to decide how the run
//! proceeds: transport faults are retryable, a service rate limit aborts
//! the whole run, and per-resource conditions skip just that resource.
//! The library never panics; all errors are returned as `Result` values.

use thiserror::Error;

/// The main error type for submission and report operations.
#[derive(Debug, Error)]
pub enum VtError {
    /// An HTTP request failed at the transport level: connection refused,
    /// TLS failure, timeout, non-success status, or an undecodable body.
    #[error("transport failure during {operation}: {message}")]
    Transport {
        /// Which API call failed ("submit", "rescan", "report").
        operation: String,
        /// Human-readable cause.
        message: String,
    },

    /// The service reported its request quota exceeded (`response_code`
    /// -2). Never retried; terminates the entire run.
    #[error("rate limit exceeded while processing '{resource}'")]
    RateLimited {
        /// The resource being processed when the limit was hit.
        resource: String,
    },

    /// The service holds no sample for this resource (`response_code` -1).
    #[error("no sample on record for '{resource}'")]
    NotFound {
        /// The resource the service does not know.
        resource: String,
    },

    /// The service returned a valid but non-actionable reply
    /// (`response_code` 0) for a rescan request.
    #[error("service returned an unknown-resource reply for '{resource}'")]
    Unknown {
        /// The affected resource.
        resource: String,
    },

    /// A reply violated the service contract: missing `response_code`,
    /// an out-of-domain code, or a completed report without its
    /// required fields.
    #[error("malformed reply for '{resource}': {reason}")]
    MalformedReply {
        /// The resource whose reply could not be interpreted.
        resource: String,
        /// What was wrong with the reply.
        reason: String,
    },

    /// Configuration is missing or invalid.
    #[error("configuration error: {message}")]
    Configuration {
        /// Description of the configuration problem.
        message: String,
    },

    /// An I/O error occurred reading local input.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl VtError {
    /// Returns `true` if this error may be retried against the retry
    /// budget. Only transport-level faults qualify.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    /// Returns `true` if this error must abort the whole run rather
    /// than skip a single resource.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::RateLimited { .. } | Self::Configuration { .. })
    }

    /// Creates a `Transport` error.
    pub fn transport(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Transport {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Creates a `RateLimited` error.
    pub fn rate_limited(resource: impl Into<String>) -> Self {
        Self::RateLimited {
            resource: resource.into(),
        }
    }

    /// Creates a `NotFound` error.
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Creates an `Unknown` error.
    pub fn unknown(resource: impl Into<String>) -> Self {
        Self::Unknown {
            resource: resource.into(),
        }
    }

    /// Creates a `MalformedReply` error.
    pub fn malformed(resource: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedReply {
            resource: resource.into(),
            reason: reason.into(),
        }
    }

    /// Creates a `Configuration` error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

/// A specialized `Result` type for vtsweep operations.
pub type VtResult<T> = Result<T, VtError>;
