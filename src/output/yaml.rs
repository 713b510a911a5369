//! YAML rendering.

use crate::core::error::{VtError, VtResult};
use crate::core::result::ScanResult;

/// Renders one result as a YAML sequence of its records.
pub fn render(result: &ScanResult) -> VtResult<String> {
    serde_yml::to_string(&result.records())
        .map_err(|e| VtError::malformed(&result.resource, format!("YAML encoding failed: {e}")))
}
