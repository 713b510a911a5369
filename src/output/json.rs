//! JSON rendering.

use crate::core::error::{VtError, VtResult};
use crate::core::result::ScanResult;

/// Renders one result as a pretty-printed JSON array of its records.
pub fn render(result: &ScanResult) -> VtResult<String> {
    let mut encoded = serde_json::to_string_pretty(&result.records())
        .map_err(|e| VtError::malformed(&result.resource, format!("JSON encoding failed: {e}")))?;
    encoded.push('\n');
    Ok(encoded)
}
