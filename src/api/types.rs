//! API query and error types.

use serde::{Deserialize, Serialize};

/// Optional hour range for the dispatch endpoint.
#[derive(Debug, Deserialize)]
pub struct DispatchQuery {
    /// First hour (inclusive).
    pub from: Option<usize>,
    /// Last hour (inclusive).
    pub to: Option<usize>,
}

impl DispatchQuery {
    /// Resolves the range, or returns a message when `from > to`.
    pub fn bounds(&self) -> Result<(usize, usize), String> {
        let from = self.from.unwrap_or(0);
        let to = self.to.unwrap_or(usize::MAX);
        if from > to {
            return Err(format!("`from` ({from}) must be <= `to` ({to})"));
        }
        Ok((from, to))
    }
}

/// Error response body for 400-class errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}
