use serde::{Deserialize, Serialize};

/// Scheduled window during which grid import or export is unavailable.
///
/// The window is half-open, `[start, end)`. When `start > end` it wraps past
/// midnight, so `22..2` covers hours 22, 23, 0 and 1. `start == end` is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutageInterval {
    /// Start hour (inclusive).
    pub start: usize,
    /// End hour (exclusive).
    pub end: usize,
}

impl OutageInterval {
    /// Creates a new outage window spanning `[start, end)`.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Returns `true` when `hour` falls within the window.
    pub fn is_active(&self, hour: usize) -> bool {
        if self.start <= self.end {
            hour >= self.start && hour < self.end
        } else {
            hour >= self.start || hour < self.end
        }
    }
}

/// Returns `true` when any interval in `intervals` covers `hour`.
pub fn any_active(intervals: &[OutageInterval], hour: usize) -> bool {
    intervals.iter().any(|i| i.is_active(hour))
}
