// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Deterministic clock for reproducible envelope timestamps

use chrono::{DateTime, Duration, TimeZone, Utc};

/// Deterministic timestamp source for the envelope store.
///
/// Envelope timestamps are a fixed base time advanced by a fixed step per
/// sequence number, never wall-clock time, so replaying the same publishes
/// yields byte-identical traces.
#[derive(Debug, Clone)]
pub struct DeterministicClock {
    base: DateTime<Utc>,
    step_ms: i64,
}

impl DeterministicClock {
    /// Create a clock with an explicit base time and per-sequence step
    pub fn new(base: DateTime<Utc>, step_ms: i64) -> Self {
        Self { base, step_ms }
    }

    /// Timestamp for the given sequence number
    pub fn timestamp_for(&self, sequence: u64) -> DateTime<Utc> {
        self.base + Duration::milliseconds(self.step_ms.saturating_mul(sequence as i64))
    }
}

impl Default for DeterministicClock {
    /// 2024-01-01T00:00:00Z advanced by 1ms per sequence number
    fn default() -> Self {
        let base = Utc
            .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
            .single()
            .unwrap_or(DateTime::UNIX_EPOCH);
        Self { base, step_ms: 1 }
    }
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
