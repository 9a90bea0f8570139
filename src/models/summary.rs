//! Per-run counters

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// What a finished run did
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Events completed
    pub events: u64,
    /// GET requests answered by the gateway
    pub requests_sent: u64,
    /// Responses outside the 2xx range (still printed)
    pub non_success_responses: u64,
    /// Time spent pausing between requests
    pub total_pause: Duration,
    /// Wall clock time of the run
    pub elapsed: Duration,
}

impl RunSummary {
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1000.0
    }

    pub fn requests_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.requests_sent as f64 / secs
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate() {
        let summary = RunSummary {
            events: 1,
            requests_sent: 4,
            elapsed: Duration::from_secs(2),
            ..Default::default()
        };
        assert_eq!(summary.requests_per_second(), 2.0);
        assert_eq!(summary.elapsed_ms(), 2000.0);
    }

    #[test]
    fn test_empty_run_rate() {
        assert_eq!(RunSummary::default().requests_per_second(), 0.0);
    }
}
