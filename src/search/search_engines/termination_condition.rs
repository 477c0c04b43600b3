//! Cooperative time and memory limits.
//!
//! The search loop never blocks, so limits are enforced by polling from
//! inside node expansion: the driver reports every generated candidate, and
//! once per [`CHECK_INTERVAL`] candidates the wall clock and the process
//! footprint are actually examined. Expiry turns into a clean abort carrying
//! statistics, never a mid-search recovery.

use crate::search::search_engines::SearchResult;
use memory_stats::memory_stats;
use std::time::{Duration, Instant};
use tracing::info;

/// Generated candidates between limit polls.
const CHECK_INTERVAL: i64 = 1000;

#[derive(Debug)]
pub struct TerminationCondition {
    time_limit: Option<Duration>,
    memory_limit_mb: Option<usize>,
    start_time: Instant,
    peak_memory_usage_mb: usize,
}

impl TerminationCondition {
    pub fn new(time_limit: Option<Duration>, memory_limit_mb: Option<usize>) -> Self {
        info!(
            time_limit = time_limit.map(|d| d.as_secs_f64()),
            memory_limit_mb = memory_limit_mb,
        );
        Self {
            time_limit,
            memory_limit_mb,
            start_time: Instant::now(),
            peak_memory_usage_mb: 0,
        }
    }

    /// Called once per generated candidate with the running candidate count.
    /// Off the polling cadence this is just a comparison; on it, the limits
    /// are examined and the breach, if any, is returned.
    pub fn check(&mut self, generated_actions: i64) -> Option<SearchResult> {
        if generated_actions % CHECK_INTERVAL != 0 {
            return None;
        }

        if let Some(time_limit) = self.time_limit {
            if self.start_time.elapsed() > time_limit {
                return Some(SearchResult::TimeLimitExceeded);
            }
        }

        if let Some(memory_limit_mb) = self.memory_limit_mb {
            if let Some(usage) = memory_stats() {
                let usage_mb = usage.physical_mem / 1024 / 1024;
                self.peak_memory_usage_mb = self.peak_memory_usage_mb.max(usage_mb);
                if usage_mb > memory_limit_mb {
                    return Some(SearchResult::MemoryLimitExceeded);
                }
            }
        }

        None
    }

    pub fn finalise(&self) {
        info!(
            peak_recorded_memory_usage_mb = self.peak_memory_usage_mb,
            total_time_used = self.start_time.elapsed().as_secs_f64(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_limits_never_terminates() {
        let mut termination = TerminationCondition::new(None, None);
        assert!(termination.check(CHECK_INTERVAL).is_none());
    }

    #[test]
    fn elapsed_time_limit_terminates_on_the_polling_cadence() {
        let mut termination = TerminationCondition::new(Some(Duration::ZERO), None);
        std::thread::sleep(Duration::from_millis(1));
        assert!(matches!(
            termination.check(CHECK_INTERVAL),
            Some(SearchResult::TimeLimitExceeded)
        ));
    }

    #[test]
    fn off_cadence_counts_skip_the_poll() {
        let mut termination = TerminationCondition::new(Some(Duration::ZERO), None);
        std::thread::sleep(Duration::from_millis(1));
        assert!(termination.check(CHECK_INTERVAL - 1).is_none());
    }
}
