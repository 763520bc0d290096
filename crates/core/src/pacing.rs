//! Randomized request pacing for the collector.
//!
//! All anti-detection timing lives here as an injectable policy: delay bounds,
//! scroll simulation bounds, and the rest-interval threshold. Tests swap in
//! [`PacingPolicy::none`] to run the same control flow with zero delays.

use rand::Rng;
use std::time::Duration;

/// Inclusive millisecond bounds for a randomized pause.
pub type DelayBounds = (u64, u64);

/// Timing policy for one collection run.
#[derive(Debug, Clone)]
pub struct PacingPolicy {
    /// Pause after navigating to a search page, before the first extraction.
    pub settle_delay_ms: DelayBounds,
    /// Pause between pagination rounds.
    pub page_delay_ms: DelayBounds,
    /// Pause between successive queries in a multi-query run. Longer than
    /// `page_delay_ms` to spread load across query variants.
    pub query_delay_ms: DelayBounds,
    /// Number of simulated scroll steps per round (inclusive bounds).
    pub scroll_steps: (u32, u32),
    /// Scroll distance per step in pixels (inclusive bounds).
    pub scroll_distance_px: (u32, u32),
    /// Pause between scroll steps.
    pub scroll_pause_ms: DelayBounds,
    /// Take a long rest after each multiple of this many collected notes.
    pub rest_every: usize,
    /// Duration of the long rest.
    pub rest_delay_ms: u64,
}

impl Default for PacingPolicy {
    fn default() -> Self {
        Self {
            settle_delay_ms: (2_000, 4_000),
            page_delay_ms: (3_000, 6_000),
            query_delay_ms: (5_000, 10_000),
            scroll_steps: (2, 4),
            scroll_distance_px: (300, 600),
            scroll_pause_ms: (500, 1_500),
            rest_every: 10,
            rest_delay_ms: 30_000,
        }
    }
}

impl PacingPolicy {
    /// Zero-delay policy for tests; control flow is unchanged, only time is.
    pub fn none() -> Self {
        Self {
            settle_delay_ms: (0, 0),
            page_delay_ms: (0, 0),
            query_delay_ms: (0, 0),
            scroll_steps: (1, 1),
            scroll_distance_px: (300, 300),
            scroll_pause_ms: (0, 0),
            rest_every: 10,
            rest_delay_ms: 0,
        }
    }

    pub async fn settle_pause(&self) {
        sleep_between(self.settle_delay_ms).await;
    }

    pub async fn page_pause(&self) {
        sleep_between(self.page_delay_ms).await;
    }

    pub async fn query_pause(&self) {
        sleep_between(self.query_delay_ms).await;
    }

    pub async fn scroll_pause(&self) {
        sleep_between(self.scroll_pause_ms).await;
    }

    /// Long rest applied after each `rest_every` collected notes.
    pub async fn rest_pause(&self) {
        if self.rest_delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.rest_delay_ms)).await;
        }
    }

    /// Randomized number of scroll steps for one round.
    pub fn scroll_step_count(&self) -> u32 {
        let (min, max) = self.scroll_steps;
        rand::rng().random_range(min..=max.max(min))
    }

    /// Randomized scroll distance for one step.
    pub fn scroll_distance(&self) -> u32 {
        let (min, max) = self.scroll_distance_px;
        rand::rng().random_range(min..=max.max(min))
    }
}

async fn sleep_between((min, max): DelayBounds) {
    if max == 0 {
        return;
    }
    let ms = rand::rng().random_range(min..=max.max(min));
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_bounds_are_respected() {
        let policy = PacingPolicy::default();
        for _ in 0..50 {
            let steps = policy.scroll_step_count();
            assert!((2..=4).contains(&steps));
            let distance = policy.scroll_distance();
            assert!((300..=600).contains(&distance));
        }
    }

    #[tokio::test]
    async fn test_none_policy_does_not_sleep() {
        let policy = PacingPolicy::none();
        let start = std::time::Instant::now();
        policy.settle_pause().await;
        policy.page_pause().await;
        policy.query_pause().await;
        policy.scroll_pause().await;
        policy.rest_pause().await;
        assert!(start.elapsed() < Duration::from_millis(100));
    }

    #[test]
    fn test_default_rest_threshold() {
        let policy = PacingPolicy::default();
        assert_eq!(policy.rest_every, 10);
        assert_eq!(policy.rest_delay_ms, 30_000);
    }
}
