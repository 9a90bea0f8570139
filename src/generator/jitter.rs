//! Randomized pauses between requests

use crate::models::Config;
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

/// Pause of `base + U{0..=max_jitter_ms}` milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Jitter {
    base: Duration,
    max_jitter_ms: u64,
}

impl Jitter {
    pub fn new(base: Duration, max_jitter_ms: u64) -> Self {
        Self { base, max_jitter_ms }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.base_delay(), config.max_jitter_ms)
    }

    /// No pause at all
    pub fn none() -> Self {
        Self::new(Duration::ZERO, 0)
    }

    /// Shortest possible pause
    pub fn min(&self) -> Duration {
        self.base
    }

    /// Longest possible pause
    pub fn max(&self) -> Duration {
        self.base + Duration::from_millis(self.max_jitter_ms)
    }

    /// Draw one pause; the jitter is a whole number of milliseconds
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Duration {
        self.base + Duration::from_millis(rng.gen_range(0..=self.max_jitter_ms))
    }
}

impl Default for Jitter {
    fn default() -> Self {
        Self::new(
            Duration::from_millis(crate::defaults::DEFAULT_BASE_DELAY_MS),
            crate::defaults::DEFAULT_MAX_JITTER_MS,
        )
    }
}

/// Waits between requests and reports how long it waited
#[async_trait]
pub trait Pacer: Send {
    async fn pause(&mut self) -> Duration;
}

/// Sleeps on the tokio timer for a freshly drawn [`Jitter`] each time
pub struct JitterPacer {
    jitter: Jitter,
    rng: StdRng,
}

impl JitterPacer {
    /// Seeded from OS entropy
    pub fn new(jitter: Jitter) -> Self {
        Self {
            jitter,
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible sequence of pauses
    pub fn with_seed(jitter: Jitter, seed: u64) -> Self {
        Self {
            jitter,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

#[async_trait]
impl Pacer for JitterPacer {
    async fn pause(&mut self) -> Duration {
        let delay = self.jitter.sample(&mut self.rng);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        delay
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_default_bounds() {
        let jitter = Jitter::default();
        assert_eq!(jitter.min(), Duration::from_millis(10));
        assert_eq!(jitter.max(), Duration::from_millis(110));
    }

    #[test]
    fn test_from_config() {
        let config = Config {
            base_delay_ms: 5,
            max_jitter_ms: 20,
            ..Config::default()
        };
        let jitter = Jitter::from_config(&config);
        assert_eq!(jitter.min(), Duration::from_millis(5));
        assert_eq!(jitter.max(), Duration::from_millis(25));
    }

    #[test]
    fn test_zero_jitter_is_constant() {
        let jitter = Jitter::new(Duration::from_millis(10), 0);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            assert_eq!(jitter.sample(&mut rng), Duration::from_millis(10));
        }
    }

    #[test]
    fn test_samples_cover_both_ends() {
        let jitter = Jitter::default();
        let mut rng = StdRng::seed_from_u64(1);
        let samples: Vec<Duration> = (0..20_000).map(|_| jitter.sample(&mut rng)).collect();

        assert!(samples.contains(&jitter.min()));
        assert!(samples.contains(&jitter.max()));
    }

    #[tokio::test]
    async fn test_pacer_sleeps_for_drawn_delay() {
        let mut pacer = JitterPacer::with_seed(Jitter::default(), 42);
        let before = std::time::Instant::now();
        let slept = pacer.pause().await;

        assert!(slept >= Duration::from_millis(10) && slept <= Duration::from_millis(110));
        assert!(before.elapsed() >= slept);
    }

    #[tokio::test]
    async fn test_none_pacer_does_not_wait() {
        let mut pacer = JitterPacer::new(Jitter::none());
        assert_eq!(pacer.pause().await, Duration::ZERO);
    }

    proptest! {
        #[test]
        fn prop_sample_within_closed_range(seed in any::<u64>()) {
            let jitter = Jitter::default();
            let mut rng = StdRng::seed_from_u64(seed);
            let delay = jitter.sample(&mut rng);
            prop_assert!(delay >= Duration::from_millis(10));
            prop_assert!(delay <= Duration::from_millis(110));
            prop_assert_eq!(delay.subsec_nanos() % 1_000_000, 0);
        }
    }
}
