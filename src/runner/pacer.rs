//! Inter-item pacing.
//!
//! The service enforces a per-minute request quota; the pacer spaces
//! consecutive items of a batch category to stay under it. It counts
//! its own pauses so the "no delay after the last item" rule is
//! directly observable in tests.

use std::time::Duration;

/// Spaces consecutive batch items by a fixed delay.
#[derive(Debug)]
pub struct Pacer {
    delay: Duration,
    paused: u64,
}

impl Pacer {
    /// Creates a pacer with the given inter-item delay.
    pub fn new(delay: Duration) -> Self {
        Self { delay, paused: 0 }
    }

    /// Sleeps the inter-item delay once.
    pub async fn pause(&mut self) {
        tracing::debug!(delay_secs = self.delay.as_secs(), "pausing between items");
        tokio::time::sleep(self.delay).await;
        self.paused += 1;
    }

    /// Number of pauses taken so far.
    pub fn paused(&self) -> u64 {
        self.paused
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_pauses_are_counted() {
        let mut pacer = Pacer::new(Duration::ZERO);
        assert_eq!(pacer.paused(), 0);

        pacer.pause().await;
        pacer.pause().await;
        assert_eq!(pacer.paused(), 2);
    }
}
