//! Time Capabilities
//!
//! Injectable delay and wall-clock seams so polling and expiry logic can be
//! tested without real timers.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;

/// Asynchronous delay capability
#[async_trait]
pub trait Delay: Send + Sync {
    /// Suspend the calling flow for `duration`
    async fn wait(&self, duration: Duration);
}

/// `Delay` backed by the tokio timer
#[derive(Default)]
pub struct TokioDelay;

#[async_trait]
impl Delay for TokioDelay {
    async fn wait(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Delay that resolves immediately and records each requested duration
///
/// For testing and demo purposes.
#[derive(Default)]
pub struct RecordingDelay {
    waits: Mutex<Vec<Duration>>,
}

impl RecordingDelay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn waits(&self) -> Vec<Duration> {
        self.waits.lock().unwrap().clone()
    }
}

#[async_trait]
impl Delay for RecordingDelay {
    async fn wait(&self, duration: Duration) {
        self.waits.lock().unwrap().push(duration);
    }
}

/// Wall-clock capability
pub trait Clock: Send + Sync {
    /// Current time as milliseconds since the Unix epoch
    fn now_ms(&self) -> i64;
}

/// `Clock` backed by the system clock
#[derive(Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Clock fixed at a settable instant
///
/// For testing and demo purposes.
pub struct FixedClock {
    now_ms: Mutex<i64>,
}

impl FixedClock {
    pub fn new(now_ms: i64) -> Self {
        Self {
            now_ms: Mutex::new(now_ms),
        }
    }

    /// Move the clock forward
    pub fn advance_ms(&self, delta: i64) {
        *self.now_ms.lock().unwrap() += delta;
    }
}

impl Clock for FixedClock {
    fn now_ms(&self) -> i64 {
        *self.now_ms.lock().unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_recording_delay_resolves_immediately() {
        let delay = RecordingDelay::new();
        delay.wait(Duration::from_millis(5000)).await;
        delay.wait(Duration::from_millis(5000)).await;

        assert_eq!(
            delay.waits(),
            vec![Duration::from_millis(5000), Duration::from_millis(5000)]
        );
    }

    #[test]
    fn test_fixed_clock_advances() {
        let clock = FixedClock::new(1_000);
        clock.advance_ms(500);
        assert_eq!(clock.now_ms(), 1_500);
    }

    #[test]
    fn test_system_clock_reports_epoch_millis() {
        // 2020-01-01 as a sanity floor
        assert!(SystemClock.now_ms() > 1_577_836_800_000);
    }
}
