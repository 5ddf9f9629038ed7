use std::time::Duration;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

use crate::game::TickScheduler;

/// Tick scheduler backed by a tokio interval
///
/// The interval is built lazily on the first `tick().await`, so the scheduler
/// can be created and driven outside a runtime. While stopped, `tick()` never
/// completes.
#[derive(Debug, Default)]
pub struct IntervalScheduler {
    period: Option<Duration>,
    interval: Option<Interval>,
}

impl IntervalScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn period(&self) -> Option<Duration> {
        self.period
    }

    /// Wait for the next tick; pends forever while stopped
    pub async fn tick(&mut self) {
        let Some(period) = self.period else {
            return std::future::pending().await;
        };

        let interval = self.interval.get_or_insert_with(|| {
            let mut interval = interval_at(Instant::now() + period, period);
            // A late tick pushes the schedule back instead of bursting
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            interval
        });
        interval.tick().await;
    }
}

impl TickScheduler for IntervalScheduler {
    fn start(&mut self, period: Duration) {
        self.period = Some(period);
        self.interval = None;
    }

    fn reschedule(&mut self, period: Duration) {
        if self.period.is_some() {
            self.period = Some(period);
            self.interval = None;
        }
    }

    fn stop(&mut self) {
        self.period = None;
        self.interval = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::timeout;

    #[tokio::test(start_paused = true)]
    async fn test_fires_after_period() {
        let mut scheduler = IntervalScheduler::new();
        scheduler.start(Duration::from_millis(120));

        let started = Instant::now();
        scheduler.tick().await;

        assert!(started.elapsed() >= Duration::from_millis(120));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stopped_scheduler_never_fires() {
        let mut scheduler = IntervalScheduler::new();
        scheduler.start(Duration::from_millis(50));
        scheduler.stop();

        let result = timeout(Duration::from_secs(10), scheduler.tick()).await;

        assert!(result.is_err());
        assert_eq!(scheduler.period(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reschedule_changes_period() {
        let mut scheduler = IntervalScheduler::new();
        scheduler.start(Duration::from_millis(120));
        scheduler.tick().await;

        scheduler.reschedule(Duration::from_millis(80));
        let started = Instant::now();
        scheduler.tick().await;

        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_millis(80));
        assert!(elapsed < Duration::from_millis(120));
    }

    #[test]
    fn test_reschedule_ignored_while_stopped() {
        let mut scheduler = IntervalScheduler::new();
        scheduler.reschedule(Duration::from_millis(80));
        assert_eq!(scheduler.period(), None);
    }
}
