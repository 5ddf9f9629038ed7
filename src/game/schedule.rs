//! Tick scheduling seam between the game loop and whatever drives it

use std::time::Duration;

/// Periodic timer driven by the game loop
///
/// The game loop starts it on (re)start, reschedules it when the cadence
/// changes, and stops it on game over. Implementations decide how ticks are
/// actually delivered.
pub trait TickScheduler {
    /// Begin firing every `period`, replacing any previous schedule
    fn start(&mut self, period: Duration);

    /// Change the period of a running schedule
    fn reschedule(&mut self, period: Duration);

    /// Stop firing until the next `start`
    fn stop(&mut self);
}

/// Scheduler for callers that step the game by hand
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ManualScheduler {
    period: Option<Duration>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current period, or `None` while stopped
    pub fn period(&self) -> Option<Duration> {
        self.period
    }

    pub fn is_running(&self) -> bool {
        self.period.is_some()
    }
}

impl TickScheduler for ManualScheduler {
    fn start(&mut self, period: Duration) {
        self.period = Some(period);
    }

    fn reschedule(&mut self, period: Duration) {
        if self.period.is_some() {
            self.period = Some(period);
        }
    }

    fn stop(&mut self) {
        self.period = None;
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Records every call made by the game loop
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum SchedulerCall {
        Start(Duration),
        Reschedule(Duration),
        Stop,
    }

    #[derive(Debug, Default)]
    pub struct RecordingScheduler {
        pub calls: Vec<SchedulerCall>,
    }

    impl TickScheduler for RecordingScheduler {
        fn start(&mut self, period: Duration) {
            self.calls.push(SchedulerCall::Start(period));
        }

        fn reschedule(&mut self, period: Duration) {
            self.calls.push(SchedulerCall::Reschedule(period));
        }

        fn stop(&mut self) {
            self.calls.push(SchedulerCall::Stop);
        }
    }

    #[test]
    fn test_manual_scheduler_lifecycle() {
        let mut scheduler = ManualScheduler::new();
        assert!(!scheduler.is_running());

        scheduler.start(Duration::from_millis(120));
        assert_eq!(scheduler.period(), Some(Duration::from_millis(120)));

        scheduler.reschedule(Duration::from_millis(100));
        assert_eq!(scheduler.period(), Some(Duration::from_millis(100)));

        scheduler.stop();
        assert!(!scheduler.is_running());
    }

    #[test]
    fn test_manual_scheduler_ignores_reschedule_when_stopped() {
        let mut scheduler = ManualScheduler::new();
        scheduler.reschedule(Duration::from_millis(100));
        assert_eq!(scheduler.period(), None);
    }
}
