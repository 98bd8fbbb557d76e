use std::time::{Duration, Instant};

/// Cancellable quiet-period timer.
///
/// Every `push` restarts the timer; `poll` hands back the latest value once
/// the quiet period has elapsed with no further input. Time is passed in by
/// the caller so the UI frame clock drives it.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    quiet_period: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(quiet_period: Duration) -> Self {
        Self {
            quiet_period,
            pending: None,
        }
    }

    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now));
    }

    /// Returns the pending value if it has been quiet long enough.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some((_, pushed_at)) if now.saturating_duration_since(*pushed_at) >= self.quiet_period => {
                self.pending.take().map(|(value, _)| value)
            }
            _ => None,
        }
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Time left before the pending value fires
    pub fn time_remaining(&self, now: Instant) -> Option<Duration> {
        self.pending.as_ref().map(|(_, pushed_at)| {
            self.quiet_period
                .saturating_sub(now.saturating_duration_since(*pushed_at))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUIET: Duration = Duration::from_millis(300);

    #[test]
    fn test_fires_once_after_quiet_period() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(QUIET);
        debouncer.push("btc".to_string(), start);

        assert_eq!(debouncer.poll(start + Duration::from_millis(299)), None);
        assert_eq!(
            debouncer.poll(start + Duration::from_millis(300)),
            Some("btc".to_string())
        );
        assert_eq!(debouncer.poll(start + Duration::from_secs(5)), None);
    }

    #[test]
    fn test_new_input_restarts_timer() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(QUIET);
        debouncer.push("b", start);
        debouncer.push("bt", start + Duration::from_millis(200));

        assert_eq!(debouncer.poll(start + Duration::from_millis(350)), None);
        assert_eq!(
            debouncer.time_remaining(start + Duration::from_millis(350)),
            Some(Duration::from_millis(150))
        );
        assert_eq!(debouncer.poll(start + Duration::from_millis(500)), Some("bt"));
    }

    #[test]
    fn test_cancel_drops_value() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(QUIET);
        debouncer.push(1, start);
        debouncer.cancel();

        assert!(!debouncer.is_pending());
        assert_eq!(debouncer.poll(start + QUIET), None);
    }
}
