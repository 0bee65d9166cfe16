use std::time::Duration;

/// A single periodic timer fed by frame time.
///
/// There is only ever one interval armed; re-arming replaces it and drops
/// whatever time had accumulated toward the old one.
#[derive(Debug, Default)]
pub struct Ticker {
    interval: Option<Duration>,
    elapsed: Duration,
}

impl Ticker {
    pub fn arm(&mut self, interval: Duration) {
        self.interval = Some(interval);
        self.elapsed = Duration::ZERO;
    }

    pub fn disarm(&mut self) {
        self.interval = None;
        self.elapsed = Duration::ZERO;
    }

    #[cfg(test)]
    pub fn interval(&self) -> Option<Duration> {
        self.interval
    }

    /// Accumulates `dt` and reports whether a tick is due. Fires at most once
    /// per call; a backlog longer than one interval is discarded.
    pub fn poll(&mut self, dt: Duration) -> bool {
        let Some(interval) = self.interval else {
            return false;
        };
        self.elapsed += dt;
        if self.elapsed < interval {
            return false;
        }
        self.elapsed -= interval;
        if self.elapsed >= interval {
            self.elapsed = Duration::ZERO;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn disarmed_never_fires() {
        let mut t = Ticker::default();
        assert!(!t.poll(ms(10_000)));
    }

    #[test]
    fn fires_once_per_interval() {
        let mut t = Ticker::default();
        t.arm(ms(150));
        assert!(!t.poll(ms(100)));
        assert!(t.poll(ms(60)));
        // 10ms carried over.
        assert!(!t.poll(ms(130)));
        assert!(t.poll(ms(10)));
    }

    #[test]
    fn stall_does_not_replay_backlog() {
        let mut t = Ticker::default();
        t.arm(ms(100));
        assert!(t.poll(ms(1_000)));
        assert!(!t.poll(ms(50)));
    }

    #[test]
    fn rearming_resets_progress() {
        let mut t = Ticker::default();
        t.arm(ms(150));
        assert!(!t.poll(ms(140)));
        t.arm(ms(140));
        assert_eq!(t.interval(), Some(ms(140)));
        assert!(!t.poll(ms(20)));
        assert!(t.poll(ms(120)));
    }
}
