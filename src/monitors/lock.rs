//! Device lock state, sampled at a throttled rate

use embassy_time::Duration;

use super::Throttle;

/// Platform query for the keyguard state
pub trait LockSource {
    fn is_device_locked(&mut self) -> bool;
}

/// Caches the lock state between throttled queries
pub struct LockMonitor {
    throttle: Throttle,
    locked: bool,
}

impl Default for LockMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl LockMonitor {
    pub const fn new() -> Self {
        Self {
            throttle: Throttle::new(),
            locked: false,
        }
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Advance one frame and query `source` if the poll interval elapsed
    pub fn sample<S: LockSource>(
        &mut self,
        source: &mut S,
        interval: Duration,
        frame_period: Duration,
    ) -> bool {
        if self.throttle.tick(interval, frame_period) {
            let locked = source.is_device_locked();
            if locked != self.locked {
                debug!("device locked: {}", locked);
            }
            self.locked = locked;
        }
        self.locked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CountingLock {
        locked: bool,
        queries: usize,
    }

    impl LockSource for CountingLock {
        fn is_device_locked(&mut self) -> bool {
            self.queries += 1;
            self.locked
        }
    }

    #[test]
    fn queries_once_per_interval() {
        let mut source = CountingLock { locked: true, queries: 0 };
        let mut monitor = LockMonitor::new();
        let interval = Duration::from_secs(1);
        let period = Duration::from_millis(100);

        assert!(monitor.sample(&mut source, interval, period));
        source.locked = false;
        for _ in 0..9 {
            // Cached until the next interval
            assert!(monitor.sample(&mut source, interval, period));
        }
        assert!(!monitor.sample(&mut source, interval, period));
        assert_eq!(source.queries, 2);
    }
}
