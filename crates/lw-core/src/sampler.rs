//! Elapsed-time sampling.

/// Run/pause state of a stopwatch.
///
/// Every operation takes the current clock reading, so the sampler itself is
/// a plain value with no time source of its own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sampler {
    /// Clock reading at start, shifted back by the elapsed time at start.
    start_epoch: u64,
    /// Frozen elapsed time; authoritative only while stopped.
    elapsed_ms: u64,
    running: bool,
}

impl Sampler {
    pub const fn new() -> Self {
        Self {
            start_epoch: 0,
            elapsed_ms: 0,
            running: false,
        }
    }

    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Starts or resumes. Returns `false` if already running.
    ///
    /// The epoch is backdated by the time already accumulated, which makes
    /// pause/resume additive.
    pub const fn start(&mut self, now_ms: u64) -> bool {
        if self.running {
            return false;
        }
        self.start_epoch = now_ms.saturating_sub(self.elapsed_ms);
        self.running = true;
        true
    }

    /// Stops and freezes the elapsed value. Returns `false` if not running.
    pub const fn stop(&mut self, now_ms: u64) -> bool {
        if !self.running {
            return false;
        }
        self.elapsed_ms = now_ms.saturating_sub(self.start_epoch);
        self.running = false;
        true
    }

    /// Elapsed milliseconds at `now_ms`.
    pub const fn sample(&self, now_ms: u64) -> u64 {
        if self.running {
            now_ms.saturating_sub(self.start_epoch)
        } else {
            self.elapsed_ms
        }
    }

    /// Zeroes the elapsed time. Callers stop first; a running sampler is
    /// stopped here as well so no stale epoch survives the reset.
    pub const fn reset(&mut self) {
        self.start_epoch = 0;
        self.elapsed_ms = 0;
        self.running = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_zero() {
        let sampler = Sampler::new();
        assert!(!sampler.is_running());
        assert_eq!(sampler.sample(12_345), 0);
    }

    #[test]
    fn test_pause_and_resume_is_additive() {
        let mut sampler = Sampler::new();

        assert!(sampler.start(1_000));
        assert_eq!(sampler.sample(1_500), 500);
        assert!(sampler.stop(2_000));
        assert_eq!(sampler.sample(9_000), 1_000);

        assert!(sampler.start(10_000));
        assert_eq!(sampler.sample(10_500), 1_500);
        assert!(sampler.stop(11_000));
        assert_eq!(sampler.sample(50_000), 2_000);
    }

    #[test]
    fn test_repeated_start_and_stop_are_noops() {
        let mut sampler = Sampler::new();
        assert!(sampler.start(100));
        assert!(!sampler.start(400));
        assert_eq!(sampler.sample(600), 500);

        assert!(sampler.stop(700));
        assert!(!sampler.stop(900));
        assert_eq!(sampler.sample(1_000), 600);
    }

    #[test]
    fn test_sample_is_monotonic_while_running_and_constant_while_stopped() {
        let mut sampler = Sampler::new();
        let mut now = 0;
        let mut last = 0;

        // Alternate runs and pauses of varying length.
        for (round, step) in [3_u64, 7, 11, 13, 17].into_iter().enumerate() {
            if round % 2 == 0 {
                sampler.start(now);
            }
            for _ in 0..10 {
                now += step;
                let value = sampler.sample(now);
                if sampler.is_running() {
                    assert!(value >= last);
                } else {
                    assert_eq!(value, last);
                }
                last = value;
            }
            if round % 2 == 0 {
                sampler.stop(now);
            }
        }
    }

    #[test]
    fn test_reset_zeroes_elapsed() {
        let mut sampler = Sampler::new();
        sampler.start(0);
        sampler.stop(5_000);
        sampler.reset();
        assert_eq!(sampler.sample(6_000), 0);

        sampler.start(6_000);
        assert_eq!(sampler.sample(6_250), 250);
    }

    #[test]
    fn test_reset_while_running_stops() {
        let mut sampler = Sampler::new();
        sampler.start(0);
        sampler.reset();
        assert!(!sampler.is_running());
        assert_eq!(sampler.sample(1_000), 0);
    }
}
