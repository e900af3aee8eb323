//! Optional frame-throughput reporting.

use std::fmt;
use std::time::{Duration, Instant};

use tracing::info;

/// What a [`ThroughputMeter`] reports every `interval` frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameStats {
    /// Frames counted since the meter started, including this one.
    pub frame: u64,
    pub interval: u32,
    /// Wall time spent on the last `interval` frames.
    pub elapsed: Duration,
}

impl FrameStats {
    pub fn frames_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            f64::from(self.interval) / secs
        } else {
            f64::INFINITY
        }
    }
}

pub type ThroughputHook = Box<dyn FnMut(&FrameStats) + Send>;

pub struct ThroughputMeter {
    interval: u32,
    frame: u64,
    window_start: Instant,
    hook: ThroughputHook,
}

impl fmt::Debug for ThroughputMeter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThroughputMeter")
            .field("interval", &self.interval)
            .field("frame", &self.frame)
            .finish_non_exhaustive()
    }
}

impl ThroughputMeter {
    /// `interval` is clamped to at least one frame.
    pub fn new(interval: u32, hook: impl FnMut(&FrameStats) + Send + 'static) -> Self {
        Self {
            interval: interval.max(1),
            frame: 0,
            window_start: Instant::now(),
            hook: Box::new(hook),
        }
    }

    /// Logs frames per second at `info`.
    pub fn logging(interval: u32) -> Self {
        Self::new(interval, |stats| {
            info!(
                "frame {}: {:.2} fps over {} frames",
                stats.frame,
                stats.frames_per_second(),
                stats.interval
            );
        })
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    pub fn tick_at(&mut self, now: Instant) {
        self.frame += 1;
        if self.frame % u64::from(self.interval) != 0 {
            return;
        }
        let stats = FrameStats {
            frame: self.frame,
            interval: self.interval,
            elapsed: now.saturating_duration_since(self.window_start),
        };
        self.window_start = now;
        (self.hook)(&stats);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn reports_every_interval() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let mut meter = ThroughputMeter::new(3, move |stats| {
            sink.lock().unwrap().push(*stats);
        });

        let start = Instant::now();
        for i in 1..=7u64 {
            meter.tick_at(start + Duration::from_millis(10 * i));
        }

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].frame, 3);
        assert_eq!(seen[1].frame, 6);
        assert_eq!(seen[1].elapsed, Duration::from_millis(30));
        assert!((seen[1].frames_per_second() - 100.0).abs() < 1e-9);
        assert_eq!(meter.frame(), 7);
    }

    #[test]
    fn zero_interval_is_clamped() {
        let mut calls = 0u32;
        let counter = Arc::new(Mutex::new(0u32));
        let shared = Arc::clone(&counter);
        let mut meter = ThroughputMeter::new(0, move |_| *shared.lock().unwrap() += 1);
        for _ in 0..4 {
            meter.tick();
            calls += 1;
        }
        assert_eq!(*counter.lock().unwrap(), calls);
    }

    #[test]
    fn instant_window_is_infinite() {
        let stats = FrameStats {
            frame: 1,
            interval: 1,
            elapsed: Duration::ZERO,
        };
        assert!(stats.frames_per_second().is_infinite());
    }
}
