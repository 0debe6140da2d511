use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use tracing::warn;

static LOCK_POISON_LOGGED: AtomicBool = AtomicBool::new(false);

fn log_poisoned_lock_once(side: &'static str) {
    if LOCK_POISON_LOGGED
        .compare_exchange(false, true, Ordering::Relaxed, Ordering::Relaxed)
        .is_ok()
    {
        warn!(side, "loop metrics lock poisoned; continuing with inner value");
    }
}

// `ups` counts fixed update calls and can exceed `fps` during catch-up.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoopMetricsSnapshot {
    pub fps: f32,
    pub ups: f32,
    pub frame_time_ms: f32,
}

#[derive(Clone, Debug, Default)]
pub struct MetricsHandle {
    latest: Arc<RwLock<LoopMetricsSnapshot>>,
}

impl MetricsHandle {
    pub fn snapshot(&self) -> LoopMetricsSnapshot {
        *self.latest.read().unwrap_or_else(|poisoned| {
            log_poisoned_lock_once("read");
            poisoned.into_inner()
        })
    }

    pub(crate) fn publish(&self, snapshot: LoopMetricsSnapshot) {
        *self.latest.write().unwrap_or_else(|poisoned| {
            log_poisoned_lock_once("write");
            poisoned.into_inner()
        }) = snapshot;
    }
}

fn rate_per_second(count: u32, elapsed_ms: f64) -> f32 {
    (f64::from(count) * 1000.0 / elapsed_ms) as f32
}

#[derive(Debug)]
pub(crate) struct MetricsAccumulator {
    window_start_ms: f64,
    interval_ms: f64,
    frame_count: u32,
    update_count: u32,
    frame_total_ms: f64,
}

impl MetricsAccumulator {
    pub(crate) fn new(interval_ms: f64) -> Self {
        Self {
            window_start_ms: 0.0,
            interval_ms,
            frame_count: 0,
            update_count: 0,
            frame_total_ms: 0.0,
        }
    }

    pub(crate) fn reset(&mut self, now_ms: f64) {
        self.window_start_ms = now_ms;
        self.frame_count = 0;
        self.update_count = 0;
        self.frame_total_ms = 0.0;
    }

    pub(crate) fn record_frame(&mut self, frame_ms: f64) {
        self.frame_count = self.frame_count.saturating_add(1);
        self.frame_total_ms += frame_ms;
    }

    pub(crate) fn record_updates(&mut self, count: u32) {
        self.update_count = self.update_count.saturating_add(count);
    }

    pub(crate) fn maybe_snapshot(&mut self, now_ms: f64) -> Option<LoopMetricsSnapshot> {
        let elapsed_ms = (now_ms - self.window_start_ms).max(f64::EPSILON);
        if elapsed_ms < self.interval_ms {
            return None;
        }

        let snapshot = LoopMetricsSnapshot {
            fps: rate_per_second(self.frame_count, elapsed_ms),
            ups: rate_per_second(self.update_count, elapsed_ms),
            frame_time_ms: (self.frame_total_ms / f64::from(self.frame_count.max(1))) as f32,
        };

        self.reset(now_ms);

        Some(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;

    fn poison(handle: &MetricsHandle) {
        let shared = Arc::clone(&handle.latest);
        thread::scope(|scope| {
            let _ = scope
                .spawn(move || {
                    let _hold = shared.write().expect("lock for poisoning");
                    panic!("deliberate test panic");
                })
                .join();
        });
    }

    #[test]
    fn rates_are_normalized_to_the_window_length() {
        let mut accumulator = MetricsAccumulator::new(2_000.0);
        accumulator.reset(0.0);
        for _ in 0..4 {
            accumulator.record_frame(25.0);
        }
        accumulator.record_updates(8);

        let snapshot = accumulator.maybe_snapshot(2_000.0).expect("window closed");

        assert!((snapshot.fps - 2.0).abs() < 0.05);
        assert!((snapshot.ups - 4.0).abs() < 0.05);
        assert!((snapshot.frame_time_ms - 25.0).abs() < 0.001);
    }

    #[test]
    fn no_snapshot_before_the_window_elapses() {
        let mut accumulator = MetricsAccumulator::new(500.0);
        accumulator.reset(0.0);
        accumulator.record_frame(20.0);

        assert!(accumulator.maybe_snapshot(250.0).is_none());
    }

    #[test]
    fn an_empty_window_reports_zeroes() {
        let mut accumulator = MetricsAccumulator::new(1_000.0);
        accumulator.reset(0.0);

        let snapshot = accumulator.maybe_snapshot(1_000.0).expect("window closed");

        assert_eq!(snapshot.fps, 0.0);
        assert_eq!(snapshot.ups, 0.0);
        assert_eq!(snapshot.frame_time_ms, 0.0);
    }

    #[test]
    fn window_restarts_after_each_snapshot() {
        let mut accumulator = MetricsAccumulator::new(1_000.0);
        accumulator.reset(0.0);
        accumulator.record_frame(10.0);
        accumulator.maybe_snapshot(1_000.0).expect("first window");

        accumulator.record_frame(30.0);
        assert!(accumulator.maybe_snapshot(1_500.0).is_none());

        let snapshot = accumulator.maybe_snapshot(2_000.0).expect("second window");
        assert!((snapshot.fps - 1.0).abs() < 0.05);
        assert!((snapshot.frame_time_ms - 30.0).abs() < 0.001);
    }

    #[test]
    fn reset_discards_counts_from_the_open_window() {
        let mut accumulator = MetricsAccumulator::new(1_000.0);
        accumulator.reset(0.0);
        accumulator.record_frame(20.0);
        accumulator.record_updates(3);

        accumulator.reset(500.0);

        let snapshot = accumulator.maybe_snapshot(1_500.0).expect("window closed");
        assert_eq!(snapshot.fps, 0.0);
        assert_eq!(snapshot.ups, 0.0);
    }

    #[test]
    fn reads_survive_a_poisoned_lock() {
        let handle = MetricsHandle::default();
        poison(&handle);

        let snapshot = handle.snapshot();

        assert_eq!(snapshot.fps, 0.0);
        assert_eq!(snapshot.ups, 0.0);
        assert_eq!(snapshot.frame_time_ms, 0.0);
    }

    #[test]
    fn writes_survive_a_poisoned_lock() {
        let handle = MetricsHandle::default();
        poison(&handle);

        handle.publish(LoopMetricsSnapshot {
            fps: 48.0,
            ups: 96.0,
            frame_time_ms: 20.5,
        });

        let read_back = handle.snapshot();
        assert_eq!(read_back.fps, 48.0);
        assert_eq!(read_back.ups, 96.0);
        assert_eq!(read_back.frame_time_ms, 20.5);
    }
}
