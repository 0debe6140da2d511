use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use super::driver::{FrameRequest, FrameScheduler, TimerScheduler};
use super::metrics::{MetricsAccumulator, MetricsHandle};

pub const DEFAULT_TARGET_FPS: f64 = 60.0;
pub const DEFAULT_MAX_FRAME_DELTA: Duration = Duration::from_millis(100);
pub const DEFAULT_METRICS_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Clone)]
pub struct LoopConfig {
    pub target_fps: f64,
    pub max_frame_delta: Duration,
    pub metrics_interval: Duration,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            target_fps: DEFAULT_TARGET_FPS,
            max_frame_delta: DEFAULT_MAX_FRAME_DELTA,
            metrics_interval: DEFAULT_METRICS_INTERVAL,
        }
    }
}

#[derive(Debug, Default)]
struct ControlFlags {
    stop: AtomicBool,
    pause: AtomicBool,
    resume: AtomicBool,
}

// Stop/pause/resume requests are applied at tick boundaries.
#[derive(Debug, Clone, Default)]
pub struct LoopHandle {
    flags: Arc<ControlFlags>,
}

impl LoopHandle {
    pub fn request_stop(&self) {
        self.flags.stop.store(true, Ordering::Relaxed);
    }

    pub fn request_pause(&self) {
        self.flags.pause.store(true, Ordering::Relaxed);
    }

    pub fn request_resume(&self) {
        self.flags.resume.store(true, Ordering::Relaxed);
    }

    fn take_stop(&self) -> bool {
        self.flags.stop.swap(false, Ordering::Relaxed)
    }

    fn take_pause(&self) -> bool {
        self.flags.pause.swap(false, Ordering::Relaxed)
    }

    fn take_resume(&self) -> bool {
        self.flags.resume.swap(false, Ordering::Relaxed)
    }
}

pub struct GameLoop<S: FrameScheduler> {
    update: Box<dyn FnMut(f64)>,
    render: Box<dyn FnMut(f64)>,
    scheduler: S,
    handle: LoopHandle,
    metrics_handle: MetricsHandle,
    metrics: MetricsAccumulator,
    running: bool,
    paused: bool,
    target_fps: f64,
    timestep_ms: f64,
    delta_ms: f64,
    last_time_ms: f64,
    max_frame_delta_ms: f64,
    pending: Option<FrameRequest>,
}

impl<S: FrameScheduler> GameLoop<S> {
    pub fn new(
        scheduler: S,
        update: impl FnMut(f64) + 'static,
        render: impl FnMut(f64) + 'static,
    ) -> Self {
        Self::with_config(scheduler, LoopConfig::default(), update, render)
    }

    pub fn with_config(
        scheduler: S,
        config: LoopConfig,
        update: impl FnMut(f64) + 'static,
        render: impl FnMut(f64) + 'static,
    ) -> Self {
        Self::with_control(scheduler, config, LoopHandle::default(), update, render)
    }

    pub fn with_control(
        scheduler: S,
        config: LoopConfig,
        handle: LoopHandle,
        update: impl FnMut(f64) + 'static,
        render: impl FnMut(f64) + 'static,
    ) -> Self {
        let target_fps = normalize_target_fps(config.target_fps);
        let max_frame_delta =
            non_zero_duration_or(config.max_frame_delta, DEFAULT_MAX_FRAME_DELTA);
        let metrics_interval =
            non_zero_duration_or(config.metrics_interval, DEFAULT_METRICS_INTERVAL);

        Self {
            update: Box::new(update),
            render: Box::new(render),
            scheduler,
            handle,
            metrics_handle: MetricsHandle::default(),
            metrics: MetricsAccumulator::new(duration_to_ms(metrics_interval)),
            running: false,
            paused: false,
            target_fps,
            timestep_ms: 1000.0 / target_fps,
            delta_ms: 0.0,
            last_time_ms: 0.0,
            max_frame_delta_ms: duration_to_ms(max_frame_delta),
            pending: None,
        }
    }

    pub fn start(&mut self) {
        if self.running {
            return;
        }
        self.running = true;
        self.paused = false;
        self.delta_ms = 0.0;
        self.last_time_ms = self.scheduler.now_ms();
        self.metrics.reset(self.last_time_ms);
        info!(
            target_fps = self.target_fps,
            timestep_ms = self.timestep_ms,
            max_frame_delta_ms = self.max_frame_delta_ms,
            "loop_started"
        );
        self.pending = Some(self.scheduler.request_frame());
    }

    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        self.paused = false;
        if let Some(request) = self.pending.take() {
            self.scheduler.cancel_frame(request);
        }
        info!("loop_stopped");
    }

    pub fn pause(&mut self) {
        if !self.running || self.paused {
            return;
        }
        self.paused = true;
        // Discard the backlog so resume never replays time spent paused.
        self.delta_ms = 0.0;
        debug!("loop_paused");
    }

    pub fn resume(&mut self) {
        if !self.paused {
            return;
        }
        self.paused = false;
        self.delta_ms = 0.0;
        self.last_time_ms = self.scheduler.now_ms();
        debug!("loop_resumed");
    }

    pub fn set_target_fps(&mut self, target_fps: f64) {
        if !target_fps.is_finite() || target_fps <= 0.0 {
            warn!(requested = target_fps, "target_fps_rejected");
            return;
        }
        self.target_fps = target_fps;
        self.timestep_ms = 1000.0 / target_fps;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn target_fps(&self) -> f64 {
        self.target_fps
    }

    pub fn fps(&self) -> f32 {
        self.metrics_handle.snapshot().fps
    }

    pub fn handle(&self) -> LoopHandle {
        self.handle.clone()
    }

    pub fn metrics_handle(&self) -> MetricsHandle {
        self.metrics_handle.clone()
    }

    pub fn tick(&mut self, request: FrameRequest, now_ms: f64) {
        if !self.running || self.pending != Some(request) {
            debug!(request_id = request.id(), "stale_frame_ignored");
            return;
        }
        self.pending = None;

        self.apply_control_requests();
        if !self.running {
            return;
        }

        let frame_ms = (now_ms - self.last_time_ms).max(0.0);
        self.last_time_ms = now_ms;
        self.metrics.record_frame(frame_ms);

        if !self.paused {
            let clamped_ms = clamp_frame_time(frame_ms, self.max_frame_delta_ms);
            if clamped_ms < frame_ms {
                warn!(
                    dropped_ms = frame_ms - clamped_ms,
                    max_frame_delta_ms = self.max_frame_delta_ms,
                    "frame_time_clamped"
                );
            }
            self.delta_ms += clamped_ms;

            let plan = plan_updates(self.delta_ms, self.timestep_ms);
            let step_seconds = self.timestep_ms / 1000.0;
            for _ in 0..plan.updates_to_run {
                (self.update)(step_seconds);
            }
            self.delta_ms = plan.remaining_delta_ms;
            self.metrics.record_updates(plan.updates_to_run);
        }

        // Fraction of the next fixed step already elapsed; always in [0, 1).
        let alpha = self.delta_ms / self.timestep_ms;
        (self.render)(alpha);

        if let Some(snapshot) = self.metrics.maybe_snapshot(now_ms) {
            self.metrics_handle.publish(snapshot);
            info!(
                fps = snapshot.fps,
                ups = snapshot.ups,
                frame_time_ms = snapshot.frame_time_ms,
                "loop_metrics"
            );
        }

        self.apply_control_requests();
        if self.running {
            self.pending = Some(self.scheduler.request_frame());
        }
    }

    fn apply_control_requests(&mut self) {
        if self.handle.take_stop() {
            self.stop();
        }
        if self.handle.take_pause() {
            self.pause();
        }
        if self.handle.take_resume() {
            self.resume();
        }
    }
}

impl GameLoop<TimerScheduler> {
    pub fn run(&mut self) {
        self.start();
        while self.running {
            let request = match self.pending {
                Some(request) => request,
                None => break,
            };
            self.scheduler.wait(request);
            let now_ms = self.scheduler.now_ms();
            self.tick(request, now_ms);
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct UpdatePlan {
    updates_to_run: u32,
    remaining_delta_ms: f64,
}

fn plan_updates(mut delta_ms: f64, timestep_ms: f64) -> UpdatePlan {
    let mut updates_to_run = 0u32;

    while delta_ms >= timestep_ms {
        let next_delta = delta_ms - timestep_ms;
        if next_delta == delta_ms || updates_to_run == u32::MAX {
            // A step too small to drain the accumulator; drop the backlog.
            warn!(delta_ms, timestep_ms, "catch_up_stalled");
            return UpdatePlan {
                updates_to_run,
                remaining_delta_ms: 0.0,
            };
        }
        delta_ms = next_delta;
        updates_to_run = updates_to_run.saturating_add(1);
    }

    UpdatePlan {
        updates_to_run,
        remaining_delta_ms: delta_ms,
    }
}

fn clamp_frame_time(frame_ms: f64, max_frame_delta_ms: f64) -> f64 {
    frame_ms.min(max_frame_delta_ms)
}

fn normalize_target_fps(target_fps: f64) -> f64 {
    if target_fps.is_finite() && target_fps > 0.0 {
        target_fps
    } else {
        warn!(
            requested = target_fps,
            fallback = DEFAULT_TARGET_FPS,
            "target_fps_normalized"
        );
        DEFAULT_TARGET_FPS
    }
}

fn non_zero_duration_or(value: Duration, fallback: Duration) -> Duration {
    if value.is_zero() {
        fallback
    } else {
        value
    }
}

fn duration_to_ms(value: Duration) -> f64 {
    value.as_secs_f64() * 1000.0
}
