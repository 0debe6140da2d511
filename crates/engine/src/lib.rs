pub mod app;

pub use app::{
    FrameRequest, FrameScheduler, GameLoop, LoopConfig, LoopHandle, LoopMetricsSnapshot,
    ManualScheduler, MetricsHandle, TimerScheduler, DEFAULT_MAX_FRAME_DELTA,
    DEFAULT_METRICS_INTERVAL, DEFAULT_REFRESH_HZ, DEFAULT_TARGET_FPS,
};
