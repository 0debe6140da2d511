mod driver;
mod game_loop;
mod metrics;

pub use driver::{
    FrameRequest, FrameScheduler, ManualScheduler, TimerScheduler, DEFAULT_REFRESH_HZ,
};
pub use game_loop::{
    GameLoop, LoopConfig, LoopHandle, DEFAULT_MAX_FRAME_DELTA, DEFAULT_METRICS_INTERVAL,
    DEFAULT_TARGET_FPS,
};
pub use metrics::{LoopMetricsSnapshot, MetricsHandle};
