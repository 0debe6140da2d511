use std::cell::RefCell;
use std::rc::Rc;
use std::thread;
use std::time::{Duration, Instant};

use tracing::warn;

pub const DEFAULT_REFRESH_HZ: u32 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameRequest(u64);

impl FrameRequest {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(self) -> u64 {
        self.0
    }
}

// Clock is monotonic; at most one frame request is in flight at a time.
pub trait FrameScheduler {
    fn now_ms(&self) -> f64;
    fn request_frame(&mut self) -> FrameRequest;
    fn cancel_frame(&mut self, request: FrameRequest);
}

#[derive(Debug, Default)]
struct ManualFrameState {
    now_ms: f64,
    next_request_id: u64,
    outstanding: Vec<FrameRequest>,
    cancelled: Vec<FrameRequest>,
}

// Clones share the underlying queue and clock.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    state: Rc<RefCell<ManualFrameState>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_now(&self, now_ms: f64) {
        self.state.borrow_mut().now_ms = now_ms;
    }

    pub fn advance(&self, delta_ms: f64) {
        self.state.borrow_mut().now_ms += delta_ms;
    }

    pub fn take_scheduled(&self) -> Option<FrameRequest> {
        let mut state = self.state.borrow_mut();
        if state.outstanding.is_empty() {
            None
        } else {
            Some(state.outstanding.remove(0))
        }
    }

    pub fn scheduled_count(&self) -> usize {
        self.state.borrow().outstanding.len()
    }

    pub fn was_cancelled(&self, request: FrameRequest) -> bool {
        self.state.borrow().cancelled.contains(&request)
    }

    pub fn cancelled_count(&self) -> usize {
        self.state.borrow().cancelled.len()
    }
}

impl FrameScheduler for ManualScheduler {
    fn now_ms(&self) -> f64 {
        self.state.borrow().now_ms
    }

    fn request_frame(&mut self) -> FrameRequest {
        let mut state = self.state.borrow_mut();
        let request = FrameRequest::new(state.next_request_id);
        state.next_request_id += 1;
        state.outstanding.push(request);
        request
    }

    fn cancel_frame(&mut self, request: FrameRequest) {
        let mut state = self.state.borrow_mut();
        state
            .outstanding
            .retain(|outstanding| *outstanding != request);
        state.cancelled.push(request);
    }
}

#[derive(Debug)]
pub struct TimerScheduler {
    origin: Instant,
    refresh_interval: Duration,
    next_request_id: u64,
    pending: Option<(FrameRequest, Instant)>,
}

impl TimerScheduler {
    pub fn new(refresh_hz: u32) -> Self {
        let refresh_hz = refresh_hz.max(1);
        Self {
            origin: Instant::now(),
            refresh_interval: Duration::from_secs_f64(1.0 / f64::from(refresh_hz)),
            next_request_id: 0,
            pending: None,
        }
    }

    pub fn refresh_interval(&self) -> Duration {
        self.refresh_interval
    }

    pub fn wait(&self, request: FrameRequest) {
        let (pending, due) = match self.pending {
            Some(pending) => pending,
            None => return,
        };
        if pending != request {
            return;
        }
        let now = Instant::now();
        if due > now {
            thread::sleep(due - now);
        }
    }
}

impl Default for TimerScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_REFRESH_HZ)
    }
}

impl FrameScheduler for TimerScheduler {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }

    fn request_frame(&mut self) -> FrameRequest {
        let request = FrameRequest::new(self.next_request_id);
        self.next_request_id += 1;
        self.pending = Some((request, Instant::now() + self.refresh_interval));
        request
    }

    fn cancel_frame(&mut self, request: FrameRequest) {
        match self.pending {
            Some((pending, _)) if pending == request => self.pending = None,
            _ => warn!(request_id = request.id(), "cancel_unknown_frame_request"),
        }
    }
}
