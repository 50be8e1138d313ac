//! Frame timestamp sources for the display loop.
//!
//! The scene advances exactly once per displayed frame and derives its
//! simulation time from the frame's millisecond timestamp. [`GameLoop`]
//! produces those timestamps from the wall clock; [`FrameScheduler`] does the
//! bookkeeping and can be driven with synthetic frame times for headless runs.

use std::time::{Duration, Instant};
use tracing::warn;

/// Maximum frame time clamp. A stalled frame (debugger, window drag) advances
/// the timestamp by at most this much instead of making the corona jump.
pub const MAX_FRAME_TIME: f64 = 0.25; // 250ms = 4 FPS minimum

/// Accumulates frame times into a monotonic millisecond timestamp.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameScheduler {
    timestamp_ms: f64,
    frame_count: u64,
    clamped_frames: u64,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Account for a frame that took `frame_time` seconds and return its
    /// timestamp in milliseconds. Negative times count as zero.
    pub fn advance(&mut self, frame_time: f64) -> f64 {
        let mut frame_time = frame_time.max(0.0);
        if frame_time > MAX_FRAME_TIME {
            self.clamped_frames += 1;
            frame_time = MAX_FRAME_TIME;
        }
        self.timestamp_ms += frame_time * 1000.0;
        self.frame_count += 1;
        self.timestamp_ms
    }

    pub fn timestamp_ms(&self) -> f64 {
        self.timestamp_ms
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Frames whose duration exceeded [`MAX_FRAME_TIME`].
    pub fn clamped_frames(&self) -> u64 {
        self.clamped_frames
    }
}

/// Wall-clock driven frame loop.
///
/// Call [`tick`](Self::tick) once per displayed frame.
pub struct GameLoop {
    previous_time: Instant,
    scheduler: FrameScheduler,
}

impl GameLoop {
    /// Creates a new `GameLoop` starting from the current instant.
    pub fn new() -> Self {
        Self {
            previous_time: Instant::now(),
            scheduler: FrameScheduler::new(),
        }
    }

    /// Measure the elapsed time and call `frame_fn` with this frame's timestamp.
    pub fn tick(&mut self, mut frame_fn: impl FnMut(f64)) {
        let current_time = Instant::now();
        let frame_time = current_time
            .duration_since(self.previous_time)
            .as_secs_f64();
        self.previous_time = current_time;

        if frame_time > MAX_FRAME_TIME {
            warn!(
                "Frame time {:.1}ms exceeds maximum, clamping to {:.1}ms",
                frame_time * 1000.0,
                MAX_FRAME_TIME * 1000.0
            );
        }

        frame_fn(self.scheduler.advance(frame_time));
    }

    /// Returns the total number of frames run.
    pub fn frame_count(&self) -> u64 {
        self.scheduler.frame_count()
    }

    pub fn timestamp_ms(&self) -> f64 {
        self.scheduler.timestamp_ms()
    }
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new()
    }
}

/// Run `frames` frames at a steady `frame_rate`, calling `frame_fn` with each
/// frame's timestamp. No wall-clock time passes.
pub fn run_fixed(frames: u64, frame_rate: u32, mut frame_fn: impl FnMut(f64)) -> FrameScheduler {
    let frame_time = 1.0 / f64::from(frame_rate.max(1));
    let mut scheduler = FrameScheduler::new();
    for _ in 0..frames {
        frame_fn(scheduler.advance(frame_time));
    }
    scheduler
}

/// Run `frames` frames off the wall clock, sleeping so frames start no faster
/// than `frame_rate` per second. Stands in for the display's refresh callback.
pub fn run_realtime(frames: u64, frame_rate: u32, mut frame_fn: impl FnMut(f64)) -> FrameScheduler {
    let frame_interval = Duration::from_secs_f64(1.0 / f64::from(frame_rate.max(1)));
    let mut game_loop = GameLoop::new();
    let mut next_frame = Instant::now();
    for _ in 0..frames {
        next_frame += frame_interval;
        let now = Instant::now();
        if next_frame > now {
            std::thread::sleep(next_frame - now);
        } else {
            next_frame = now;
        }
        game_loop.tick(&mut frame_fn);
    }
    game_loop.scheduler
}
