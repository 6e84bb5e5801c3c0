use std::time::Instant;

/// Frame metadata - carries frame number and timing info
#[derive(Debug, Clone, Copy)]
pub struct FrameInfo {
    pub number: u64,
    /// Milliseconds since the loop was started
    pub time_ms: f64,
    /// Seconds since the previous frame
    pub delta: f32,
}

impl FrameInfo {
    pub fn new(number: u64, time_ms: f64, delta: f32) -> Self {
        Self { number, time_ms, delta }
    }
}

/// Continuously re-invoked frame source
///
/// Yields a [`FrameInfo`] per call while running and `None` once stopped.
/// Use it in a loop: `while let Some(frame) = animation.next_frame() { ... }`
#[derive(Debug)]
pub struct AnimationLoop {
    running: bool,
    frame_number: u64,
    start_time: Instant,
    last_frame_time: Instant,
}

impl AnimationLoop {
    /// Create a stopped loop
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            running: false,
            frame_number: 0,
            start_time: now,
            last_frame_time: now,
        }
    }

    /// Start (or restart) the loop; time counts from here
    pub fn start(&mut self) {
        let now = Instant::now();
        self.running = true;
        self.frame_number = 0;
        self.start_time = now;
        self.last_frame_time = now;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn frame_number(&self) -> u64 {
        self.frame_number
    }

    pub fn next_frame(&mut self) -> Option<FrameInfo> {
        if !self.running {
            return None;
        }

        let now = Instant::now();
        let delta = now.duration_since(self.last_frame_time).as_secs_f32();
        let time_ms = now.duration_since(self.start_time).as_secs_f64() * 1000.0;

        let info = FrameInfo::new(self.frame_number, time_ms, delta);

        self.frame_number += 1;
        self.last_frame_time = now;

        Some(info)
    }
}

impl Default for AnimationLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for AnimationLoop {
    type Item = FrameInfo;

    fn next(&mut self) -> Option<FrameInfo> {
        self.next_frame()
    }
}
