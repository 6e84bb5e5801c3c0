/// Self-contained timers - accumulate delta time and decide when to fire

/// Fixed rate timer - fires at specific Hz
#[derive(Debug, Clone, Copy)]
pub struct FixedHz {
    pub interval: f32,
    pub accumulator: f32,
}

impl FixedHz {
    /// Create timer that fires at given frequency
    pub fn new(hz: f32) -> Self {
        Self {
            interval: 1.0 / hz,
            accumulator: 0.0,
        }
    }

    /// Update with delta, returns true if should fire
    pub fn tick(&mut self, delta: f32) -> bool {
        self.accumulator += delta;

        if self.accumulator >= self.interval {
            self.accumulator -= self.interval;
            true
        } else {
            false
        }
    }
}

/// Frames-per-second meter reporting once per window
#[derive(Debug, Clone, Copy)]
pub struct FpsCounter {
    window: FixedHz,
    frames: u32,
    elapsed: f32,
}

impl FpsCounter {
    /// Report every `interval` seconds
    pub fn new(interval: f32) -> Self {
        Self {
            window: FixedHz::new(1.0 / interval),
            frames: 0,
            elapsed: 0.0,
        }
    }

    /// Count a frame; returns the average rate when a window completes
    pub fn frame(&mut self, delta: f32) -> Option<f32> {
        self.frames += 1;
        self.elapsed += delta;

        if !self.window.tick(delta) {
            return None;
        }

        let fps = self.frames as f32 / self.elapsed;
        self.frames = 0;
        self.elapsed = 0.0;
        Some(fps)
    }
}
