use std::time::Instant;

/// Source of monotonically increasing elapsed seconds, starting at zero.
pub trait Clock {
    fn elapsed(&self) -> f32;
}

/// Wall clock started when constructed.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::start()
    }
}

impl Clock for SystemClock {
    fn elapsed(&self) -> f32 {
        self.start.elapsed().as_secs_f32()
    }
}

/// Clock advanced by hand. Used by tests and the headless driver.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ManualClock {
    now: f32,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Jump to `t`. Times earlier than the current reading are ignored.
    pub fn set(&mut self, t: f32) {
        if t > self.now {
            self.now = t;
        }
    }

    pub fn advance_by(&mut self, dt: f32) {
        if dt > 0.0 {
            self.now += dt;
        }
    }
}

impl Clock for ManualClock {
    fn elapsed(&self) -> f32 {
        self.now
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn elapsed(&self) -> f32 {
        (**self).elapsed()
    }
}
