use geo::time::Time;

/// Metadata for one tick: which tick, and how long it lasts.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Frame {
    /// 0-based tick index.
    pub index: u64,
    /// Fixed delta time (seconds).
    pub dt_s: f64,
}

impl Frame {
    /// Scene time at the start of the tick. Derived from the index rather
    /// than accumulated, so long runs never drift and replays line up.
    pub fn time(&self) -> Time {
        Time(self.index as f64 * self.dt_s)
    }
}

/// Fixed-step clock driving the scene.
///
/// Hands out one [`Frame`] per tick. The step size is set once at
/// construction; everything downstream reads `dt_s` off the frame.
#[derive(Debug)]
pub struct Clock {
    dt_s: f64,
    next: u64,
}

impl Clock {
    pub fn new(dt_s: f64) -> Self {
        Self { dt_s, next: 0 }
    }

    pub fn dt_s(&self) -> f64 {
        self.dt_s
    }

    /// The frame the next `advance` will run.
    pub fn current(&self) -> Frame {
        Frame {
            index: self.next,
            dt_s: self.dt_s,
        }
    }

    /// Steps the clock, returning the frame that just ran.
    pub fn advance(&mut self) -> Frame {
        let frame = self.current();
        self.next += 1;
        frame
    }
}
