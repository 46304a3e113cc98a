/// Engine time in seconds since mount.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Time(pub f64);

impl Time {
    /// Time `secs` seconds after `self`; used to stamp choreography deadlines.
    pub fn offset(self, secs: f64) -> Time {
        Time(self.0 + secs)
    }
}

/// One step of the page's cooperative loop.
///
/// The picker is single-threaded: camera motion, visual pops, and fades all
/// advance on `tick(Frame)` calls, so a test can replay the exact timing of
/// any choreography by stepping frames. Time is derived from the index
/// rather than accumulated, so a frame's timestamp never depends on how
/// many additions led up to it.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Frame {
    /// Counts up from zero at mount.
    pub index: u64,
    /// Frame duration in seconds, constant for the life of the loop.
    pub dt_s: f64,
    /// Engine time when the frame begins.
    pub time: Time,
}

impl Frame {
    pub fn new(index: u64, dt_s: f64) -> Self {
        Self {
            index,
            dt_s,
            time: Time(index as f64 * dt_s),
        }
    }

    /// The frame that follows this one at the same rate.
    pub fn next(self) -> Self {
        Self::new(self.index + 1, self.dt_s)
    }
}
