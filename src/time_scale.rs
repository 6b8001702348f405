//! Global time multiplier. Every time-aware motion update multiplies by it;
//! only the active boss's update may change it.

/// Continuous multiplier in `[0.0, 1.0]`. `0.0` is a full stop.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeScale(f32);

impl TimeScale {
    pub const NORMAL: TimeScale = TimeScale(1.0);
    pub const STOPPED: TimeScale = TimeScale(0.0);

    /// Non-finite input is treated as normal speed.
    pub fn new(value: f32) -> Self {
        if value.is_finite() {
            TimeScale(value.clamp(0.0, 1.0))
        } else {
            TimeScale::NORMAL
        }
    }

    pub fn get(self) -> f32 {
        self.0
    }

    pub fn is_frozen(self) -> bool {
        self.0 <= 0.0
    }
}

impl Default for TimeScale {
    fn default() -> Self {
        TimeScale::NORMAL
    }
}
