//! Tick rate control from configured speed and touch pressure
//!
//! Holding one finger down speeds the game up, holding two or more slows it
//! down. Either only applies once contact has lasted past the sustain
//! threshold, tracked by a debounce timer on a caller-supplied clock.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Configured base speed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SpeedLevel {
    Slow,
    #[default]
    Normal,
    Fast,
}

impl SpeedLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpeedLevel::Slow => "slow",
            SpeedLevel::Normal => "normal",
            SpeedLevel::Fast => "fast",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "slow" => Some(SpeedLevel::Slow),
            "normal" | "medium" => Some(SpeedLevel::Normal),
            "fast" => Some(SpeedLevel::Fast),
            _ => None,
        }
    }

    /// Base tick interval in milliseconds (slower level = longer interval)
    pub fn base_interval_ms(&self) -> u64 {
        match self {
            SpeedLevel::Slow => SLOW_INTERVAL_MS,
            SpeedLevel::Normal => NORMAL_INTERVAL_MS,
            SpeedLevel::Fast => FAST_INTERVAL_MS,
        }
    }
}

/// One-shot timer on an external millisecond clock
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DebounceTimer {
    deadline: Option<u64>,
}

impl DebounceTimer {
    /// Arm (or re-arm) the timer to fire `delay_ms` after `now`
    pub fn start(&mut self, now: u64, delay_ms: u64) {
        self.deadline = Some(now.saturating_add(delay_ms));
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn deadline(&self) -> Option<u64> {
        self.deadline
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Returns true exactly once, the first time `now` reaches the deadline
    pub fn poll(&mut self, now: u64) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// Input-derived pressure state. Not persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TouchPressure {
    active_touches: usize,
    sustained: bool,
    timer: DebounceTimer,
}

impl TouchPressure {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_touches(&self) -> usize {
        self.active_touches
    }

    /// Contact has lasted past the sustain threshold
    pub fn sustained(&self) -> bool {
        self.sustained
    }

    pub fn timer(&self) -> &DebounceTimer {
        &self.timer
    }

    /// Update the touch count. The sustain timer restarts on 0 -> N and is
    /// cancelled on N -> 0; changes between nonzero counts leave it alone.
    pub fn set_touch_count(&mut self, count: usize, now: u64) {
        let was_touching = self.active_touches > 0;
        self.active_touches = count;
        match (was_touching, count > 0) {
            (false, true) => {
                self.sustained = false;
                self.timer.start(now, SUSTAIN_THRESHOLD_MS);
            }
            (true, false) => {
                self.sustained = false;
                self.timer.cancel();
            }
            _ => {}
        }
    }

    /// Fire the sustain timer if due. Returns true when the flag flipped.
    pub fn poll(&mut self, now: u64) -> bool {
        if self.timer.poll(now) {
            self.sustained = true;
            return true;
        }
        false
    }

    /// Drop all contact and cancel the timer
    pub fn release(&mut self) {
        self.active_touches = 0;
        self.sustained = false;
        self.timer.cancel();
    }
}

/// Derives the active tick interval from the base interval and touch pressure
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedController {
    base_ms: u64,
    one_touch_multiplier: f32,
    multi_touch_multiplier: f32,
}

impl SpeedController {
    pub fn new(base_ms: u64) -> Self {
        Self::with_multipliers(base_ms, ONE_TOUCH_MULTIPLIER, MULTI_TOUCH_MULTIPLIER)
    }

    pub fn with_multipliers(base_ms: u64, one_touch: f32, multi_touch: f32) -> Self {
        Self {
            base_ms,
            one_touch_multiplier: one_touch,
            multi_touch_multiplier: multi_touch,
        }
    }

    pub fn from_level(level: SpeedLevel) -> Self {
        Self::new(level.base_interval_ms())
    }

    pub fn base_ms(&self) -> u64 {
        self.base_ms
    }

    /// Interval for the given pressure state
    pub fn active_interval(&self, pressure: &TouchPressure) -> u64 {
        active_interval(
            self.base_ms,
            pressure.active_touches(),
            pressure.sustained(),
            self.one_touch_multiplier,
            self.multi_touch_multiplier,
        )
    }
}

/// Pure interval rule: no modifier until contact is sustained, then one touch
/// scales by `one_touch` and two or more by `multi_touch`
pub fn active_interval(
    base_ms: u64,
    touches: usize,
    sustained: bool,
    one_touch: f32,
    multi_touch: f32,
) -> u64 {
    let multiplier = match (touches, sustained) {
        (0, _) | (_, false) => return base_ms,
        (1, true) => one_touch,
        (_, true) => multi_touch,
    };
    ((base_ms as f32 * multiplier).round() as u64).max(1)
}
