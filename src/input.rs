//! Touch input and swipe recognition
//!
//! Screen coordinates grow right and down, the same way grid cells do, so a
//! downward swipe maps straight to `Direction::Down`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::SWIPE_THRESHOLD_PX;
use crate::sim::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TouchPhase {
    Start,
    Move,
    End,
}

/// One raw touch event from the platform
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchEvent {
    pub phase: TouchPhase,
    /// Screen position of the changed touch (px)
    pub position: Vec2,
    /// Fingers still on the screen after this event
    pub touches: usize,
}

impl TouchEvent {
    pub fn start(x: f32, y: f32, touches: usize) -> Self {
        Self {
            phase: TouchPhase::Start,
            position: Vec2::new(x, y),
            touches,
        }
    }

    pub fn moved(x: f32, y: f32, touches: usize) -> Self {
        Self {
            phase: TouchPhase::Move,
            position: Vec2::new(x, y),
            touches,
        }
    }

    pub fn end(x: f32, y: f32, touches: usize) -> Self {
        Self {
            phase: TouchPhase::End,
            position: Vec2::new(x, y),
            touches,
        }
    }
}

/// Dominant-axis swipe classification. Displacements that don't clear
/// `threshold` on their dominant axis, or have no dominant axis, are ignored.
pub fn swipe_direction(delta: Vec2, threshold: f32) -> Option<Direction> {
    let (ax, ay) = (delta.x.abs(), delta.y.abs());
    if ax > ay && ax > threshold {
        Some(if delta.x > 0.0 {
            Direction::Right
        } else {
            Direction::Left
        })
    } else if ay > ax && ay > threshold {
        Some(if delta.y > 0.0 {
            Direction::Down
        } else {
            Direction::Up
        })
    } else {
        None
    }
}

/// Tracks a gesture from the first finger down to the last finger up
#[derive(Debug, Clone, PartialEq)]
pub struct SwipeTracker {
    origin: Option<Vec2>,
    threshold: f32,
}

impl Default for SwipeTracker {
    fn default() -> Self {
        Self::new(SWIPE_THRESHOLD_PX)
    }
}

impl SwipeTracker {
    pub fn new(threshold: f32) -> Self {
        Self {
            origin: None,
            threshold,
        }
    }

    /// Feed an event; returns a direction when a completed gesture was a swipe
    pub fn handle(&mut self, event: &TouchEvent) -> Option<Direction> {
        match event.phase {
            TouchPhase::Start => {
                if self.origin.is_none() {
                    self.origin = Some(event.position);
                }
                None
            }
            TouchPhase::Move => None,
            TouchPhase::End => {
                if event.touches > 0 {
                    return None;
                }
                let origin = self.origin.take()?;
                swipe_direction(event.position - origin, self.threshold)
            }
        }
    }

    /// Forget any gesture in progress
    pub fn reset(&mut self) {
        self.origin = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dominant_axis() {
        assert_eq!(swipe_direction(Vec2::new(40.0, 5.0), 10.0), Some(Direction::Right));
        assert_eq!(swipe_direction(Vec2::new(-40.0, 39.0), 10.0), Some(Direction::Left));
        assert_eq!(swipe_direction(Vec2::new(3.0, 25.0), 10.0), Some(Direction::Down));
        assert_eq!(swipe_direction(Vec2::new(3.0, -25.0), 10.0), Some(Direction::Up));
    }

    #[test]
    fn test_below_threshold_or_diagonal() {
        assert_eq!(swipe_direction(Vec2::new(9.0, 0.0), 10.0), None);
        assert_eq!(swipe_direction(Vec2::new(10.0, 0.0), 10.0), None);
        assert_eq!(swipe_direction(Vec2::new(30.0, 30.0), 10.0), None);
    }

    #[test]
    fn test_gesture_completes_on_last_finger_up() {
        let mut tracker = SwipeTracker::default();
        assert_eq!(tracker.handle(&TouchEvent::start(100.0, 100.0, 1)), None);
        assert_eq!(tracker.handle(&TouchEvent::moved(120.0, 100.0, 1)), None);
        assert_eq!(tracker.handle(&TouchEvent::start(300.0, 300.0, 2)), None);
        // One finger still down
        assert_eq!(tracker.handle(&TouchEvent::end(300.0, 300.0, 1)), None);
        assert_eq!(
            tracker.handle(&TouchEvent::end(100.0, 160.0, 0)),
            Some(Direction::Down)
        );
        // Gesture consumed
        assert_eq!(tracker.handle(&TouchEvent::end(0.0, 0.0, 0)), None);
    }
}
