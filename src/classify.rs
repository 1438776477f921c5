//! Swipe direction classification.
//!
//! Pure geometry: the dominant delta axis picks the direction. No state, no
//! side effects, same answer for the same coordinates every time.

use crate::error::ClassifyError;
use crate::event::{Point, TouchEvent, TouchKind};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The four cardinal swipe directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SwipeDirection {
    Up,
    Down,
    Left,
    Right,
}

impl fmt::Display for SwipeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SwipeDirection::Up => "Up",
            SwipeDirection::Down => "Down",
            SwipeDirection::Left => "Left",
            SwipeDirection::Right => "Right",
        };
        f.write_str(s)
    }
}

/// Classify a swipe by its dominant delta axis.
///
/// `|dx| > |dy|` reads as horizontal (Right when `dx > 0`, else Left);
/// anything else reads as vertical (Down when `dy > 0`, else Up).
///
/// Equal magnitudes — including a zero-length swipe — fall through to the
/// vertical branch, so a perfect diagonal classifies as Up or Down and
/// (0,0)→(0,0) classifies as Up. That tie-break looks like an accident of
/// branch ordering, but callers may depend on it, so it stays.
///
/// Deltas are widened to `i64` before subtracting: coordinates carry no
/// range bound, and an `i32` delta overflows for spans wider than the type
/// (so would `abs()` on `i32::MIN`).
pub fn classify_direction(origin: Point, destination: Point) -> SwipeDirection {
    let dx = i64::from(destination.x) - i64::from(origin.x);
    let dy = i64::from(destination.y) - i64::from(origin.y);

    if dx.abs() > dy.abs() {
        if dx > 0 {
            SwipeDirection::Right
        } else {
            SwipeDirection::Left
        }
    } else if dy > 0 {
        SwipeDirection::Down
    } else {
        SwipeDirection::Up
    }
}

impl TouchEvent {
    /// The swipe direction of this event.
    ///
    /// Taps have no direction; asking for one is a contract violation and is
    /// rejected rather than silently defaulted.
    pub fn direction(&self) -> Result<SwipeDirection, ClassifyError> {
        match self.kind {
            TouchKind::Swipe { to } => Ok(classify_direction(self.origin, to)),
            TouchKind::Tap => Err(ClassifyError::NotASwipe(self.kind)),
        }
    }
}
