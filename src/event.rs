//! Touch events and coordinates.
//!
//! TapStream represents user interactions as small, immutable records
//! ([`TouchEvent`]) tagged with the interaction kind ([`TouchKind`]) and a
//! creation timestamp.
//!
//! ## Conventions
//! - **Coordinates:** integer screen-space positions; the crate assigns no
//!   unit or orientation beyond "y grows downward" (which is what makes a
//!   positive `dy` a [`Down`](crate::classify::SwipeDirection::Down) swipe).
//! - **Timestamps:** integer milliseconds since the Unix epoch, assigned by
//!   whoever *creates* the event (see [`now_ms`]), never by the queue.
//!   Events from concurrent producers carry independently sampled clocks, so
//!   timestamps are not guaranteed monotonic across producers.
//! - **Destination:** only swipes have one. It lives on the
//!   [`TouchKind::Swipe`] variant rather than as sentinel coordinates, so a
//!   tap cannot carry a stale destination by construction. A swipe whose
//!   destination equals its origin is a valid zero-length swipe, not an
//!   error.

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// An integer screen-space coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Kind of user interaction.
///
/// The swipe destination is variant payload; taps have no destination at all.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TouchKind {
    /// A single touch at the event's origin.
    Tap,
    /// A drag from the event's origin to `to`.
    Swipe { to: Point },
}

/// Timestamped record of one user interaction.
///
/// Immutable once constructed: there is no mutating API, and every field is
/// plain data, so sharing an event across threads never requires a lock.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TouchEvent {
    /// What happened.
    pub kind: TouchKind,
    /// Where the interaction started (taps: the only coordinate).
    pub origin: Point,
    /// Creation time, milliseconds since the Unix epoch.
    pub timestamp_ms: u64,
}

impl TouchEvent {
    /// A tap at `(x, y)`.
    pub fn tap(x: i32, y: i32, timestamp_ms: u64) -> Self {
        Self {
            kind: TouchKind::Tap,
            origin: Point::new(x, y),
            timestamp_ms,
        }
    }

    /// A swipe from `(x, y)` to `(x2, y2)`.
    pub fn swipe(x: i32, y: i32, x2: i32, y2: i32, timestamp_ms: u64) -> Self {
        Self {
            kind: TouchKind::Swipe {
                to: Point::new(x2, y2),
            },
            origin: Point::new(x, y),
            timestamp_ms,
        }
    }

    /// The swipe destination, if this event is a swipe.
    pub fn destination(&self) -> Option<Point> {
        match self.kind {
            TouchKind::Tap => None,
            TouchKind::Swipe { to } => Some(to),
        }
    }

    /// Whether this event is a swipe.
    pub fn is_swipe(&self) -> bool {
        matches!(self.kind, TouchKind::Swipe { .. })
    }
}

/// Milliseconds since the Unix epoch, for producers stamping new events.
///
/// A clock before the epoch collapses to 0 rather than panicking.
pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tap_has_no_destination() {
        let ev = TouchEvent::tap(3, 7, 1000);
        assert_eq!(ev.kind, TouchKind::Tap);
        assert_eq!(ev.origin, Point::new(3, 7));
        assert_eq!(ev.destination(), None);
        assert!(!ev.is_swipe());
    }

    #[test]
    fn swipe_carries_destination() {
        let ev = TouchEvent::swipe(0, 0, 10, 2, 1000);
        assert_eq!(ev.destination(), Some(Point::new(10, 2)));
        assert!(ev.is_swipe());
    }

    #[test]
    fn zero_length_swipe_is_still_a_swipe() {
        let ev = TouchEvent::swipe(5, 5, 5, 5, 0);
        assert!(ev.is_swipe());
        assert_eq!(ev.destination(), Some(ev.origin));
    }

    #[test]
    fn serde_roundtrip() {
        let ev = TouchEvent::swipe(1, 2, 3, 4, 42);
        let json = serde_json::to_string(&ev).unwrap();
        let back: TouchEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ev);
    }
}
