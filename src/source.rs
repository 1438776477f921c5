//! Event origination seam.
//!
//! Everything about *how* events come to exist — kinds, coordinates,
//! timestamps, randomness, device polling — lives behind [`EventSource`].
//! The queue and classifier never see any of it, so the core carries no
//! dependency on clocks or random number generators.

use crate::event::TouchEvent;
use std::collections::VecDeque;

/// Yields events to a pipeline's producer task.
pub trait EventSource: Send {
    /// The next event, or `None` when no event is available right now.
    ///
    /// "No event now" is not end-of-stream: the producer simply tries again
    /// after its pacing interval. Sources that run dry forever just keep
    /// returning `None`.
    fn next_event(&mut self) -> Option<TouchEvent>;
}

/// Any `Send` closure yielding optional events is a source.
impl<F> EventSource for F
where
    F: FnMut() -> Option<TouchEvent> + Send,
{
    fn next_event(&mut self) -> Option<TouchEvent> {
        self()
    }
}

/// Replays a fixed sequence of events, then yields nothing.
///
/// Handy for demos and tests where the interaction stream must be
/// deterministic.
#[derive(Debug, Default)]
pub struct ScriptSource {
    events: VecDeque<TouchEvent>,
}

impl ScriptSource {
    pub fn new(events: impl IntoIterator<Item = TouchEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }

    /// Events not yet handed out.
    pub fn remaining(&self) -> usize {
        self.events.len()
    }
}

impl EventSource for ScriptSource {
    fn next_event(&mut self) -> Option<TouchEvent> {
        self.events.pop_front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_source_replays_in_order_then_dries_up() {
        let mut source = ScriptSource::new([
            TouchEvent::tap(1, 1, 10),
            TouchEvent::swipe(0, 0, 4, 0, 20),
        ]);
        assert_eq!(source.remaining(), 2);
        assert_eq!(source.next_event().unwrap().timestamp_ms, 10);
        assert_eq!(source.next_event().unwrap().timestamp_ms, 20);
        assert_eq!(source.next_event(), None);
        assert_eq!(source.next_event(), None);
    }

    #[test]
    fn closures_are_sources() {
        let mut n = 0;
        let mut source = move || {
            n += 1;
            (n <= 2).then(|| TouchEvent::tap(n, n, n as u64))
        };
        assert!(EventSource::next_event(&mut source).is_some());
        assert!(EventSource::next_event(&mut source).is_some());
        assert!(EventSource::next_event(&mut source).is_none());
    }
}
