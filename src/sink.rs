//! Event delivery seam.
//!
//! The consumer task hands every dequeued event, together with its swipe
//! classification when there is one, to an [`EventSink`]. Presentation and
//! storage concerns stop here; the pipeline core knows nothing about output
//! formats.

use crate::classify::SwipeDirection;
use crate::error::SinkError;
use crate::event::{TouchEvent, TouchKind};
use serde::Serialize;
use std::io::Write;

/// Accepts classified events from a pipeline's consumer task.
///
/// Called once per dequeued event, in dequeue order, from the consumer
/// thread only. `direction` is `Some` exactly when the event is a swipe.
pub trait EventSink: Send {
    fn deliver(
        &mut self,
        event: &TouchEvent,
        direction: Option<SwipeDirection>,
    ) -> Result<(), SinkError>;
}

/// Prints one human-readable line per event to stdout.
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl ConsoleSink {
    pub fn new() -> Self {
        ConsoleSink
    }
}

impl EventSink for ConsoleSink {
    fn deliver(
        &mut self,
        event: &TouchEvent,
        direction: Option<SwipeDirection>,
    ) -> Result<(), SinkError> {
        println!("{}", format_event(event, direction));
        Ok(())
    }
}

/// Renders the console line for an event.
///
/// Taps: `[Event: Tap] Position: (x, y), Timestamp: t`
/// Swipes: `[Event: Swipe] From: (x, y) To: (x2, y2), Direction: d, Timestamp: t`
pub fn format_event(event: &TouchEvent, direction: Option<SwipeDirection>) -> String {
    match event.kind {
        TouchKind::Tap => format!(
            "[Event: Tap] Position: ({}, {}), Timestamp: {}",
            event.origin.x, event.origin.y, event.timestamp_ms
        ),
        TouchKind::Swipe { to } => {
            let direction = direction
                .map(|d| d.to_string())
                .unwrap_or_else(|| "?".into());
            format!(
                "[Event: Swipe] From: ({}, {}) To: ({}, {}), Direction: {}, Timestamp: {}",
                event.origin.x, event.origin.y, to.x, to.y, direction, event.timestamp_ms
            )
        }
    }
}

/// Writes one JSON object per event, newline-delimited.
///
/// The record embeds the event and, for swipes, the derived direction, so a
/// downstream reader needs no classifier of its own.
pub struct JsonLinesSink<W: Write + Send> {
    out: W,
}

#[derive(Serialize)]
struct JsonRecord<'a> {
    #[serde(flatten)]
    event: &'a TouchEvent,
    #[serde(skip_serializing_if = "Option::is_none")]
    direction: Option<SwipeDirection>,
}

impl<W: Write + Send> JsonLinesSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Hand back the writer (e.g. to inspect a buffer in tests).
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> EventSink for JsonLinesSink<W> {
    fn deliver(
        &mut self,
        event: &TouchEvent,
        direction: Option<SwipeDirection>,
    ) -> Result<(), SinkError> {
        let line = serde_json::to_string(&JsonRecord { event, direction })?;
        self.out.write_all(line.as_bytes())?;
        self.out.write_all(b"\n")?;
        Ok(())
    }
}
