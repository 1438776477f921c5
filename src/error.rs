//! Error types for the queue, classifier, sinks, and configuration.

use crate::event::TouchKind;
use thiserror::Error;

/// Why an enqueue was refused.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EnqueueError {
    /// A bounded queue is at capacity and the caller chose not to block.
    ///
    /// Producer policy decides what happens next: retry, drop the event, or
    /// propagate.
    #[error("queue is full (capacity {0})")]
    Full(usize),

    /// The queue was closed; no further events are accepted.
    #[error("queue is closed")]
    Closed,
}

/// Why a dequeue returned without an event.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DequeueError {
    /// The bounded wait elapsed with the queue still empty.
    #[error("timed out waiting for an event")]
    TimedOut,

    /// The queue was closed; there are no more events.
    #[error("queue is closed")]
    Closed,
}

/// Attempted to derive a swipe direction from a non-swipe event.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClassifyError {
    #[error("cannot classify direction of a {0:?} event")]
    NotASwipe(TouchKind),
}

/// A sink failed to accept a delivered event.
///
/// Sink errors are reported to the consumer task and logged; they never
/// abort the producer or corrupt queue state.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("sink I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("sink serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

/// Configuration could not be loaded or is invalid.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// The pipeline was driven from a state that does not allow the call.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PipelineError {
    #[error("pipeline already started")]
    AlreadyStarted,

    #[error("failed to spawn {role} thread: {message}")]
    Spawn { role: &'static str, message: String },
}
