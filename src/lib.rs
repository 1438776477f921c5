//! TapStream — producer/consumer pipeline for touch input events.
//!
//! Provides a thread-safe FIFO [`EventQueue`] decoupling event producers
//! from consumers, a pure swipe-direction [`classifier`](classify), and a
//! [`Pipeline`] driver that wires a pluggable [`EventSource`] and
//! [`EventSink`] to one queue with a cooperative shutdown.
//!
//! ```no_run
//! use tapstream::{ConsoleSink, Pipeline, PipelineConfig, ScriptSource, TouchEvent};
//!
//! let script = ScriptSource::new([
//!     TouchEvent::tap(10, 20, tapstream::now_ms()),
//!     TouchEvent::swipe(0, 0, 40, 5, tapstream::now_ms()),
//! ]);
//!
//! let mut pipeline = Pipeline::new(PipelineConfig::default());
//! pipeline.start(script, ConsoleSink::new()).expect("start pipeline");
//! std::thread::sleep(std::time::Duration::from_secs(3));
//! pipeline.stop();
//! ```

pub mod classify;
pub mod config;
pub mod error;
pub mod event;
pub mod pipeline;
pub mod queue;
pub mod sink;
pub mod source;

pub use classify::*;
pub use config::*;
pub use error::*;
pub use event::*;
pub use pipeline::*;
pub use queue::*;
pub use sink::*;
pub use source::*;
