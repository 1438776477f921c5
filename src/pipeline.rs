//! Pipeline driver: one producer thread, one consumer thread, one queue.
//!
//! [`Pipeline`] owns the [`EventQueue`] and the two long-lived threads that
//! share it. The producer polls an [`EventSource`] at the configured pace
//! and enqueues whatever it yields; the consumer dequeues, classifies swipe
//! events, and forwards each `(event, direction)` pair to an [`EventSink`].
//! The queue is the only synchronization point between the two.
//!
//! Lifecycle runs `Created → Running → Stopping → Stopped`. Stop is
//! cooperative: both threads check a shared flag at every loop iteration,
//! and [`EventQueue::close`] wakes a consumer parked in dequeue so shutdown
//! never deadlocks. Events still buffered at stop are discarded.

use crate::config::PipelineConfig;
use crate::error::{DequeueError, EnqueueError, PipelineError};
use crate::queue::EventQueue;
use crate::sink::EventSink;
use crate::source::EventSource;
use log::{debug, info, warn};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Where a pipeline is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PipelineState {
    /// Queue exists, no threads started.
    Created,
    /// Producer and consumer threads are live.
    Running,
    /// Stop requested, threads winding down.
    Stopping,
    /// Terminal; both threads have exited.
    Stopped,
}

/// Owns the producer/consumer pair and their shared queue.
pub struct Pipeline {
    config: PipelineConfig,
    queue: Arc<EventQueue>,
    running: Arc<AtomicBool>,
    sink_errors: Arc<AtomicUsize>,
    producer: Option<JoinHandle<()>>,
    consumer: Option<JoinHandle<()>>,
    state: PipelineState,
}

impl Pipeline {
    /// Build the queue described by `config`; no threads yet.
    pub fn new(config: PipelineConfig) -> Self {
        let queue = Arc::new(config.build_queue());
        Self {
            config,
            queue,
            running: Arc::new(AtomicBool::new(false)),
            sink_errors: Arc::new(AtomicUsize::new(0)),
            producer: None,
            consumer: None,
            state: PipelineState::Created,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// The shared queue.
    ///
    /// Extra producers beyond the driver's own may enqueue through this
    /// handle; the queue contract covers any number of them.
    pub fn handle(&self) -> Arc<EventQueue> {
        Arc::clone(&self.queue)
    }

    /// How many deliveries the sink has rejected so far.
    ///
    /// Each failure is also logged; the count survives [`stop`](Self::stop)
    /// for post-run inspection.
    pub fn sink_errors(&self) -> usize {
        self.sink_errors.load(Ordering::SeqCst)
    }

    /// Spawn the producer and consumer threads.
    ///
    /// Fails with [`PipelineError::AlreadyStarted`] unless the pipeline is
    /// still in [`Created`](PipelineState::Created).
    pub fn start(
        &mut self,
        source: impl EventSource + 'static,
        sink: impl EventSink + 'static,
    ) -> Result<(), PipelineError> {
        if self.state != PipelineState::Created {
            return Err(PipelineError::AlreadyStarted);
        }

        self.running.store(true, Ordering::SeqCst);

        let producer = {
            let queue = Arc::clone(&self.queue);
            let running = Arc::clone(&self.running);
            let interval = self.config.source_interval();
            thread::Builder::new()
                .name("tapstream-producer".into())
                .spawn(move || producer_loop(queue, running, source, interval))
                .map_err(|e| spawn_error("producer", e))?
        };

        let consumer = {
            let queue = Arc::clone(&self.queue);
            let running = Arc::clone(&self.running);
            let sink_errors = Arc::clone(&self.sink_errors);
            let poll = self.config.poll_interval();
            match thread::Builder::new()
                .name("tapstream-consumer".into())
                .spawn(move || consumer_loop(queue, running, sink, poll, sink_errors))
            {
                Ok(handle) => handle,
                Err(e) => {
                    // Unwind the half-started pipeline before reporting.
                    self.running.store(false, Ordering::SeqCst);
                    self.queue.close();
                    let _ = producer.join();
                    self.state = PipelineState::Stopped;
                    return Err(spawn_error("consumer", e));
                }
            }
        };

        self.producer = Some(producer);
        self.consumer = Some(consumer);
        self.state = PipelineState::Running;
        info!(
            "pipeline running (capacity: {:?}, source interval: {:?}, poll interval: {:?})",
            self.queue.capacity(),
            self.config.source_interval(),
            self.config.poll_interval()
        );
        Ok(())
    }

    /// Request stop, discard buffered events, and join both threads.
    ///
    /// Safe to call from any state and more than once. A consumer parked in
    /// dequeue is woken by closing the queue, so this never hangs on an
    /// empty pipeline.
    pub fn stop(&mut self) {
        match self.state {
            PipelineState::Running => {}
            PipelineState::Created => {
                self.queue.close();
                self.state = PipelineState::Stopped;
                return;
            }
            PipelineState::Stopping | PipelineState::Stopped => return,
        }

        self.state = PipelineState::Stopping;
        debug!("pipeline stopping");
        self.running.store(false, Ordering::SeqCst);
        self.queue.close();

        if let Some(handle) = self.producer.take() {
            if handle.join().is_err() {
                warn!("producer thread panicked before join");
            }
        }
        if let Some(handle) = self.consumer.take() {
            if handle.join().is_err() {
                warn!("consumer thread panicked before join");
            }
        }

        self.state = PipelineState::Stopped;
        info!("pipeline stopped");
    }
}

impl Drop for Pipeline {
    fn drop(&mut self) {
        self.stop();
    }
}

fn spawn_error(role: &'static str, e: std::io::Error) -> PipelineError {
    PipelineError::Spawn {
        role,
        message: e.to_string(),
    }
}

fn producer_loop(
    queue: Arc<EventQueue>,
    running: Arc<AtomicBool>,
    mut source: impl EventSource,
    interval: Duration,
) {
    while running.load(Ordering::SeqCst) {
        if let Some(event) = source.next_event() {
            match queue.enqueue(event) {
                Ok(()) => {}
                Err(EnqueueError::Closed) => break,
                Err(EnqueueError::Full(cap)) => {
                    // Blocking enqueue does not report Full; if it ever did,
                    // dropping live input is the documented policy.
                    warn!("dropping event, queue full at capacity {cap}");
                }
            }
        }
        if !interval.is_zero() {
            thread::sleep(interval);
        }
    }
    debug!("producer exiting");
}

fn consumer_loop(
    queue: Arc<EventQueue>,
    running: Arc<AtomicBool>,
    mut sink: impl EventSink,
    poll: Duration,
    sink_errors: Arc<AtomicUsize>,
) {
    loop {
        match queue.dequeue_timeout(poll) {
            Ok(event) => {
                // Classify before delivery; a dequeued event is always
                // forwarded, never dropped mid-shutdown.
                let direction = if event.is_swipe() {
                    event.direction().ok()
                } else {
                    None
                };
                if let Err(e) = sink.deliver(&event, direction) {
                    sink_errors.fetch_add(1, Ordering::SeqCst);
                    warn!("sink rejected event at {}: {e}", event.timestamp_ms);
                }
            }
            Err(DequeueError::TimedOut) => {
                if !running.load(Ordering::SeqCst) {
                    break;
                }
            }
            Err(DequeueError::Closed) => break,
        }
    }
    debug!("consumer exiting");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::TouchEvent;
    use crate::sink::EventSink;
    use crate::source::ScriptSource;

    struct NullSink;

    impl EventSink for NullSink {
        fn deliver(
            &mut self,
            _event: &TouchEvent,
            _direction: Option<crate::classify::SwipeDirection>,
        ) -> Result<(), crate::error::SinkError> {
            Ok(())
        }
    }

    fn fast_config() -> PipelineConfig {
        PipelineConfig {
            capacity: None,
            source_interval_ms: 1,
            poll_interval_ms: 5,
        }
    }

    #[test]
    fn lifecycle_states() {
        let mut pipeline = Pipeline::new(fast_config());
        assert_eq!(pipeline.state(), PipelineState::Created);

        pipeline
            .start(ScriptSource::default(), NullSink)
            .expect("start");
        assert_eq!(pipeline.state(), PipelineState::Running);

        pipeline.stop();
        assert_eq!(pipeline.state(), PipelineState::Stopped);

        // Stop is idempotent on a stopped pipeline.
        pipeline.stop();
        assert_eq!(pipeline.state(), PipelineState::Stopped);
    }

    #[test]
    fn second_start_is_rejected() {
        let mut pipeline = Pipeline::new(fast_config());
        pipeline
            .start(ScriptSource::default(), NullSink)
            .expect("start");
        assert_eq!(
            pipeline.start(ScriptSource::default(), NullSink),
            Err(PipelineError::AlreadyStarted)
        );
        pipeline.stop();
        assert_eq!(
            pipeline.start(ScriptSource::default(), NullSink),
            Err(PipelineError::AlreadyStarted)
        );
    }

    #[test]
    fn stop_before_start_closes_the_queue() {
        let mut pipeline = Pipeline::new(fast_config());
        let queue = pipeline.handle();
        pipeline.stop();
        assert_eq!(pipeline.state(), PipelineState::Stopped);
        assert!(queue.is_closed());
    }
}
