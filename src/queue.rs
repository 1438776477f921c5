//! Thread-safe FIFO queue handing events from producers to consumers.
//!
//! [`EventQueue`] is the single synchronization point of a pipeline: any
//! number of producer threads [`enqueue`](EventQueue::enqueue) while any
//! number of consumer threads [`dequeue`](EventQueue::dequeue). Consumers
//! wait rather than fail when the queue is empty; the internal sequence and
//! lock are never exposed, so unsynchronized access cannot creep in from the
//! outside.
//!
//! # Ordering
//! Delivery is exactly-once per enqueued event. Events whose enqueues are
//! not concurrent come out in enqueue order; concurrent enqueues from
//! independent producers may interleave either way, but a single producer's
//! events never reorder relative to each other.
//!
//! # Shutdown
//! [`close`](EventQueue::close) discards anything unconsumed and wakes every
//! blocked producer and consumer. Events model live input, not a durable
//! log, so the discard is deliberate: a stopping pipeline must not wait out
//! its backlog.

use crate::error::{DequeueError, EnqueueError};
use crate::event::TouchEvent;
use std::collections::VecDeque;
use std::sync::{Condvar, Mutex};
use std::time::{Duration, Instant};

struct Inner {
    events: VecDeque<TouchEvent>,
    closed: bool,
}

/// FIFO buffer with blocking dequeue and optional capacity bound.
pub struct EventQueue {
    inner: Mutex<Inner>,
    not_empty: Condvar,
    not_full: Condvar,
    capacity: Option<usize>,
}

impl EventQueue {
    /// A queue with no capacity bound; `enqueue` never blocks.
    pub fn unbounded() -> Self {
        Self::build(None)
    }

    /// A queue holding at most `capacity` events; `enqueue` blocks on full.
    ///
    /// A zero capacity could never hold an event, so it is clamped to 1.
    pub fn bounded(capacity: usize) -> Self {
        Self::build(Some(capacity.max(1)))
    }

    fn build(capacity: Option<usize>) -> Self {
        Self {
            inner: Mutex::new(Inner {
                events: VecDeque::new(),
                closed: false,
            }),
            not_empty: Condvar::new(),
            not_full: Condvar::new(),
            capacity,
        }
    }

    /// The capacity bound, if any.
    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    /// Append `event` to the tail, waking a waiting consumer.
    ///
    /// Unbounded queues accept immediately. Bounded queues block until a
    /// slot frees up. Fails with [`EnqueueError::Closed`] if the queue is
    /// closed before or while waiting.
    pub fn enqueue(&self, event: TouchEvent) -> Result<(), EnqueueError> {
        let mut inner = self.lock();
        loop {
            if inner.closed {
                return Err(EnqueueError::Closed);
            }
            match self.capacity {
                Some(cap) if inner.events.len() >= cap => {
                    inner = self
                        .not_full
                        .wait(inner)
                        .expect("event queue lock poisoned");
                }
                _ => break,
            }
        }
        inner.events.push_back(event);
        drop(inner);
        self.not_empty.notify_one();
        Ok(())
    }

    /// Append `event` without blocking.
    ///
    /// Fails with [`EnqueueError::Full`] when a bounded queue is at
    /// capacity; what to do then (retry, drop, propagate) is the producer's
    /// policy, not the queue's.
    pub fn try_enqueue(&self, event: TouchEvent) -> Result<(), EnqueueError> {
        let mut inner = self.lock();
        if inner.closed {
            return Err(EnqueueError::Closed);
        }
        if let Some(cap) = self.capacity {
            if inner.events.len() >= cap {
                return Err(EnqueueError::Full(cap));
            }
        }
        inner.events.push_back(event);
        drop(inner);
        self.not_empty.notify_one();
        Ok(())
    }

    /// Remove and return the head, blocking while the queue is empty.
    ///
    /// Never returns a default or placeholder value: the only non-event
    /// outcome is [`DequeueError::Closed`] after [`close`](Self::close).
    /// Emptiness is re-checked after every wake, so spurious wakeups are
    /// absorbed here and never surfaced.
    pub fn dequeue(&self) -> Result<TouchEvent, DequeueError> {
        let mut inner = self.lock();
        loop {
            if let Some(event) = inner.events.pop_front() {
                drop(inner);
                self.not_full.notify_one();
                return Ok(event);
            }
            if inner.closed {
                return Err(DequeueError::Closed);
            }
            inner = self
                .not_empty
                .wait(inner)
                .expect("event queue lock poisoned");
        }
    }

    /// Like [`dequeue`](Self::dequeue), but gives up with
    /// [`DequeueError::TimedOut`] once `timeout` has elapsed.
    ///
    /// This is the consumer's shutdown-observation tick: a bounded wait lets
    /// the caller re-check its stop condition even if no event and no close
    /// ever arrive.
    pub fn dequeue_timeout(&self, timeout: Duration) -> Result<TouchEvent, DequeueError> {
        let deadline = Instant::now() + timeout;
        let mut inner = self.lock();
        loop {
            if let Some(event) = inner.events.pop_front() {
                drop(inner);
                self.not_full.notify_one();
                return Ok(event);
            }
            if inner.closed {
                return Err(DequeueError::Closed);
            }
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Err(DequeueError::TimedOut);
            }
            let (guard, _) = self
                .not_empty
                .wait_timeout(inner, remaining)
                .expect("event queue lock poisoned");
            inner = guard;
        }
    }

    /// Instantaneous number of buffered events.
    ///
    /// Possibly stale the moment it returns; diagnostic only, never a basis
    /// for control decisions.
    pub fn len(&self) -> usize {
        self.lock().events.len()
    }

    /// Whether the queue currently holds no events (same staleness caveat
    /// as [`len`](Self::len)).
    pub fn is_empty(&self) -> bool {
        self.lock().events.is_empty()
    }

    /// Close the queue: discard unconsumed events and wake all waiters.
    ///
    /// After close, `enqueue` fails with [`EnqueueError::Closed`] and
    /// `dequeue` fails with [`DequeueError::Closed`]. Idempotent.
    pub fn close(&self) {
        let mut inner = self.lock();
        if inner.closed {
            return;
        }
        inner.closed = true;
        inner.events.clear();
        drop(inner);
        self.not_empty.notify_all();
        self.not_full.notify_all();
    }

    /// Whether [`close`](Self::close) has been called.
    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }

    // A panic while holding the queue lock leaves nothing worth resuming;
    // treat poisoning as fatal.
    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().expect("event queue lock poisoned")
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::unbounded()
    }
}

impl std::fmt::Debug for EventQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.lock();
        f.debug_struct("EventQueue")
            .field("len", &inner.events.len())
            .field("capacity", &self.capacity)
            .field("closed", &inner.closed)
            .finish()
    }
}
