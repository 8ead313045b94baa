//! Bounded FIFO of events logged before the context is started
//!
//! When the buffer is full the oldest tenth of its content (at least one
//! event) is evicted in a single batch and counted, so the loss can be
//! reported once the context starts.

use super::log_event::LogEvent;
use std::collections::VecDeque;

/// Capacity used when the configuration does not set `maxPendingEvents`
pub const DEFAULT_MAX_PENDING_EVENTS: usize = 1000;

/// An event waiting for the context to start, with its originating logger
#[derive(Debug)]
pub struct PendingEvent {
    pub logger: String,
    pub event: LogEvent,
}

#[derive(Debug)]
pub struct PendingBuffer {
    events: VecDeque<PendingEvent>,
    capacity: usize,
    discarded: u64,
}

impl PendingBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            events: VecDeque::new(),
            capacity,
            discarded: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Change the capacity, evicting the oldest events that no longer fit
    pub fn set_capacity(&mut self, capacity: usize) -> usize {
        self.capacity = capacity;
        let excess = self.events.len().saturating_sub(capacity);
        self.evict(excess)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events evicted since the last drain
    pub fn discarded(&self) -> u64 {
        self.discarded
    }

    /// Append an event; returns how many old events were evicted to make room
    pub fn push(&mut self, logger: impl Into<String>, event: LogEvent) -> usize {
        if self.capacity == 0 {
            self.discarded += 1;
            return 1;
        }

        let mut evicted = 0;
        if self.events.len() >= self.capacity {
            let batch = (self.capacity / 10)
                .max(1)
                .max(self.events.len() + 1 - self.capacity);
            evicted = self.evict(batch);
        }

        self.events.push_back(PendingEvent {
            logger: logger.into(),
            event,
        });
        evicted
    }

    fn evict(&mut self, count: usize) -> usize {
        let count = count.min(self.events.len());
        self.events.drain(..count);
        self.discarded += count as u64;
        count
    }

    /// Take every buffered event in arrival order together with the discard count
    pub fn drain(&mut self) -> (Vec<PendingEvent>, u64) {
        let events = self.events.drain(..).collect();
        let discarded = std::mem::take(&mut self.discarded);
        (events, discarded)
    }
}

impl Default for PendingBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_PENDING_EVENTS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LogLevel, Message};

    fn event(i: usize) -> LogEvent {
        LogEvent::new("test", LogLevel::INFO, Message::from(format!("event {}", i)))
    }

    fn messages(events: &[PendingEvent]) -> Vec<String> {
        events
            .iter()
            .map(|p| p.event.message().formatted_message().to_string())
            .collect()
    }

    #[test]
    fn test_fifo_order() {
        let mut buffer = PendingBuffer::new(10);
        for i in 0..3 {
            assert_eq!(buffer.push("a", event(i)), 0);
        }
        let (events, discarded) = buffer.drain();
        assert_eq!(messages(&events), vec!["event 0", "event 1", "event 2"]);
        assert_eq!(discarded, 0);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_eviction_batch_of_ten_percent() {
        let mut buffer = PendingBuffer::new(1000);
        for i in 0..1000 {
            buffer.push("a", event(i));
        }
        assert_eq!(buffer.push("a", event(1000)), 100);
        assert_eq!(buffer.len(), 901);

        for i in 1001..1100 {
            assert_eq!(buffer.push("a", event(i)), 0);
        }
        assert_eq!(buffer.len(), 1000);
        assert_eq!(buffer.discarded(), 100);

        let (events, discarded) = buffer.drain();
        assert_eq!(discarded, 100);
        assert_eq!(events[0].event.message().formatted_message(), "event 100");
        assert_eq!(events[999].event.message().formatted_message(), "event 1099");
    }

    #[test]
    fn test_small_capacity_evicts_at_least_one() {
        let mut buffer = PendingBuffer::new(3);
        for i in 0..3 {
            buffer.push("a", event(i));
        }
        assert_eq!(buffer.push("a", event(3)), 1);
        let (events, discarded) = buffer.drain();
        assert_eq!(messages(&events), vec!["event 1", "event 2", "event 3"]);
        assert_eq!(discarded, 1);
    }

    #[test]
    fn test_zero_capacity_discards_everything() {
        let mut buffer = PendingBuffer::new(0);
        buffer.push("a", event(0));
        buffer.push("a", event(1));
        let (events, discarded) = buffer.drain();
        assert!(events.is_empty());
        assert_eq!(discarded, 2);
    }

    #[test]
    fn test_shrinking_capacity() {
        let mut buffer = PendingBuffer::new(10);
        for i in 0..8 {
            buffer.push("a", event(i));
        }
        assert_eq!(buffer.set_capacity(5), 3);
        assert_eq!(buffer.len(), 5);
        assert_eq!(buffer.discarded(), 3);
    }
}
