//! Merges raw notifications into batches

use std::time::{Duration, Instant};

use notify::Event;

use super::event::EventBatch;

/// Collects raw events and releases them as one batch once the latency
/// window opened by the first pending event has elapsed.
///
/// The window is measured from the first event, not the last, so a steady
/// stream of changes still produces a batch every `latency`.
pub(crate) struct Coalescer {
    latency: Duration,
    pending: Vec<Event>,
    window_start: Option<Instant>,
}

impl Coalescer {
    pub(crate) fn new(latency: Duration) -> Self {
        Self {
            latency,
            pending: Vec::new(),
            window_start: None,
        }
    }

    pub(crate) fn add(&mut self, event: Event) {
        self.add_at(event, Instant::now());
    }

    pub(crate) fn add_at(&mut self, event: Event, now: Instant) {
        if self.window_start.is_none() {
            self.window_start = Some(now);
        }
        self.pending.push(event);
    }

    pub(crate) fn should_flush(&self) -> bool {
        self.should_flush_at(Instant::now())
    }

    pub(crate) fn should_flush_at(&self, now: Instant) -> bool {
        match self.window_start {
            Some(start) => {
                !self.pending.is_empty() && now.saturating_duration_since(start) >= self.latency
            }
            None => false,
        }
    }

    /// Time left before the open window closes; `None` when nothing is pending.
    pub(crate) fn time_until_flush(&self, now: Instant) -> Option<Duration> {
        self.window_start
            .map(|start| self.latency.saturating_sub(now.saturating_duration_since(start)))
    }

    pub(crate) fn take_batch(&mut self) -> Option<EventBatch> {
        self.window_start = None;
        EventBatch::new(std::mem::take(&mut self.pending))
    }

    pub(crate) fn pending_len(&self) -> usize {
        self.pending.len()
    }
}
