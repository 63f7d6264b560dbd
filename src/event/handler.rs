//! Outbox for public notifications and bubble path computation.

use std::collections::VecDeque;

use super::message::Envelope;
use crate::dom::{Dom, NodeId};

// ---------------------------------------------------------------------------
// Outbox
// ---------------------------------------------------------------------------

/// FIFO queue of notifications emitted by components.
///
/// Components push during event handling; hosting code drains after the
/// activation returns.
#[derive(Debug, Default)]
pub struct Outbox {
    queue: VecDeque<Envelope>,
}

impl Outbox {
    /// Create a new, empty outbox.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue a message envelope.
    pub fn push(&mut self, envelope: Envelope) {
        self.queue.push_back(envelope);
    }

    /// Drain all pending messages, oldest first.
    pub fn drain(&mut self) -> Vec<Envelope> {
        self.queue.drain(..).collect()
    }

    /// Number of pending messages.
    pub fn pending_count(&self) -> usize {
        self.queue.len()
    }

    /// Whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

/// Compute the bubble path from `start` up to the root (inclusive).
///
/// Returns `[start, parent, grandparent, ..., root]`, or an empty vec if
/// `start` is not in the DOM.
pub fn bubble_path(dom: &Dom, start: NodeId) -> Vec<NodeId> {
    if !dom.contains(start) {
        return Vec::new();
    }
    let mut path = vec![start];
    path.extend(dom.ancestors(start));
    path
}
