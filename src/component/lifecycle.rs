//! Component lifecycle: mount, update, unmount.
//!
//! The `LifecycleTracker` records which hosts currently carry a mounted
//! component, in mount order, and accumulates lifecycle events that the page
//! drains during a flush.

use crate::dom::NodeId;

// ---------------------------------------------------------------------------
// LifecycleEvent
// ---------------------------------------------------------------------------

/// Events that occur during a component's lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// A component was rendered into `host` and connected.
    Mount { host: NodeId },
    /// A component's props changed and it needs re-rendering.
    Update { host: NodeId },
    /// A component was torn down.
    Unmount { host: NodeId },
}

// ---------------------------------------------------------------------------
// LifecycleTracker
// ---------------------------------------------------------------------------

/// Mounted hosts plus a queue of pending lifecycle events.
#[derive(Debug, Default)]
pub struct LifecycleTracker {
    mounted: Vec<NodeId>,
    pending: Vec<LifecycleEvent>,
}

impl LifecycleTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a mount. Mounting an already mounted host records nothing.
    pub fn on_mount(&mut self, host: NodeId) {
        if !self.mounted.contains(&host) {
            self.mounted.push(host);
            self.pending.push(LifecycleEvent::Mount { host });
        }
    }

    /// Record an unmount. Unmounting a host that is not mounted records nothing.
    pub fn on_unmount(&mut self, host: NodeId) {
        if let Some(pos) = self.mounted.iter().position(|&h| h == host) {
            self.mounted.remove(pos);
            self.pending.push(LifecycleEvent::Unmount { host });
        }
    }

    /// Queue an update for a mounted host. At most one update per host is
    /// pending at a time.
    pub fn on_update(&mut self, host: NodeId) {
        let event = LifecycleEvent::Update { host };
        if self.mounted.contains(&host) && !self.pending.contains(&event) {
            self.pending.push(event);
        }
    }

    pub fn is_mounted(&self, host: NodeId) -> bool {
        self.mounted.contains(&host)
    }

    /// Mounted hosts in mount order.
    pub fn mounted_nodes(&self) -> &[NodeId] {
        &self.mounted
    }

    pub fn mounted_count(&self) -> usize {
        self.mounted.len()
    }

    /// Drain and return all pending events, oldest first.
    pub fn pending_events(&mut self) -> Vec<LifecycleEvent> {
        std::mem::take(&mut self.pending)
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
