//! Delegated activation listeners with explicit ordering.
//!
//! Listeners attach to a node and see every activation whose target is that
//! node or a descendant. Dispatch walks the bubble path from the target up;
//! on each node listeners run by [`ListenerPhase`] first and registration
//! order second. The enhancement pass registers in [`ListenerPhase::Enhance`]
//! and the grid's reconciliation in [`ListenerPhase::Reconcile`], so on a
//! shared node the DOM has always been mutated before it is read back.

use log::trace;
use slotmap::{new_key_type, SlotMap};

use super::handler::{bubble_path, Outbox};
use super::input::ActivationEvent;
use crate::dom::{Dom, NodeId};
use crate::error::GridError;

new_key_type! {
    /// Identifies a registered listener.
    pub struct ListenerId;
}

/// Ordering class of a listener on a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ListenerPhase {
    /// Imperative DOM enhancement (sorting rows, writing `aria-sort`).
    Enhance,
    /// Reading enhancement results back into component state.
    Reconcile,
}

/// What a listener can touch while handling an activation.
pub struct ListenerContext<'a> {
    /// The document.
    pub dom: &'a mut Dom,
    /// Public notification queue.
    pub outbox: &'a mut Outbox,
    /// The activation being dispatched.
    pub event: &'a ActivationEvent,
    /// The node the listener is attached to.
    pub current: NodeId,
}

/// Listener callback. An error aborts dispatch and is returned to the caller.
pub type Handler = Box<dyn FnMut(&mut ListenerContext<'_>) -> Result<(), GridError>>;

struct Entry {
    node: NodeId,
    phase: ListenerPhase,
    seq: u64,
    handler: Handler,
}

/// All listeners of a document.
#[derive(Default)]
pub struct ListenerRegistry {
    entries: SlotMap<ListenerId, Entry>,
    next_seq: u64,
}

impl ListenerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach `handler` to `node`.
    pub fn add(
        &mut self,
        node: NodeId,
        phase: ListenerPhase,
        handler: impl FnMut(&mut ListenerContext<'_>) -> Result<(), GridError> + 'static,
    ) -> ListenerHandle {
        let seq = self.next_seq;
        self.next_seq += 1;
        let id = self.entries.insert(Entry {
            node,
            phase,
            seq,
            handler: Box::new(handler),
        });
        ListenerHandle { id: Some(id) }
    }

    /// Detach a listener. Returns `false` if it was already gone.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        self.entries.remove(id).is_some()
    }

    /// Whether a listener is still registered.
    pub fn contains(&self, id: ListenerId) -> bool {
        self.entries.contains_key(id)
    }

    /// Number of listeners attached to `node`.
    pub fn count_on(&self, node: NodeId) -> usize {
        self.entries.values().filter(|e| e.node == node).count()
    }

    /// Total number of listeners.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no listeners are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Listeners on `node` in dispatch order.
    fn ordered_on(&self, node: NodeId) -> Vec<ListenerId> {
        let mut ids: Vec<(ListenerPhase, u64, ListenerId)> = self
            .entries
            .iter()
            .filter(|(_, e)| e.node == node)
            .map(|(id, e)| (e.phase, e.seq, id))
            .collect();
        ids.sort();
        ids.into_iter().map(|(_, _, id)| id).collect()
    }

    /// Deliver `event` along its bubble path.
    ///
    /// Returns how many listeners ran. The first listener error stops
    /// dispatch and is returned.
    pub fn dispatch(
        &mut self,
        dom: &mut Dom,
        outbox: &mut Outbox,
        event: &ActivationEvent,
    ) -> Result<usize, GridError> {
        let mut ran = 0;
        for node in bubble_path(dom, event.target) {
            if !dom.contains(node) {
                continue;
            }
            for id in self.ordered_on(node) {
                let Some(entry) = self.entries.get_mut(id) else {
                    continue;
                };
                trace!("dispatching activation to {:?} listener on {:?}", entry.phase, node);
                let mut ctx = ListenerContext {
                    dom: &mut *dom,
                    outbox: &mut *outbox,
                    event,
                    current: node,
                };
                (entry.handler)(&mut ctx)?;
                ran += 1;
            }
        }
        Ok(ran)
    }
}

/// Owner of one registration, removable at most once.
#[derive(Debug, PartialEq, Eq)]
pub struct ListenerHandle {
    id: Option<ListenerId>,
}

impl ListenerHandle {
    /// A handle that owns nothing; removing it does nothing.
    pub fn inert() -> Self {
        Self { id: None }
    }

    /// The registration id, while still owned.
    pub fn id(&self) -> Option<ListenerId> {
        self.id
    }

    /// Whether this handle still owns a registration.
    pub fn is_active(&self) -> bool {
        self.id.is_some()
    }

    /// Remove the listener. Safe to call any number of times; returns whether
    /// this call removed something.
    pub fn remove(&mut self, registry: &mut ListenerRegistry) -> bool {
        self.id.take().is_some_and(|id| registry.remove(id))
    }
}
