//! Page host: document, listeners, focus, mounted components.
//!
//! [`Page`] owns the DOM, the listener registry, the notification outbox, the
//! lifecycle tracker and the focus chain. It mounts components into host
//! elements, re-renders dirty components on [`Page::flush`], and turns clicks
//! and key presses into activations. [`FocusChain`] keeps the tab order of
//! focusable controls.

use std::collections::HashMap;

use log::debug;

use crate::bridge::{enhance, Enhancement};
use crate::component::{Component, ComponentContext, LifecycleEvent, LifecycleTracker};
use crate::config::GridConfig;
use crate::dom::{Dom, NodeData, NodeId};
use crate::error::GridError;
use crate::event::{ActivationEvent, Envelope, Key, ListenerRegistry, Outbox};
use crate::markup::parse_into;

// ---------------------------------------------------------------------------
// FocusChain
// ---------------------------------------------------------------------------

/// Tab order over the page's buttons.
///
/// Tracks the focused node itself rather than a position, so rebuilding
/// after rows move keeps focus on the same trigger. A focused button that
/// disappears or becomes `disabled` drops focus.
#[derive(Debug, Default)]
pub struct FocusChain {
    order: Vec<NodeId>,
    focused: Option<NodeId>,
}

impl FocusChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-read the enabled buttons under the document root.
    pub fn rebuild(&mut self, dom: &Dom) {
        self.order = dom
            .root()
            .map(|root| dom.descendants_matching(root, |d| d.is("button") && !d.has_attr("disabled")))
            .unwrap_or_default();
        self.focused = self.focused.filter(|id| self.order.contains(id));
    }

    pub fn current_node(&self) -> Option<NodeId> {
        self.focused
    }

    /// Tab. From nothing, lands on the first button.
    pub fn focus_next(&mut self) -> Option<NodeId> {
        self.step(true)
    }

    /// Shift+Tab. From nothing, lands on the last button.
    pub fn focus_previous(&mut self) -> Option<NodeId> {
        self.step(false)
    }

    /// Focus `id` directly; `false` for anything outside the tab order.
    pub fn focus_node(&mut self, id: NodeId) -> bool {
        let known = self.order.contains(&id);
        if known {
            self.focused = Some(id);
        }
        known
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    fn step(&mut self, forward: bool) -> Option<NodeId> {
        let len = self.order.len();
        if len == 0 {
            return None;
        }
        let at = self.focused.and_then(|id| self.order.iter().position(|&n| n == id));
        let next = match (at, forward) {
            (Some(i), true) => (i + 1) % len,
            (Some(i), false) => (i + len - 1) % len,
            (None, true) => 0,
            (None, false) => len - 1,
        };
        self.focused = Some(self.order[next]);
        self.focused
    }
}

// ---------------------------------------------------------------------------
// Page
// ---------------------------------------------------------------------------

/// A headless page hosting components.
pub struct Page {
    dom: Dom,
    body: NodeId,
    listeners: ListenerRegistry,
    outbox: Outbox,
    lifecycle: LifecycleTracker,
    focus: FocusChain,
    components: HashMap<NodeId, Box<dyn Component>>,
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}

impl Page {
    /// An empty page: a document with a `<body>`.
    pub fn new() -> Self {
        let mut dom = Dom::new();
        let document = dom.insert(NodeData::new("#document"));
        let body = dom.insert_child(document, NodeData::new("body"));
        Self {
            dom,
            body,
            listeners: ListenerRegistry::new(),
            outbox: Outbox::new(),
            lifecycle: LifecycleTracker::new(),
            focus: FocusChain::new(),
            components: HashMap::new(),
        }
    }

    pub fn dom(&self) -> &Dom {
        &self.dom
    }

    /// Mutable access to the document. Call [`Page::refresh_focus`] after
    /// adding or removing controls.
    pub fn dom_mut(&mut self) -> &mut Dom {
        &mut self.dom
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    pub fn listeners(&self) -> &ListenerRegistry {
        &self.listeners
    }

    /// Parse `source` into new children of `parent`.
    pub fn insert_markup(&mut self, parent: NodeId, source: &str) -> Result<Vec<NodeId>, GridError> {
        if !self.dom.contains(parent) {
            return Err(GridError::NodeNotFound);
        }
        let nodes = parse_into(&mut self.dom, parent, source)?;
        self.refresh_focus();
        Ok(nodes)
    }

    /// Enhance static table markup under `root`.
    pub fn enhance(&mut self, root: NodeId, config: &GridConfig) -> Result<Enhancement, GridError> {
        let enhancement = enhance(&mut self.dom, &mut self.listeners, root, config)?;
        self.refresh_focus();
        Ok(enhancement)
    }

    /// Undo [`Page::enhance`]. Safe to repeat.
    pub fn cleanup(&mut self, enhancement: &mut Enhancement) -> bool {
        enhancement.cleanup(&mut self.dom, &mut self.listeners)
    }

    /// Mount `component` into a new host element appended to `parent`.
    pub fn mount(&mut self, parent: NodeId, component: impl Component + 'static) -> Result<NodeId, GridError> {
        if !self.dom.contains(parent) {
            return Err(GridError::NodeNotFound);
        }
        let mut component: Box<dyn Component> = Box::new(component);
        let host = self.dom.insert_child(
            parent,
            NodeData::new("div").with_attr("data-component", component.component_type()),
        );
        let mut cx = ComponentContext {
            dom: &mut self.dom,
            listeners: &mut self.listeners,
            host,
        };
        if let Err(err) = component.mount(&mut cx) {
            component.unmount(&mut cx);
            self.dom.remove(host);
            return Err(err);
        }
        debug!("mounted {} at {host:?}", component.component_type());
        self.components.insert(host, component);
        self.lifecycle.on_mount(host);
        self.refresh_focus();
        Ok(host)
    }

    /// Re-render every mounted component with pending prop changes.
    ///
    /// Returns the number of components updated; a flush with nothing dirty
    /// does nothing.
    pub fn flush(&mut self) -> Result<usize, GridError> {
        let dirty: Vec<NodeId> = self
            .lifecycle
            .mounted_nodes()
            .iter()
            .copied()
            .filter(|host| self.components.get(host).is_some_and(|c| c.needs_update()))
            .collect();
        for host in dirty {
            self.lifecycle.on_update(host);
        }

        let mut updated = 0;
        for event in self.lifecycle.pending_events() {
            match event {
                LifecycleEvent::Update { host } => {
                    let Some(component) = self.components.get_mut(&host) else {
                        continue;
                    };
                    let mut cx = ComponentContext {
                        dom: &mut self.dom,
                        listeners: &mut self.listeners,
                        host,
                    };
                    component.update(&mut cx)?;
                    updated += 1;
                }
                LifecycleEvent::Mount { host } | LifecycleEvent::Unmount { host } => {
                    debug!("lifecycle {event:?} for {host:?} settled");
                }
            }
        }
        if updated > 0 {
            debug!("flush re-rendered {updated} component(s)");
            self.refresh_focus();
        }
        Ok(updated)
    }

    /// Tear down the component hosted at `host` and remove its subtree.
    ///
    /// Returns `false` if nothing is mounted there.
    pub fn unmount(&mut self, host: NodeId) -> bool {
        let Some(mut component) = self.components.remove(&host) else {
            return false;
        };
        let mut cx = ComponentContext {
            dom: &mut self.dom,
            listeners: &mut self.listeners,
            host,
        };
        component.unmount(&mut cx);
        self.dom.remove(host);
        self.lifecycle.on_unmount(host);
        self.refresh_focus();
        debug!("unmounted {} at {host:?}", component.component_type());
        true
    }

    pub fn is_mounted(&self, host: NodeId) -> bool {
        self.lifecycle.is_mounted(host)
    }

    /// The component hosted at `host`, if it has type `T`.
    pub fn component<T: Component + 'static>(&self, host: NodeId) -> Option<&T> {
        self.components
            .get(&host)
            .and_then(|c| c.as_any().downcast_ref::<T>())
    }

    /// Pointer activation of `target`. Returns how many listeners ran.
    pub fn click(&mut self, target: NodeId) -> Result<usize, GridError> {
        if !self.dom.contains(target) {
            return Err(GridError::NodeNotFound);
        }
        self.focus.focus_node(target);
        self.dispatch(ActivationEvent::click(target))
    }

    /// Press `key` on `target`. Enter and Space activate buttons; every other
    /// combination does nothing.
    pub fn press_key(&mut self, target: NodeId, key: Key) -> Result<usize, GridError> {
        let is_button = self
            .dom
            .get(target)
            .ok_or(GridError::NodeNotFound)?
            .is("button");
        if !(is_button && key.activates_button()) {
            return Ok(0);
        }
        self.dispatch(ActivationEvent::key(target, key))
    }

    /// Press `key` on the focused control. Tab and BackTab move focus.
    pub fn press_key_on_focused(&mut self, key: Key) -> Result<usize, GridError> {
        match key {
            Key::Tab => {
                self.focus.focus_next();
                Ok(0)
            }
            Key::BackTab => {
                self.focus.focus_previous();
                Ok(0)
            }
            _ => match self.focus.current_node() {
                Some(focused) => self.press_key(focused, key),
                None => Ok(0),
            },
        }
    }

    pub fn focus_next(&mut self) -> Option<NodeId> {
        self.focus.focus_next()
    }

    pub fn focus_previous(&mut self) -> Option<NodeId> {
        self.focus.focus_previous()
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.focus.current_node()
    }

    /// Rebuild the focus chain after direct DOM edits.
    pub fn refresh_focus(&mut self) {
        self.focus.rebuild(&self.dom);
    }

    /// Take every queued notification, oldest first.
    pub fn drain_messages(&mut self) -> Vec<Envelope> {
        self.outbox.drain()
    }

    fn dispatch(&mut self, event: ActivationEvent) -> Result<usize, GridError> {
        self.listeners.dispatch(&mut self.dom, &mut self.outbox, &event)
    }
}

// ===========================================================================
// Tests
// ===========================================================================
