//! Component trait: render into a host, react to prop changes, tear down.
//!
//! A component owns one host element. The page mounts it once, asks it for an
//! update whenever it reports dirty props during a flush, and unmounts it at
//! most once.

use std::any::Any;

use crate::dom::{Dom, NodeId};
use crate::error::GridError;
use crate::event::ListenerRegistry;

/// Access a component gets to the page while mounting, updating or unmounting.
pub struct ComponentContext<'a> {
    pub dom: &'a mut Dom,
    pub listeners: &'a mut ListenerRegistry,
    /// The element the component renders into.
    pub host: NodeId,
}

/// Core trait implemented by everything a [`Page`](crate::page::Page) hosts.
///
/// Object-safe: the page stores components as `Box<dyn Component>`.
pub trait Component {
    /// Name used for the host element's `data-component` attribute.
    fn component_type(&self) -> &str;

    /// Render into the host and connect listeners.
    fn mount(&mut self, cx: &mut ComponentContext<'_>) -> Result<(), GridError>;

    /// Whether props changed since the last render.
    fn needs_update(&self) -> bool {
        false
    }

    /// Re-render after a prop change.
    fn update(&mut self, _cx: &mut ComponentContext<'_>) -> Result<(), GridError> {
        Ok(())
    }

    /// Disconnect listeners. Must tolerate being called more than once.
    fn unmount(&mut self, _cx: &mut ComponentContext<'_>) {}

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}
