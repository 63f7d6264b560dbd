//! Activation input: keys and the events that activate controls.

use crate::dom::NodeId;

// ---------------------------------------------------------------------------
// Key
// ---------------------------------------------------------------------------

/// Keyboard key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Space,
    Escape,
    Tab,
    BackTab,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
}

impl Key {
    /// Whether this key activates a focused `<button>`.
    pub fn activates_button(self) -> bool {
        matches!(self, Key::Enter | Key::Space | Key::Char(' '))
    }
}

// ---------------------------------------------------------------------------
// ActivationEvent
// ---------------------------------------------------------------------------

/// How a control was activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationSource {
    /// Pointer click or tap.
    Pointer,
    /// Keyboard activation with the given key.
    Keyboard(Key),
}

/// A control activation, delivered to listeners along the bubble path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivationEvent {
    /// The node the user activated.
    pub target: NodeId,
    /// Input that caused it.
    pub source: ActivationSource,
}

impl ActivationEvent {
    /// A pointer click on `target`.
    pub fn click(target: NodeId) -> Self {
        Self {
            target,
            source: ActivationSource::Pointer,
        }
    }

    /// A keyboard activation of `target`.
    pub fn key(target: NodeId, key: Key) -> Self {
        Self {
            target,
            source: ActivationSource::Keyboard(key),
        }
    }
}
