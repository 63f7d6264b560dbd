//! Event system: activation input, ordered listeners, notification outbox.

pub mod handler;
pub mod input;
pub mod listener;
pub mod message;

pub use handler::{bubble_path, Outbox};
pub use input::{ActivationEvent, ActivationSource, Key};
pub use listener::{ListenerContext, ListenerHandle, ListenerId, ListenerPhase, ListenerRegistry};
pub use message::{Envelope, Message};
