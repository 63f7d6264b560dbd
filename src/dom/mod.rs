//! Headless document: slotmap-backed element tree with attribute and class queries.

pub mod node;
pub mod tree;
pub mod query;

pub use node::{NodeData, NodeId, TEXT_TAG};
pub use tree::Dom;
