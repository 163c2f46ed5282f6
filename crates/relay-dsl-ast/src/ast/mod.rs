//! Syntax-tree arena and traversal protocol.

mod node;
pub mod walk;

pub use node::*;
pub use walk::{traverse, visit, Edge, EdgeChild, Field};
