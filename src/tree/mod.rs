//! The tree of scopes which is rendered into frames.

mod completion;

mod node;
pub use node::Node;
