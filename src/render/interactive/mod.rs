//! A renderer keeping a tree of all scopes, which is drawn into the terminal in place as it changes.
use crate::{
    event::{Message, Outcome, ScopeFinished, ScopePath, ScopeStarted},
    render::Renderer,
    tree::Node,
};
use std::sync::Arc;

mod draw;

mod engine;
pub use engine::{render, JoinHandle, Options, RenderLoop};

/// Applies events to a tree of [`Node`]s, one per scope.
///
/// Nodes are created as events refer to them, so events for scopes whose parents are unknown still show up.
/// Scopes are found by title, searching from the most recently added sibling, which is why scopes with the same
/// name that are open at the same time under the same parent will end up sharing a node.
#[derive(Clone, Debug)]
pub struct Interactive {
    root: Arc<Node>,
}

impl Interactive {
    /// Create a new instance applying events to the tree below `root`.
    pub fn new(root: Arc<Node>) -> Self {
        Interactive { root }
    }

    /// The root of the tree we change.
    pub fn root(&self) -> &Arc<Node> {
        &self.root
    }

    fn find_scoped_node(&self, path: &ScopePath) -> Arc<Node> {
        path.iter()
            .fold(Arc::clone(&self.root), |node, name| node.find_or_create_child(name))
    }
}

impl Renderer for Interactive {
    fn scope_started(&mut self, event: &ScopeStarted) {
        self.find_scoped_node(&event.path).start();
    }

    fn scope_finished(&mut self, event: &ScopeFinished) {
        let node = self.find_scoped_node(&event.path);
        if event.outcome == Outcome::Failed {
            log::debug!("scope '{}' failed", event.path);
        }
        node.complete_with(event.outcome);
    }

    fn message(&mut self, event: &Message) {
        self.find_scoped_node(&event.path).append_description(&event.text);
    }
}
