use crate::{
    config::TreeOptions,
    event::Outcome,
    terminal::color,
    time::format_duration,
    tree::completion::Completion,
};
use ansi_term::Colour;
use parking_lot::RwLock;
use std::{
    sync::Arc,
    time::{Duration, Instant},
};
use unicode_width::UnicodeWidthChar;

const TRUNCATION_MARKER: &str = "...";
const INDENT: &str = "  ";
const WIDE_INDENT: &str = "   ";

/// A scope of work in the tree, along with its description and nested scopes.
///
/// All methods take `&self` and may be called from any thread. Each node guards its state with its own lock,
/// so sibling nodes can be changed and rendered independently, and [`render()`][Node::render()] never observes
/// a change to a single node half-way.
///
/// ```rust
/// use scopeview::{tree::Node, Outcome, TreeOptions};
/// use std::sync::Arc;
/// let root = Node::root(Arc::new(TreeOptions::default()));
/// let task = root.find_or_create_child("task");
/// task.start();
/// task.append_description("working…\n");
/// assert!(task.is_running());
/// task.complete_with(Outcome::Succeeded);
/// task.wait_completion();
/// assert_eq!(task.description_len(), 0, "succeeded scopes collapse into their title line");
/// ```
#[derive(Debug)]
pub struct Node {
    state: RwLock<State>,
    done: Completion,
    options: Arc<TreeOptions>,
    is_root: bool,
}

#[derive(Debug)]
struct State {
    title: String,
    status: String,
    title_color: Option<Colour>,
    description: Vec<String>,
    visible_description_lines: usize,
    started_at: Option<Instant>,
    ended_at: Option<Instant>,
    children: Vec<Arc<Node>>,
}

impl State {
    fn execution_duration(&self) -> Duration {
        match (self.started_at, self.ended_at) {
            (Some(start), Some(end)) => end.saturating_duration_since(start),
            (Some(start), None) => start.elapsed(),
            (None, _) => Duration::default(),
        }
    }

    fn is_running(&self) -> bool {
        self.started_at.is_some() && self.ended_at.is_none()
    }

    fn visible_description(&self) -> Vec<String> {
        let mut description = self.description.as_slice();
        // a message ending in a line break leaves an empty line to continue on, which isn't shown yet
        if description.last().map_or(false, String::is_empty) {
            description = &description[..description.len() - 1];
        }
        let visible = self.visible_description_lines;
        if description.len() > visible {
            std::iter::once(TRUNCATION_MARKER.to_owned())
                .chain(description[description.len() - visible..].iter().cloned())
                .collect()
        } else {
            description.to_vec()
        }
    }
}

/// Lifecycle
impl Node {
    /// Create a new node called `title` which didn't start yet.
    pub fn new(title: impl Into<String>, options: Arc<TreeOptions>) -> Self {
        Node::create(title.into(), options, false)
    }

    /// Create a new node called `title` and start it right away.
    pub fn started(title: impl Into<String>, options: Arc<TreeOptions>) -> Self {
        let node = Node::new(title, options);
        node.start();
        node
    }

    /// Create the root of a tree, which unlike other nodes keeps its children when it succeeds.
    pub fn root(options: Arc<TreeOptions>) -> Self {
        Node::create("root".into(), options, true)
    }

    fn create(title: String, options: Arc<TreeOptions>, is_root: bool) -> Self {
        Node {
            state: RwLock::new(State {
                title,
                status: options.pending_status.into(),
                title_color: Some(options.colors.neutral),
                description: Vec::new(),
                visible_description_lines: options.visible_description_lines,
                started_at: None,
                ended_at: None,
                children: Vec::new(),
            }),
            done: Completion::default(),
            options,
            is_root,
        }
    }

    /// Mark this node as running, unless it was started before.
    pub fn start(&self) {
        self.state.write().started_at.get_or_insert_with(Instant::now);
    }

    /// Mark this node as completed without changing how it looks, and wake up everyone waiting for it.
    ///
    /// Returns true if this call completed the node, or false if it was completed before, in which case nothing
    /// changes.
    pub fn complete(&self) -> bool {
        self.complete_and(|_| {})
    }

    /// Complete this node like [`complete()`][Node::complete()], and make its status and title color reflect
    /// `outcome`.
    ///
    /// Nodes that succeeded or were skipped lose their children and description, unless they are the root.
    /// Failed nodes show many more lines of their description instead.
    pub fn complete_with(&self, outcome: Outcome) -> bool {
        let options = &self.options;
        let collapse = !self.is_root;
        self.complete_and(|state| {
            let (status, colour) = match outcome {
                Outcome::Succeeded => (options.success_status, options.colors.success),
                Outcome::Failed => (options.failure_status, options.colors.failure),
                Outcome::Skipped => (options.skipped_status, options.colors.neutral),
            };
            state.status = status.into();
            state.title_color = Some(colour);
            match outcome {
                Outcome::Succeeded | Outcome::Skipped if collapse => {
                    state.children.clear();
                    state.description.clear();
                }
                Outcome::Failed => state.visible_description_lines = options.description_lines_when_failed,
                Outcome::Succeeded | Outcome::Skipped => {}
            }
        })
    }

    fn complete_and(&self, alter: impl FnOnce(&mut State)) -> bool {
        {
            let mut state = self.state.write();
            if state.ended_at.is_some() {
                return false;
            }
            let now = Instant::now();
            state.ended_at = Some(now);
            state.started_at.get_or_insert(now);
            alter(&mut state);
        }
        self.done.fire()
    }

    /// Block until this node is completed, which returns immediately if it already is.
    pub fn wait_completion(&self) {
        self.done.wait()
    }

    /// Block until this node is completed or `timeout` passed, and return true if it was completed.
    pub fn wait_completion_timeout(&self, timeout: Duration) -> bool {
        self.done.wait_for(timeout)
    }

    /// Returns true if [`start()`][Node::start()] or one of the completion methods were called.
    pub fn has_started(&self) -> bool {
        self.state.read().started_at.is_some()
    }

    /// Returns true once one of the completion methods was called.
    pub fn has_completed(&self) -> bool {
        self.state.read().ended_at.is_some()
    }

    /// Returns true if this node was started but not yet completed.
    pub fn is_running(&self) -> bool {
        self.state.read().is_running()
    }

    /// The time between start and completion, or the time since start if still running.
    ///
    /// Nodes which didn't start yet have no duration.
    pub fn execution_duration(&self) -> Duration {
        self.state.read().execution_duration()
    }

    /// Returns true if this is the root of a tree.
    pub fn is_root(&self) -> bool {
        self.is_root
    }
}

/// Hierarchy
impl Node {
    /// Return the last child called `title`, or add a new child with that title if there is none.
    ///
    /// As siblings are searched from the most recently added one, the latest of multiple children with the same
    /// title is the one that is found.
    pub fn find_or_create_child(&self, title: &str) -> Arc<Node> {
        let mut state = self.state.write();
        if let Some(child) = state.children.iter().rev().find(|child| child.state.read().title == title) {
            return Arc::clone(child);
        }
        let child = Arc::new(Node::new(title, Arc::clone(&self.options)));
        state.children.push(Arc::clone(&child));
        child
    }

    /// Add a new child called `title` which is started right away.
    pub fn start_new_child(&self, title: impl Into<String>) -> Arc<Node> {
        let child = Arc::new(Node::started(title, Arc::clone(&self.options)));
        self.add_child(Arc::clone(&child));
        child
    }

    /// Add `child` after all other children.
    pub fn add_child(&self, child: Arc<Node>) {
        self.state.write().children.push(child);
    }

    /// Return all children in the order they were added.
    pub fn children(&self) -> Vec<Arc<Node>> {
        self.state.read().children.clone()
    }

    /// Remove all children.
    pub fn clear_children(&self) {
        self.state.write().children.clear();
    }
}

/// Content
impl Node {
    /// Return our title.
    pub fn title(&self) -> String {
        self.state.read().title.clone()
    }

    /// Change our title to `title`.
    pub fn set_title(&self, title: impl Into<String>) {
        self.state.write().title = title.into();
    }

    /// Set the glyph shown in front of the title while not running.
    pub fn set_status(&self, status: impl Into<String>) {
        self.state.write().status = status.into();
    }

    /// Paint the title in `colour`, or not at all if `None`.
    pub fn set_title_color(&self, colour: Option<Colour>) {
        self.state.write().title_color = colour;
    }

    /// Append `text` to the description, continuing its last line.
    ///
    /// Line breaks in `text` start new lines. Nothing happens if this node is completed.
    pub fn append_description(&self, text: &str) {
        let mut state = self.state.write();
        if state.ended_at.is_some() {
            return;
        }
        let description = &mut state.description;
        let mut lines = text.split('\n');
        if let Some(first) = lines.next() {
            match description.last_mut() {
                Some(last) => last.push_str(first),
                None => description.push(first.to_owned()),
            }
        }
        description.extend(lines.map(ToOwned::to_owned));
        if let Some(max) = self.options.max_description_lines {
            // the empty line left open by a trailing line break doesn't count
            let keep = max + usize::from(description.last().map_or(false, String::is_empty));
            let len = description.len();
            if len > keep {
                description.drain(..len - keep);
            }
        }
    }

    /// Return a copy of all description lines.
    pub fn description(&self) -> Vec<String> {
        self.state.read().description.clone()
    }

    /// Replace the description with `lines`.
    pub fn set_description(&self, lines: Vec<String>) {
        self.state.write().description = lines;
    }

    /// Remove all description lines.
    pub fn clear_description(&self) {
        self.state.write().description.clear();
    }

    /// The amount of description lines.
    pub fn description_len(&self) -> usize {
        self.state.read().description.len()
    }

    /// The amount of most recent description lines to show.
    pub fn visible_description_lines(&self) -> usize {
        self.state.read().visible_description_lines
    }

    /// Show at most `count` of the most recent description lines.
    pub fn set_visible_description_lines(&self, count: usize) {
        self.state.write().visible_description_lines = count;
    }
}

/// Rendering
impl Node {
    /// Return the lines showing this node and all of its children.
    ///
    /// The first line is the title, prefixed with the status or a progress indicator while running and followed
    /// by the execution duration. It's followed by the lines of all children, or by the most recent lines
    /// of the description if there are no children. These are indented relative to the title.
    pub fn render(&self) -> Vec<String> {
        let (title, children, mut tail) = {
            let state = self.state.read();
            let tail = if state.children.is_empty() {
                state.visible_description()
            } else {
                Vec::new()
            };
            (self.title_line(&state), state.children.clone(), tail)
        };
        for child in &children {
            tail.extend(child.render());
        }

        let indent = match title.chars().next().and_then(UnicodeWidthChar::width) {
            Some(2) => WIDE_INDENT,
            _ => INDENT,
        };
        let mut lines = Vec::with_capacity(tail.len() + 1);
        lines.push(title);
        lines.extend(tail.into_iter().map(|line| format!("{}{}", indent, line)));
        lines
    }

    fn title_line(&self, state: &State) -> String {
        let prefix = if state.is_running() {
            self.options.current_progress_indicator_frame()
        } else {
            state.status.as_str()
        };
        format!(
            "{} {} {}",
            prefix,
            color::paint(self.options.colored, state.title_color, &state.title),
            format_duration(state.execution_duration(), state.children.is_empty())
        )
    }
}
