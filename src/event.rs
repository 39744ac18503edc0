//! The events emitted by loggers and passed on to renderers.
use std::{fmt, ops::Deref, sync::Arc, time::SystemTime};

/// The ordered names of all scopes leading up to and including a particular scope.
///
/// The root of the hierarchy has the empty path. Paths are cheap to clone as they share
/// their storage, which is never mutated after creation.
#[derive(Clone, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct ScopePath(Arc<[String]>);

impl ScopePath {
    /// The path of the root scope.
    pub fn root() -> Self {
        ScopePath(Vec::new().into())
    }

    /// Returns true if this is the path of the root scope.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Return a new path with `name` appended to ours.
    pub fn child(&self, name: impl Into<String>) -> ScopePath {
        let mut names = Vec::with_capacity(self.0.len() + 1);
        names.extend_from_slice(&self.0);
        names.push(name.into());
        ScopePath(names.into())
    }

    /// The name of the innermost scope, or `None` for the root.
    pub fn name(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    /// The nesting level, with the root being at level 0.
    pub fn level(&self) -> usize {
        self.0.len()
    }
}

impl Default for ScopePath {
    fn default() -> Self {
        ScopePath::root()
    }
}

impl Deref for ScopePath {
    type Target = [String];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S: Into<String>> FromIterator<S> for ScopePath {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        ScopePath(iter.into_iter().map(Into::into).collect::<Vec<_>>().into())
    }
}

impl fmt::Display for ScopePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("/"))
    }
}

impl fmt::Debug for ScopePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}

/// The severity of a message, ordered from most to least severe.
#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub enum Level {
    /// Something failed
    Error,
    /// Something looks suspicious but work goes on
    Warn,
    /// Regular information about the progress of work
    Info,
    /// Information useful when investigating problems
    Debug,
    /// Very verbose information
    Trace,
}

impl From<Level> for log::Level {
    fn from(level: Level) -> Self {
        match level {
            Level::Error => log::Level::Error,
            Level::Warn => log::Level::Warn,
            Level::Info => log::Level::Info,
            Level::Debug => log::Level::Debug,
            Level::Trace => log::Level::Trace,
        }
    }
}

/// The terminal result of a scope.
#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq)]
pub enum Outcome {
    /// The work in the scope was done successfully
    Succeeded,
    /// The work in the scope failed
    Failed,
    /// The work in the scope was not performed
    Skipped,
}

/// Emitted when a scope was opened.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ScopeStarted {
    /// The scope that was opened.
    pub path: ScopePath,
    /// The time at which the scope was opened.
    pub time: SystemTime,
}

/// Emitted when a scope was closed.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ScopeFinished {
    /// The scope that was closed.
    pub path: ScopePath,
    /// How the work in the scope ended.
    pub outcome: Outcome,
}

/// Emitted for each message logged into a scope.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Message {
    /// The scope the message belongs to.
    pub path: ScopePath,
    /// The severity of the message.
    pub level: Level,
    /// The formatted text, which may contain any amount of line breaks.
    pub text: String,
}

/// Everything that can happen to a scope, as delivered to a [`Renderer`][crate::render::Renderer].
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Event {
    /// A scope was opened
    ScopeStarted(ScopeStarted),
    /// A scope was closed
    ScopeFinished(ScopeFinished),
    /// A message was logged into a scope
    Message(Message),
}

impl Event {
    /// The path of the scope this event relates to.
    pub fn path(&self) -> &ScopePath {
        match self {
            Event::ScopeStarted(e) => &e.path,
            Event::ScopeFinished(e) => &e.path,
            Event::Message(e) => &e.path,
        }
    }
}
