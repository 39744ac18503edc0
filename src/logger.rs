use crate::{
    event::{Event, Level, Message, Outcome, ScopeFinished, ScopePath, ScopeStarted},
    render::Renderer,
};
use std::{fmt, time::SystemTime};

/// A handle to emit events for one scope of work.
///
/// All handles created from the same root through [`Logger::scoped()`] share one ordered queue,
/// which is drained by a single consumer thread that hands each event to the renderer in turn.
/// Events of a single handle are seen by the renderer in the order they were emitted, whereas events of different
/// handles are interleaved in the order they arrived.
///
/// ```rust
/// use scopeview::{Level, Logger, render::Discard};
/// let (root, consumer) = Logger::new(Level::Info, Discard);
/// let build = root.scoped("build");
/// build.info("compiling\n");
/// build.debug("this is filtered and never reaches the renderer");
/// build.finish(true);
/// root.finish(true);
/// drop((build, root));
/// assert!(consumer.wait().is_some(), "the consumer stops once all handles are gone");
/// ```
#[derive(Clone, Debug)]
pub struct Logger {
    level: Level,
    path: ScopePath,
    events: flume::Sender<Event>,
}

/// A handle to the consumer thread which hands events to the renderer.
pub struct JoinHandle<R> {
    inner: std::thread::JoinHandle<R>,
}

impl<R> JoinHandle<R> {
    /// Wait until all [`Logger`] handles are dropped and all of their events are processed, and return the renderer.
    ///
    /// Returns `None` if the renderer panicked.
    pub fn wait(self) -> Option<R> {
        self.inner.join().ok()
    }
}

impl Logger {
    /// Create a root handle which passes all events with a level of at most `level` to `renderer`.
    ///
    /// The renderer is moved to a new consumer thread which runs until all handles are dropped.
    pub fn new<R>(level: Level, renderer: R) -> (Logger, JoinHandle<R>)
    where
        R: Renderer + Send + 'static,
    {
        let (events, receiver) = flume::unbounded::<Event>();
        let inner = std::thread::spawn(move || {
            let mut renderer = renderer;
            log::trace!("event consumer started");
            for event in receiver.iter() {
                renderer.dispatch(&event);
            }
            log::trace!("event consumer stopped as all loggers were dropped");
            renderer
        });
        (
            Logger {
                level,
                path: ScopePath::root(),
                events,
            },
            JoinHandle { inner },
        )
    }

    /// Open a new scope called `name` nested in ours and return its handle.
    ///
    /// Callers should use distinct names for scopes that are open at the same time under the same parent,
    /// as renderers identify scopes by their path.
    pub fn scoped(&self, name: impl Into<String>) -> Logger {
        let path = self.path.child(name);
        self.send(Event::ScopeStarted(ScopeStarted {
            path: path.clone(),
            time: SystemTime::now(),
        }));
        Logger {
            level: self.level,
            path,
            events: self.events.clone(),
        }
    }

    /// Log `text` with the given `level`, unless the level is filtered.
    ///
    /// Interactive renderers stream text as is, so end it with a line break to start the next message on a new line.
    pub fn log(&self, level: Level, text: impl Into<String>) {
        if self.is_enabled(level) {
            self.send_message(level, text.into());
        }
    }

    /// Like [`log()`][Logger::log()], but only formats `args` if `level` is enabled.
    pub fn log_fmt(&self, level: Level, args: fmt::Arguments<'_>) {
        if self.is_enabled(level) {
            self.send_message(level, fmt::format(args));
        }
    }

    /// Log `text` as [error][Level::Error].
    pub fn error(&self, text: impl Into<String>) {
        self.log(Level::Error, text)
    }

    /// Log `text` as [warning][Level::Warn].
    pub fn warn(&self, text: impl Into<String>) {
        self.log(Level::Warn, text)
    }

    /// Log `text` as [information][Level::Info].
    pub fn info(&self, text: impl Into<String>) {
        self.log(Level::Info, text)
    }

    /// Log `text` for [debugging][Level::Debug].
    pub fn debug(&self, text: impl Into<String>) {
        self.log(Level::Debug, text)
    }

    /// Log `text` for [tracing][Level::Trace].
    pub fn trace(&self, text: impl Into<String>) {
        self.log(Level::Trace, text)
    }

    /// Close our scope as [succeeded][Outcome::Succeeded] or [failed][Outcome::Failed].
    pub fn finish(&self, success: bool) {
        self.finish_with(if success { Outcome::Succeeded } else { Outcome::Failed })
    }

    /// Close our scope with the given `outcome`.
    ///
    /// Finishing the root handle tells interactive renderers that all work is done.
    pub fn finish_with(&self, outcome: Outcome) {
        self.send(Event::ScopeFinished(ScopeFinished {
            path: self.path.clone(),
            outcome,
        }));
    }

    /// Returns true if messages of `level` will be passed on to the renderer.
    pub fn is_enabled(&self, level: Level) -> bool {
        level <= self.level
    }

    /// The most verbose level we pass on.
    pub fn level(&self) -> Level {
        self.level
    }

    /// The path of our scope.
    pub fn path(&self) -> &ScopePath {
        &self.path
    }

    fn send_message(&self, level: Level, text: String) {
        self.send(Event::Message(Message {
            path: self.path.clone(),
            level,
            text,
        }))
    }

    fn send(&self, event: Event) {
        // The consumer only disappears if the renderer panicked, and there is no one left to tell.
        self.events.send(event).ok();
    }
}
