//! Renderers turn the events of all scopes into output.
use crate::event::{Event, Message, ScopeFinished, ScopeStarted};

pub mod interactive;
pub use interactive::Interactive;

#[cfg(feature = "render-simple")]
pub mod simple;
#[cfg(feature = "render-simple")]
pub use simple::Simple;

#[cfg(feature = "render-log")]
mod log;
#[cfg(feature = "render-log")]
pub use self::log::Log;

mod utils;
pub use utils::{Discard, Either};

#[cfg(feature = "render-autoconfigure")]
pub use utils::stdout;

/// Receives the events of all scopes one at a time, in the order they were emitted.
///
/// It is driven by the consumer thread of a [`Logger`][crate::Logger] and thus never called concurrently.
pub trait Renderer {
    /// Called when the scope at `event.path` was opened.
    fn scope_started(&mut self, event: &ScopeStarted);

    /// Called when the scope at `event.path` was closed.
    fn scope_finished(&mut self, event: &ScopeFinished);

    /// Called for each message logged into the scope at `event.path`.
    fn message(&mut self, event: &Message);

    /// Pass `event` to the method handling its kind.
    fn dispatch(&mut self, event: &Event) {
        match event {
            Event::ScopeStarted(e) => self.scope_started(e),
            Event::ScopeFinished(e) => self.scope_finished(e),
            Event::Message(e) => self.message(e),
        }
    }
}

impl<R> Renderer for Box<R>
where
    R: Renderer + ?Sized,
{
    fn scope_started(&mut self, event: &ScopeStarted) {
        self.as_mut().scope_started(event)
    }

    fn scope_finished(&mut self, event: &ScopeFinished) {
        self.as_mut().scope_finished(event)
    }

    fn message(&mut self, event: &Message) {
        self.as_mut().message(event)
    }
}
