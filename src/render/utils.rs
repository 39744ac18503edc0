use crate::{
    event::{Message, ScopeFinished, ScopeStarted},
    render::Renderer,
};

/// An implementation of [`Renderer`] which discards all events.
#[derive(Debug, Default, Copy, Clone)]
pub struct Discard;

impl Renderer for Discard {
    fn scope_started(&mut self, _event: &ScopeStarted) {}

    fn scope_finished(&mut self, _event: &ScopeFinished) {}

    fn message(&mut self, _event: &Message) {}
}

/// An implementation of [`Renderer`] forwarding to either one or the other implementation.
///
/// Useful to decide at runtime which renderer to use, while still passing a single type to
/// [`Logger::new()`][crate::Logger::new()].
#[allow(missing_docs)]
pub enum Either<L, R> {
    Left(L),
    Right(R),
}

impl<L, R> Renderer for Either<L, R>
where
    L: Renderer,
    R: Renderer,
{
    fn scope_started(&mut self, event: &ScopeStarted) {
        match self {
            Either::Left(l) => l.scope_started(event),
            Either::Right(r) => r.scope_started(event),
        }
    }

    fn scope_finished(&mut self, event: &ScopeFinished) {
        match self {
            Either::Left(l) => l.scope_finished(event),
            Either::Right(r) => r.scope_finished(event),
        }
    }

    fn message(&mut self, event: &Message) {
        match self {
            Either::Left(l) => l.message(event),
            Either::Right(r) => r.message(event),
        }
    }
}

#[cfg(feature = "render-autoconfigure")]
mod autoconfigure {
    use crate::render::{
        interactive::{self, Interactive},
        simple::{self, Simple},
        Either,
    };
    use std::io;

    /// Render to standard output, interactively if it is connected to a terminal, or line by line otherwise.
    ///
    /// The returned handle is only set for the interactive renderer and must be kept alive for as long as
    /// drawing should continue.
    pub fn stdout(
        options: interactive::Options,
    ) -> (Either<Interactive, Simple<io::Stdout>>, Option<interactive::JoinHandle>) {
        if atty::is(atty::Stream::Stdout) {
            let (renderer, handle) = interactive::render(io::stdout(), options);
            (Either::Left(renderer), Some(handle))
        } else {
            log::debug!("standard output is not a terminal, printing events line by line");
            let renderer = Simple::new(
                io::stdout(),
                simple::Options {
                    colors: options.tree.colors,
                    colored: false,
                    ..simple::Options::default()
                },
            );
            (Either::Right(renderer), None)
        }
    }
}

#[cfg(feature = "render-autoconfigure")]
pub use autoconfigure::stdout;
