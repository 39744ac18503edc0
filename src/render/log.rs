use crate::{
    event::{Message, Outcome, ScopeFinished, ScopePath, ScopeStarted},
    render::Renderer,
};

const SEP: &str = "::";

/// A [`Renderer`] which passes all events on to the `log` crate.
///
/// Scopes deeper than `max_level` are not logged, but their messages are.
pub struct Log {
    max_level: usize,
}

impl Log {
    /// Create a new instance logging the start and end of scopes only up to `max_level`, with top-level scopes being
    /// at level 1.
    pub fn new(max_level: Option<usize>) -> Self {
        Log {
            max_level: max_level.unwrap_or(usize::MAX),
        }
    }
}

impl Default for Log {
    fn default() -> Self {
        Log::new(None)
    }
}

fn name(path: &ScopePath) -> String {
    path.join(SEP)
}

impl Renderer for Log {
    fn scope_started(&mut self, event: &ScopeStarted) {
        if event.path.is_root() || event.path.level() > self.max_level {
            return;
        }
        log::info!("{} → started", name(&event.path));
    }

    fn scope_finished(&mut self, event: &ScopeFinished) {
        if event.path.is_root() || event.path.level() > self.max_level {
            return;
        }
        let name = name(&event.path);
        match event.outcome {
            Outcome::Succeeded => log::info!("✓{} → done", name),
            Outcome::Failed => log::error!("𐄂{} → failed", name),
            Outcome::Skipped => log::info!("⏩{} → skipped", name),
        }
    }

    fn message(&mut self, event: &Message) {
        let text = event.text.strip_suffix('\n').unwrap_or(&event.text);
        log::log!(log::Level::from(event.level), "{} → {}", name(&event.path), text);
    }
}
