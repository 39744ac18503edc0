//! A renderer printing one line per event, for output that isn't a terminal.
use crate::{
    event::{Message, Outcome, ScopeFinished, ScopeStarted},
    render::Renderer,
    terminal::color::{self, ColorScheme},
    time::{format_duration, format_time_for_messages},
};
use std::{collections::HashMap, io, time::SystemTime};

/// Configure the simple renderer.
#[derive(Clone, Debug)]
pub struct Options {
    /// The colors to paint scope lines with.
    pub colors: ColorScheme,
    /// If true, _(default: what the environment [allows][color::allowed()])_, scope lines are painted with `colors`.
    pub colored: bool,
    /// If true, _(default: false)_, a timestamp will be shown before each line.
    pub timestamp: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            colors: ColorScheme::default(),
            colored: color::allowed(),
            timestamp: false,
        }
    }
}

/// Prints a line when scopes start and finish, along with all messages as they arrive.
///
/// Write errors are ignored, as there is nobody to report them to.
pub struct Simple<W> {
    out: W,
    options: Options,
    start_times: HashMap<String, SystemTime>,
}

impl<W: io::Write> Simple<W> {
    /// Create a new instance writing to `out`.
    pub fn new(out: W, options: Options) -> Self {
        Simple {
            out,
            options,
            start_times: HashMap::new(),
        }
    }

    /// Return the output we write to.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_line(&mut self, line: &str) {
        let res = if self.options.timestamp {
            writeln!(self.out, "{} {}", format_time_for_messages(SystemTime::now()), line)
        } else {
            writeln!(self.out, "{}", line)
        };
        res.ok();
    }
}

impl<W: io::Write> Renderer for Simple<W> {
    fn scope_started(&mut self, event: &ScopeStarted) {
        let name = match event.path.name() {
            Some(name) => name,
            None => return,
        };
        let key = event.path.to_string();
        if self.start_times.contains_key(&key) {
            return;
        }
        self.start_times.insert(key, event.time);
        let line = color::paint(
            self.options.colored,
            Some(self.options.colors.neutral),
            &format!("Started {}", quoted_if_needed(name)),
        );
        self.write_line(&line);
    }

    fn scope_finished(&mut self, event: &ScopeFinished) {
        let name = match event.path.name() {
            Some(name) => name,
            None => return,
        };
        let now = SystemTime::now();
        let duration = self
            .start_times
            .remove(&event.path.to_string())
            .and_then(|start| now.duration_since(start).ok())
            .unwrap_or_default();
        let duration = format_duration(duration, true);
        let name = quoted_if_needed(name);
        let (text, colour) = match event.outcome {
            Outcome::Succeeded => (format!("{} succeeded in {}!", name, duration), self.options.colors.success),
            Outcome::Failed => (format!("{} failed in {}!", name, duration), self.options.colors.failure),
            Outcome::Skipped => (format!("{} skipped!", name), self.options.colors.neutral),
        };
        let line = color::paint(self.options.colored, Some(colour), &text);
        self.write_line(&line);
    }

    fn message(&mut self, event: &Message) {
        let text = event.text.strip_suffix('\n').unwrap_or(&event.text);
        for line in text.split('\n') {
            self.write_line(line);
        }
    }
}

/// Put `name` into single quotes, unless it contains quotes of its own already.
fn quoted_if_needed(name: &str) -> String {
    if name.contains('\'') || name.contains('"') {
        name.to_owned()
    } else {
        format!("'{}'", name)
    }
}
