//! Colors for titles, and whether the environment allows using them.
use ansi_term::Colour;
use std::{borrow::Cow, ffi::OsStr};

/// The colors used to paint titles depending on the state of their scope.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ColorScheme {
    /// Used for scopes which succeeded.
    pub success: Colour,
    /// Used for scopes which failed.
    pub failure: Colour,
    /// Used for scopes which are pending, running or were skipped.
    pub neutral: Colour,
}

impl Default for ColorScheme {
    fn default() -> Self {
        ColorScheme {
            success: Colour::Green,
            failure: Colour::Red,
            neutral: Colour::Yellow,
        }
    }
}

/// Paint `text` in `colour` if `colored` is true, or return it as is otherwise.
pub fn paint(colored: bool, colour: Option<Colour>, text: &str) -> String {
    match (colored, colour) {
        (true, Some(colour)) => colour.paint(text).to_string(),
        _ => text.to_owned(),
    }
}

/// Return true if we should colorize the output, as governed by [CLICOLOR](https://bixense.com/clicolors/) and [NO_COLOR](https://no-color.org).
///
/// Note that you should also validate that the output stream is actually connected to a terminal.
pub fn allowed() -> bool {
    allow_by_clicolors() && allow_by_no_color()
}

fn evar_with_default<'a>(name: &str, default: &'a str) -> Cow<'a, OsStr> {
    std::env::var_os(name)
        .map(Cow::from)
        .unwrap_or_else(|| Cow::Borrowed(OsStr::new(default)))
}

// https://bixense.com/clicolors/
fn allow_by_clicolors() -> bool {
    *evar_with_default("CLICOLOR", "1") == *OsStr::new("1")
        || *evar_with_default("CLICOLOR_FORCE", "0") != *OsStr::new("0")
}

// https://no-color.org
fn allow_by_no_color() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}
