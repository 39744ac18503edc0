//! Utilities to draw frames into a terminal with as little output as possible.
use crossterm::{
    queue,
    terminal::{DisableLineWrap, EnableLineWrap},
};
use std::io;

pub mod color;
pub mod diff;


/// Return the amount of rows of the terminal, or `None` if it's unknown.
pub fn height() -> Option<usize> {
    match crossterm::terminal::size() {
        Ok((_columns, rows)) if rows > 0 => Some(rows.into()),
        Ok(_) => None,
        Err(err) => {
            log::debug!("terminal height is unknown, frames will not be bounded: {}", err);
            None
        }
    }
}

/// Prevent lines longer than the terminal is wide from wrapping, which would break incremental updates.
pub fn disable_auto_wrap(out: &mut impl io::Write) -> io::Result<()> {
    queue!(out, DisableLineWrap)
}

/// Undo [`disable_auto_wrap()`].
pub fn enable_auto_wrap(out: &mut impl io::Write) -> io::Result<()> {
    queue!(out, EnableLineWrap)
}
