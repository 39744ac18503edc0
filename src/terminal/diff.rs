//! Compute the minimal output to turn one frame of lines into another.
use crossterm::{
    cursor::{MoveDown, MoveUp},
    queue,
    terminal::{Clear, ClearType},
};
use std::io;

const MOVE_TO_LINE_START: &[u8] = b"\r";

/// Write the terminal control sequences and text to `out` which turn the previously drawn frame `before`
/// into `after`, and flush `out`.
///
/// The cursor is expected to be at the start of the line right below `before`, and will be at the start of the
/// line right below `after` once the output was interpreted.
/// Lines that are the same in both frames are not redrawn, and no output is produced at all if the frames are equal.
pub fn incremental_update<S: AsRef<str>>(out: &mut impl io::Write, before: &[S], after: &[S]) -> io::Result<()> {
    let common = common_prefix_len(before, after);
    let (before, after) = (&before[common..], &after[common..]);
    if before.is_empty() && after.is_empty() {
        return Ok(());
    }
    let overlap = before.len().min(after.len());
    out.write_all(MOVE_TO_LINE_START)?;

    if !before.is_empty() {
        move_up(out, before.len())?;
    }
    if overlap > 0 {
        let mut last_edited = 0;
        for (idx, (old, new)) in before.iter().zip(after).enumerate() {
            if old.as_ref() == new.as_ref() {
                continue;
            }
            let skipped = idx - last_edited;
            if skipped > 0 {
                move_down(out, skipped)?;
            }
            queue!(out, Clear(ClearType::UntilNewLine))?;
            out.write_all(new.as_ref().as_bytes())?;
            out.write_all(MOVE_TO_LINE_START)?;
            last_edited = idx;
        }
        move_down(out, overlap - last_edited)?;
    }
    for line in &after[overlap..] {
        out.write_all(line.as_ref().as_bytes())?;
        out.write_all(b"\n")?;
    }
    if before.len() > after.len() {
        queue!(out, Clear(ClearType::FromCursorDown))?;
    }
    out.flush()
}

/// Like [`incremental_update()`], but only considers the last `max_lines` lines of both frames.
///
/// Use it if the terminal can only show `max_lines` lines, as lines scrolled out of view cannot be changed anymore.
pub fn incremental_update_max_lines<S: AsRef<str>>(
    out: &mut impl io::Write,
    before: &[S],
    after: &[S],
    max_lines: usize,
) -> io::Result<()> {
    incremental_update(out, tail(before, max_lines), tail(after, max_lines))
}

fn tail<S>(lines: &[S], max_lines: usize) -> &[S] {
    &lines[lines.len().saturating_sub(max_lines)..]
}

fn common_prefix_len<S: AsRef<str>>(lhs: &[S], rhs: &[S]) -> usize {
    lhs.iter()
        .zip(rhs)
        .take_while(|(lhs, rhs)| lhs.as_ref() == rhs.as_ref())
        .count()
}

/// Cursor movements take at most `u16::MAX` lines, so longer distances are covered in multiple steps.
fn move_up(out: &mut impl io::Write, lines: usize) -> io::Result<()> {
    for step in steps(lines) {
        queue!(out, MoveUp(step))?;
    }
    Ok(())
}

fn move_down(out: &mut impl io::Write, lines: usize) -> io::Result<()> {
    for step in steps(lines) {
        queue!(out, MoveDown(step))?;
    }
    Ok(())
}

fn steps(mut lines: usize) -> impl Iterator<Item = u16> {
    std::iter::from_fn(move || {
        if lines == 0 {
            return None;
        }
        let step = u16::try_from(lines).unwrap_or(u16::MAX);
        lines -= usize::from(step);
        Some(step)
    })
}
