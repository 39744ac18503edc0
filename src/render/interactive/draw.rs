use crate::{terminal::diff, tree::Node};
use std::io;

#[derive(Default)]
pub struct State {
    pub frame: Vec<String>,
}

/// Draw the lines of all children of `root` over the previously drawn frame.
pub fn frame(out: &mut impl io::Write, root: &Node, state: &mut State, max_lines: Option<usize>) -> io::Result<()> {
    let frame: Vec<String> = root.children().iter().flat_map(|child| child.render()).collect();
    match max_lines {
        Some(max_lines) => diff::incremental_update_max_lines(out, &state.frame, &frame, max_lines)?,
        None => diff::incremental_update(out, &state.frame, &frame)?,
    }
    state.frame = frame;
    Ok(())
}
