use crate::terminal::color::{self, ColorScheme};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// A way to configure how [`Node`][crate::tree::Node]s look when rendered.
/// ```rust
/// use scopeview::TreeOptions;
/// let options = TreeOptions::default();
/// let plain = TreeOptions { colored: false, visible_description_lines: 10, ..TreeOptions::symbols() };
/// ```
#[derive(Clone, Debug)]
pub struct TreeOptions {
    /// The colors to paint titles with.
    pub colors: ColorScheme,
    /// If true, titles are painted with `colors`. Defaults to what the environment [allows][color::allowed()].
    pub colored: bool,
    /// The glyphs cycled through in front of the title of running scopes.
    pub progress_indicator_frames: Vec<&'static str>,
    /// The time it takes to show all `progress_indicator_frames` once.
    pub progress_indicator_cycle: Duration,
    /// The glyph shown in front of scopes which didn't start yet.
    pub pending_status: &'static str,
    /// The glyph shown in front of scopes which succeeded.
    pub success_status: &'static str,
    /// The glyph shown in front of scopes which failed.
    pub failure_status: &'static str,
    /// The glyph shown in front of scopes which were skipped.
    pub skipped_status: &'static str,
    /// The amount of most recent description lines shown for each scope.
    pub visible_description_lines: usize,
    /// The amount of most recent description lines shown for failed scopes, to keep their diagnostics in view.
    pub description_lines_when_failed: usize,
    /// If set, only this many of the most recent description lines are kept in memory.
    ///
    /// An empty last line, left open by text ending in a line break, is kept in addition.
    pub max_description_lines: Option<usize>,
}

impl TreeOptions {
    /// Options using emoji for the status of scopes and a clock face as progress indicator.
    pub fn emoji() -> Self {
        TreeOptions {
            progress_indicator_frames: vec![
                "🕐", "🕑", "🕒", "🕓", "🕔", "🕕", "🕖", "🕗", "🕘", "🕙", "🕚", "🕛",
            ],
            pending_status: "⏸",
            success_status: "✅",
            failure_status: "❌",
            skipped_status: "⏩",
            ..TreeOptions::symbols()
        }
    }

    /// Options using only ASCII symbols, for terminals that can't display emoji.
    pub fn symbols() -> Self {
        TreeOptions {
            colors: ColorScheme::default(),
            colored: color::allowed(),
            progress_indicator_frames: vec!["\\", "|", "/", "-"],
            progress_indicator_cycle: Duration::from_secs(1),
            pending_status: ".",
            success_status: "+",
            failure_status: "-",
            skipped_status: "!",
            visible_description_lines: 5,
            description_lines_when_failed: 100,
            max_description_lines: None,
        }
    }

    /// Return the progress indicator frame to show right now.
    pub fn current_progress_indicator_frame(&self) -> &'static str {
        let frames = self.progress_indicator_frames.len() as u128;
        let cycle = self.progress_indicator_cycle.as_nanos();
        if frames == 0 || cycle == 0 {
            return self.pending_status;
        }
        let since_epoch = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        let nanos_per_frame = (cycle / frames).max(1);
        let index = ((since_epoch % cycle) / nanos_per_frame).min(frames - 1);
        self.progress_indicator_frames[index as usize]
    }
}

impl Default for TreeOptions {
    fn default() -> Self {
        if cfg!(windows) {
            TreeOptions::symbols()
        } else {
            TreeOptions::emoji()
        }
    }
}
