use crate::{
    config::TreeOptions,
    render::interactive::{draw, Interactive},
    terminal,
    tree::Node,
};
use std::{io, sync::Arc, time::Duration};

/// 80 by 120 characters of up to 4 bytes each.
const FRAME_BUFFER_SIZE: usize = 38400;

/// Configure the interactive renderer.
#[derive(Clone, Debug)]
pub struct Options {
    /// How nodes look.
    pub tree: TreeOptions,

    /// The time to wait between frames, _(default: 200ms)_.
    ///
    /// Frames are drawn right away once the root completes.
    pub refresh_interval: Duration,

    /// The amount of lines the terminal can show, _(default: None)_.
    ///
    /// If unset, [`render()`] asks the terminal for its size, and frames won't be bounded if that fails.
    /// If set, only the last lines of each frame that fit are drawn.
    pub terminal_height: Option<usize>,

    /// If true, _(default: true)_, lines wider than the terminal will be cut off instead of wrapped while drawing.
    ///
    /// Wrapped lines would take more rows than the frame accounts for, garbling the output of incremental updates.
    pub disable_auto_wrap: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            tree: TreeOptions::default(),
            refresh_interval: Duration::from_millis(200),
            terminal_height: None,
            disable_auto_wrap: true,
        }
    }
}

/// Periodically draws all children of a root [`Node`] until it completes.
pub struct RenderLoop<W: io::Write> {
    out: W,
    root: Arc<Node>,
    state: draw::State,
    refresh_interval: Duration,
    max_lines: Option<usize>,
    disable_auto_wrap: bool,
}

impl<W: io::Write> RenderLoop<W> {
    /// Create a new instance to draw the children of `root` into `out`.
    ///
    /// `options.terminal_height` is used as is, with `None` meaning that frames are unbounded.
    pub fn new(out: W, root: Arc<Node>, options: &Options) -> Self {
        RenderLoop {
            out,
            root,
            state: draw::State::default(),
            refresh_interval: options.refresh_interval,
            max_lines: options.terminal_height,
            disable_auto_wrap: options.disable_auto_wrap,
        }
    }

    /// Draw frames until the root is completed, then draw a final frame to show the very last changes.
    pub fn run(&mut self) -> io::Result<()> {
        if self.disable_auto_wrap {
            terminal::disable_auto_wrap(&mut self.out)?;
        }
        while !self.root.has_completed() {
            self.draw_frame()?;
            self.root.wait_completion_timeout(self.refresh_interval);
        }
        self.finish()
    }

    /// Complete the root if needed and draw the final frame.
    pub fn stop(&mut self) -> io::Result<()> {
        self.root.complete();
        self.finish()
    }

    /// Draw the current state of the tree over the previous frame.
    pub fn draw_frame(&mut self) -> io::Result<()> {
        draw::frame(&mut self.out, &self.root, &mut self.state, self.max_lines)
    }

    /// The lines of the last frame that was drawn.
    pub fn frame(&self) -> &[String] {
        &self.state.frame
    }

    /// Return the output we draw into.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn finish(&mut self) -> io::Result<()> {
        self.draw_frame()?;
        if self.disable_auto_wrap {
            terminal::enable_auto_wrap(&mut self.out)?;
        }
        self.out.flush()
    }
}

/// A handle to the render thread, which when dropped will complete the root and wait for the final frame to be drawn.
pub struct JoinHandle {
    root: Arc<Node>,
    inner: Option<std::thread::JoinHandle<io::Result<()>>>,
}

impl JoinHandle {
    /// Wait until the root was completed, usually by finishing the root [`Logger`][crate::Logger],
    /// and the final frame was drawn.
    pub fn wait(mut self) -> io::Result<()> {
        self.join()
    }

    /// Complete the root right away and wait until the final frame was drawn.
    pub fn stop(mut self) -> io::Result<()> {
        self.root.complete();
        self.join()
    }

    fn join(&mut self) -> io::Result<()> {
        match self.inner.take() {
            Some(handle) => handle
                .join()
                .unwrap_or_else(|_| Err(io::Error::new(io::ErrorKind::Other, "render thread panicked"))),
            None => Ok(()),
        }
    }
}

impl Drop for JoinHandle {
    fn drop(&mut self) {
        self.root.complete();
        self.join().ok();
    }
}

/// Draw a tree of scopes into `out` from a new thread, and return the renderer to pass to
/// [`Logger::new()`][crate::Logger::new()] along with a handle to the thread.
///
/// Drawing ends once the root scope finishes, or when the handle is stopped or dropped.
pub fn render(out: impl io::Write + Send + 'static, options: Options) -> (Interactive, JoinHandle) {
    let root = Arc::new(Node::root(Arc::new(options.tree.clone())));
    let options = Options {
        terminal_height: options.terminal_height.or_else(terminal::height),
        ..options
    };
    let mut render_loop = RenderLoop::new(
        io::BufWriter::with_capacity(FRAME_BUFFER_SIZE, out),
        Arc::clone(&root),
        &options,
    );
    let inner = std::thread::spawn(move || {
        log::trace!("render loop started");
        let res = render_loop.run();
        log::trace!("render loop stopped after drawing the final frame");
        res
    });
    (
        Interactive::new(Arc::clone(&root)),
        JoinHandle {
            root,
            inner: Some(inner),
        },
    )
}
