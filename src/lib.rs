#![deny(unsafe_code, missing_docs)]

/*!
Scopeview shows the progress of nested scopes of work, along with their log messages, as a tree that is redrawn
in place in the terminal.

It consists of three parts

* a [`Logger`] to open scopes, log messages into them and finish them, from any amount of threads
* [renderers][render::Renderer] receiving these events one at a time, in order
* the [interactive renderer][render::interactive] which keeps a [tree of nodes][tree::Node] and draws it
  periodically, only redrawing [the lines that changed][terminal::diff] since the last frame

```rust,no_run
use scopeview::{render::interactive, Level, Logger};

let (renderer, drawing) = interactive::render(std::io::stdout(), interactive::Options::default());
let (log, consumer) = Logger::new(Level::Info, renderer);
let job = log.scoped("job");
job.info("doing very important things\n");
job.finish(true);
log.finish(true);
drop((job, log));
consumer.wait();
drawing.wait()?;
# Ok::<_, std::io::Error>(())
```

# Logging

The crate itself logs through the `log` crate, and with the `render-log` feature (default) events can be sent to it
using [`render::Log`]. Please note that logging to stdout while the interactive renderer draws into it will seriously
interfere with the display.

# A demo application

Run it with `cargo run --example dashboard` and see what else it can do with `cargo run --example dashboard -- --help`.
*/

mod config;
pub use config::TreeOptions;

pub mod event;
#[doc(inline)]
pub use event::{Level, Outcome, ScopePath};

mod logger;
pub use logger::{JoinHandle, Logger};

pub mod render;
pub mod terminal;
pub mod time;
pub mod tree;
