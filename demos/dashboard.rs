#![deny(unsafe_code)]

fn main() -> Result {
    env_logger::init();

    let args: args::Options = argh::from_env();
    let tree = TreeOptions {
        max_description_lines: Some(args.message_scrollback_buffer_size),
        ..TreeOptions::default()
    };
    let options = interactive::Options {
        tree: tree.clone(),
        refresh_interval: Duration::from_secs_f32(1.0 / args.fps.max(0.1)),
        ..interactive::Options::default()
    };

    let renderer = args.renderer.clone().unwrap_or_else(|| "auto".into());
    let (renderer, drawing) = match renderer.as_str() {
        "auto" => {
            let (renderer, drawing) = render::stdout(options);
            (Box::new(renderer) as Box<dyn Renderer + Send>, drawing)
        }
        "interactive" => {
            let (renderer, drawing) = interactive::render(std::io::stdout(), options);
            (Box::new(renderer) as Box<dyn Renderer + Send>, Some(drawing))
        }
        "simple" => {
            let renderer = render::Simple::new(
                std::io::stdout(),
                simple::Options {
                    colors: tree.colors,
                    timestamp: args.timestamp,
                    ..simple::Options::default()
                },
            );
            (Box::new(renderer) as Box<dyn Renderer + Send>, None)
        }
        "log" => (Box::new(render::Log::new(args.log_max_level)) as Box<dyn Renderer + Send>, None),
        unknown => return Err(format!("unknown renderer: '{}'", unknown).into()),
    };

    let level = if args.verbose { Level::Debug } else { Level::Info };
    let (root, consumer) = Logger::new(level, renderer);
    let preparation = root.scoped("preparation");
    preparation.info("warming up\n");
    std::thread::sleep(scaled(Duration::from_millis(500), args.speed_multiplier));
    preparation.finish(true);

    let workers: Vec<_> = (0..args.chunks)
        .map(|chunk| {
            let root = root.clone();
            let speed = args.speed_multiplier;
            let max_level = thread_rng().gen_range(1..=args.max_level.max(1));
            std::thread::spawn(move || new_chunk_of_work(chunk + 1, max_level, &root, speed))
        })
        .collect();
    let mut failures = 0;
    for worker in workers {
        if !worker.join().unwrap_or(false) {
            failures += 1;
        }
    }
    root.finish(failures == 0);
    drop((preparation, root));

    consumer.wait().ok_or("the renderer panicked")?;
    if let Some(drawing) = drawing {
        drawing.wait()?;
    }
    if failures > 0 {
        log::info!("{} of {} chunks of work failed", failures, args.chunks);
    }
    Ok(())
}

/// Run all work items of one chunk, nested `max_level` levels deep, and return true if all of them succeeded.
fn new_chunk_of_work(id: usize, max_level: usize, root: &Logger, speed: f32) -> bool {
    let chunk = root.scoped(format!("chunk {}", id));
    let mut levels = vec![chunk.clone()];
    let mut success = true;
    for level in 1..=max_level {
        let parent = levels.last().cloned().unwrap_or_else(|| chunk.clone());
        let items: Vec<_> = (0..level * 2)
            .map(|item| {
                let name = format!("{} {}", WORK_NAMES.choose(&mut thread_rng()).unwrap_or(&"work"), item + 1);
                let progress = parent.scoped(name);
                std::thread::spawn(move || work_item(progress, speed))
            })
            .collect();
        for item in items {
            success &= item.join().unwrap_or(false);
        }
        if level != max_level {
            levels.push(parent.scoped(format!("level {}", level + 1)));
        }
    }
    for level in levels.iter().rev() {
        level.finish(success);
    }
    success
}

fn work_item(progress: Logger, speed: f32) -> bool {
    let steps: u8 = thread_rng().gen_range(5..=25);
    for step in 0..steps {
        if thread_rng().gen_bool(CHANCE_TO_LOG_PER_STEP) {
            progress.info(format!("{}\n", INFO_MESSAGES.choose(&mut thread_rng()).unwrap_or(&"…")));
        }
        progress.log_fmt(Level::Debug, format_args!("step {} of {}\n", step + 1, steps));
        let delay = thread_rng().gen_range(SHORT_DELAY_MS..=WORK_DELAY_MS);
        std::thread::sleep(scaled(Duration::from_millis(delay), speed));
    }
    if thread_rng().gen_bool(CHANCE_TO_SKIP) {
        progress.finish_with(Outcome::Skipped);
        true
    } else if thread_rng().gen_bool(CHANCE_TO_SUCCEED) {
        progress.info(format!("{}\n", DONE_MESSAGES.choose(&mut thread_rng()).unwrap_or(&"done")));
        progress.finish(true);
        true
    } else {
        progress.error(format!("{}\n", FAIL_MESSAGES.choose(&mut thread_rng()).unwrap_or(&"failed")));
        progress.finish(false);
        false
    }
}

fn scaled(duration: Duration, speed: f32) -> Duration {
    duration.div_f32(speed.max(0.01))
}

type Result = std::result::Result<(), Box<dyn Error + Send + Sync>>;

use rand::prelude::*;
use scopeview::{
    render::{self, interactive, simple, Renderer},
    Level, Logger, Outcome, TreeOptions,
};
use std::{error::Error, time::Duration};

const WORK_NAMES: &[&str] = &[
    "Downloading Crate",
    "下载板条箱",
    "Running 'cargo geiger'",
    "Counting lines of code",
    "计数代码行",
    "Checking for unused dependencies",
    "Generating report",
];
const DONE_MESSAGES: &[&str] = &["Yeeeehaa! Finally!!", "呀！ 最后！", "It feels good to be done!", "Told you so!!"];
const FAIL_MESSAGES: &[&str] = &[
    "That didn't seem to work!",
    "Oh my… I failed you 😞",
    "This didn't end well…\nand here is why:\n  the stars weren't aligned",
];
const INFO_MESSAGES: &[&str] = &["Making good progress!", "进展良好！", "Humming along…", "It will be done soooooon…"];
const SHORT_DELAY_MS: u64 = 20;
const WORK_DELAY_MS: u64 = 150;
const CHANCE_TO_LOG_PER_STEP: f64 = 1.0 / 8.0;
const CHANCE_TO_SKIP: f64 = 0.05;
const CHANCE_TO_SUCCEED: f64 = 0.9;

mod args {
    use argh::FromArgs;

    #[derive(FromArgs)]
    /// Watch nested scopes of work come and go.
    pub struct Options {
        /// the amount of frames to show per second, e.g. 0.5 shows a frame every 2 seconds.
        #[argh(option, default = "5.0")]
        pub fps: f32,

        /// the amount of most recent messages each scope keeps.
        #[argh(option, default = "80")]
        pub message_scrollback_buffer_size: usize,

        /// the amount of chunks of work to run in parallel.
        #[argh(option, short = 'n', default = "4")]
        pub chunks: usize,

        /// the deepest level at which chunks of work nest their items.
        #[argh(option, short = 'l', default = "3")]
        pub max_level: usize,

        /// multiplies the speed at which work seems to be done. A value of 0.5 halves the speed.
        #[argh(option, short = 's', default = "1.0")]
        pub speed_multiplier: f32,

        /// if set, debug messages are shown as well.
        #[argh(switch, short = 'v')]
        pub verbose: bool,

        /// for the 'simple' renderer: show a timestamp before each line.
        #[argh(switch)]
        pub timestamp: bool,

        /// for the 'log' renderer: the deepest scope whose start and end is logged.
        #[argh(option)]
        pub log_max_level: Option<usize>,

        /// set the renderer to use, defaults to "auto", and furthermore allows "interactive", "simple" and "log".
        ///
        /// If set to "log", set 'RUST_LOG=info' before running the program to see anything.
        #[argh(option, short = 'R')]
        pub renderer: Option<String>,
    }
}
