use scopeview::{
    render::interactive::{self, Interactive, RenderLoop},
    tree::Node,
    Level, Logger, Outcome, TreeOptions,
};
use std::{
    io,
    sync::{Arc, Mutex},
    time::Duration,
};

fn options() -> interactive::Options {
    interactive::Options {
        tree: TreeOptions {
            colored: false,
            ..TreeOptions::symbols()
        },
        refresh_interval: Duration::from_millis(5),
        terminal_height: None,
        disable_auto_wrap: true,
    }
}

/// An output which can be inspected while the render thread owns it.
#[derive(Default, Clone)]
struct SharedOutput(Arc<Mutex<Vec<u8>>>);

impl SharedOutput {
    fn text(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).expect("valid utf8")
    }
}

impl io::Write for SharedOutput {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn tree_of(options: &interactive::Options) -> Arc<Node> {
    Arc::new(Node::root(Arc::new(options.tree.clone())))
}

mod render_loop {
    use super::*;

    #[test]
    fn final_frame_reflects_all_events_and_auto_wrap_is_restored() -> io::Result<()> {
        let options = options();
        let root = tree_of(&options);
        let (log, consumer) = Logger::new(Level::Info, Interactive::new(Arc::clone(&root)));
        let build = log.scoped("build");
        build.info("compiling\n");
        build.finish(true);
        let test = log.scoped("test");
        test.info("case 1 failed\ncase 2 failed\n");
        test.finish(false);
        let docs = log.scoped("docs");
        docs.info("writing\n");
        log.finish(true);
        drop((build, test, docs, log));
        consumer.wait().expect("renderer didn't panic");

        let mut render_loop = RenderLoop::new(Vec::new(), Arc::clone(&root), &options);
        render_loop.run()?;

        let frame = render_loop.frame().to_vec();
        assert_eq!(frame.len(), 6, "{:?}", frame);
        assert!(frame[0].starts_with("+ build "), "succeeded scopes collapse");
        assert!(frame[1].starts_with("- test "));
        assert_eq!(&frame[2..4], ["  case 1 failed", "  case 2 failed"]);
        assert!(frame[4].contains(" docs "), "the root finishing doesn't finish its children");
        assert!(!frame[4].starts_with(". ") && !frame[4].starts_with("+ "));
        assert_eq!(frame[5], "  writing", "the empty line to continue on isn't shown");

        let out = String::from_utf8(render_loop.into_inner()).expect("valid utf8");
        assert!(out.starts_with("\x1b[?7l"), "{:?}", out);
        assert!(out.ends_with("\x1b[?7h"), "{:?}", out);
        Ok(())
    }

    #[test]
    fn auto_wrap_is_untouched_if_configured() -> io::Result<()> {
        let options = interactive::Options {
            disable_auto_wrap: false,
            ..options()
        };
        let root = tree_of(&options);
        root.start_new_child("task").complete_with(Outcome::Skipped);
        let mut render_loop = RenderLoop::new(Vec::new(), Arc::clone(&root), &options);
        render_loop.stop()?;
        assert!(root.has_completed(), "stopping completes the root");

        let out = String::from_utf8(render_loop.into_inner()).expect("valid utf8");
        assert!(!out.contains("\x1b[?7"), "{:?}", out);
        assert!(out.starts_with("\r! task "), "{:?}", out);
        Ok(())
    }

    #[test]
    fn unchanged_frames_produce_no_output() -> io::Result<()> {
        let options = options();
        let root = tree_of(&options);
        let task = root.find_or_create_child("task");
        task.append_description("line\n");
        let mut render_loop = RenderLoop::new(Vec::new(), Arc::clone(&root), &options);
        render_loop.draw_frame()?;
        let first = render_loop.frame().to_vec();
        render_loop.draw_frame()?;
        assert_eq!(render_loop.frame(), first.as_slice());

        let out = render_loop.into_inner();
        assert_eq!(
            String::from_utf8(out).expect("valid utf8"),
            format!("\r{}\n{}\n", first[0], first[1])
        );
        Ok(())
    }

    #[test]
    fn frames_are_bounded_by_the_terminal_height() -> io::Result<()> {
        let options = interactive::Options {
            terminal_height: Some(2),
            disable_auto_wrap: false,
            ..options()
        };
        let root = tree_of(&options);
        for name in ["a", "b", "c"] {
            root.find_or_create_child(name);
        }
        let mut render_loop = RenderLoop::new(Vec::new(), Arc::clone(&root), &options);
        render_loop.draw_frame()?;
        assert_eq!(render_loop.frame().len(), 3, "the whole frame is kept");

        let out = String::from_utf8(render_loop.into_inner()).expect("valid utf8");
        assert!(!out.contains(". a "), "lines out of view are not drawn: {:?}", out);
        assert!(out.contains(". b ") && out.contains(". c "), "{:?}", out);
        Ok(())
    }
}

mod render_thread {
    use super::*;

    #[test]
    fn drawing_stops_once_the_root_logger_finishes() -> io::Result<()> {
        let out = SharedOutput::default();
        let (renderer, drawing) = interactive::render(out.clone(), options());
        let (log, consumer) = Logger::new(Level::Info, renderer);
        let threads: Vec<_> = (0..4)
            .map(|id| {
                let log = log.clone();
                std::thread::spawn(move || {
                    let job = log.scoped(format!("job {}", id));
                    for step in 0..10 {
                        job.info(format!("step {}\n", step));
                        std::thread::sleep(Duration::from_millis(1));
                    }
                    job.finish(id % 2 == 0);
                })
            })
            .collect();
        for thread in threads {
            thread.join().expect("no panic");
        }
        log.finish(true);
        drop(log);
        let renderer = consumer.wait().expect("renderer didn't panic");
        drawing.wait()?;

        let root = renderer.root();
        assert!(root.has_completed());
        assert_eq!(root.children().len(), 4);
        let mut titles: Vec<_> = root.children().iter().map(|child| child.title()).collect();
        titles.sort();
        assert_eq!(titles, ["job 0", "job 1", "job 2", "job 3"].map(String::from));
        assert!(root.children().iter().all(|child| child.has_completed()));

        let text = out.text();
        assert!(text.starts_with("\x1b[?7l"), "{:?}", text);
        assert!(text.ends_with("\x1b[?7h"), "{:?}", text);
        Ok(())
    }

    #[test]
    fn stopping_completes_the_root_right_away() -> io::Result<()> {
        let out = SharedOutput::default();
        let (renderer, drawing) = interactive::render(
            out.clone(),
            interactive::Options {
                refresh_interval: Duration::from_secs(60),
                ..options()
            },
        );
        let root = Arc::clone(renderer.root());
        let (log, _consumer) = Logger::new(Level::Info, renderer);
        let _job = log.scoped("endless");
        drawing.stop()?;
        assert!(root.has_completed());
        assert!(out.text().ends_with("\x1b[?7h"));
        Ok(())
    }

    #[test]
    fn dropping_the_handle_waits_for_the_final_frame() {
        let out = SharedOutput::default();
        let (renderer, drawing) = interactive::render(
            out.clone(),
            interactive::Options {
                refresh_interval: Duration::from_secs(60),
                ..options()
            },
        );
        let root = Arc::clone(renderer.root());
        drop(drawing);
        assert!(root.has_completed());
        assert!(out.text().ends_with("\x1b[?7h"));
    }
}
