use scopeview::{
    event::{Event, Message, ScopeFinished, ScopeStarted},
    render::{Discard, Renderer},
    Level, Logger, Outcome, ScopePath,
};
use std::sync::{Arc, Mutex};

#[derive(Default, Clone)]
struct Recorder {
    events: Arc<Mutex<Vec<Event>>>,
}

impl Recorder {
    fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }
}

impl Renderer for Recorder {
    fn scope_started(&mut self, event: &ScopeStarted) {
        self.events.lock().unwrap().push(Event::ScopeStarted(event.clone()));
    }

    fn scope_finished(&mut self, event: &ScopeFinished) {
        self.events.lock().unwrap().push(Event::ScopeFinished(event.clone()));
    }

    fn message(&mut self, event: &Message) {
        self.events.lock().unwrap().push(Event::Message(event.clone()));
    }
}

fn messages(events: &[Event]) -> Vec<(String, String)> {
    events
        .iter()
        .filter_map(|e| match e {
            Event::Message(m) => Some((m.path.to_string(), m.text.clone())),
            _ => None,
        })
        .collect()
}

#[test]
fn events_reach_the_renderer_in_order() {
    let recorder = Recorder::default();
    let (root, consumer) = Logger::new(Level::Info, recorder.clone());
    let build = root.scoped("build");
    build.info("compiling\n");
    let link = build.scoped("link");
    link.warn("slow\n");
    link.finish_with(Outcome::Skipped);
    build.finish(false);
    root.finish(true);
    drop((link, build, root));
    assert!(consumer.wait().is_some());

    let build_path = ScopePath::root().child("build");
    let link_path = build_path.child("link");
    let events = recorder.events();
    assert_eq!(events.len(), 7);
    assert!(matches!(&events[0], Event::ScopeStarted(e) if e.path == build_path));
    assert_eq!(
        events[1],
        Event::Message(Message {
            path: build_path.clone(),
            level: Level::Info,
            text: "compiling\n".into()
        })
    );
    assert!(matches!(&events[2], Event::ScopeStarted(e) if e.path == link_path));
    assert!(matches!(&events[3], Event::Message(m) if m.level == Level::Warn && m.path == link_path));
    assert_eq!(
        events[4],
        Event::ScopeFinished(ScopeFinished {
            path: link_path,
            outcome: Outcome::Skipped
        })
    );
    assert_eq!(
        events[5],
        Event::ScopeFinished(ScopeFinished {
            path: build_path,
            outcome: Outcome::Failed
        })
    );
    assert_eq!(
        events[6],
        Event::ScopeFinished(ScopeFinished {
            path: ScopePath::root(),
            outcome: Outcome::Succeeded
        })
    );
}

#[test]
fn messages_above_the_configured_level_are_dropped() {
    let recorder = Recorder::default();
    let (root, consumer) = Logger::new(Level::Warn, recorder.clone());
    assert!(root.is_enabled(Level::Error));
    assert!(!root.is_enabled(Level::Info));
    let job = root.scoped("job");
    assert_eq!(job.level(), Level::Warn, "scoped loggers inherit the level");
    job.error("e\n");
    job.warn("w\n");
    job.info("i\n");
    job.debug("d\n");
    job.trace("t\n");
    job.log_fmt(Level::Debug, format_args!("{}", "never formatted"));
    job.log_fmt(Level::Warn, format_args!("{}-{}\n", 1, 2));
    drop((job, root));
    consumer.wait();

    assert_eq!(
        messages(&recorder.events()),
        vec![
            ("job".to_string(), "e\n".to_string()),
            ("job".into(), "w\n".into()),
            ("job".into(), "1-2\n".into())
        ]
    );
}

#[test]
fn events_of_each_logger_keep_their_order_across_threads() {
    const THREADS: usize = 8;
    const SCOPES: usize = 20;
    const MESSAGES: usize = 5;

    let recorder = Recorder::default();
    let (root, consumer) = Logger::new(Level::Trace, recorder.clone());
    let threads: Vec<_> = (0..THREADS)
        .map(|t| {
            let root = root.clone();
            std::thread::spawn(move || {
                let worker = root.scoped(format!("worker {}", t));
                for s in 0..SCOPES {
                    let scope = worker.scoped(format!("scope {}", s));
                    for m in 0..MESSAGES {
                        scope.debug(format!("{}\n", m));
                    }
                    scope.finish(true);
                }
                worker.finish(true);
            })
        })
        .collect();
    for thread in threads {
        thread.join().expect("no panic");
    }
    root.finish(true);
    drop(root);
    consumer.wait();

    let events = recorder.events();
    assert_eq!(
        events.len(),
        THREADS * (2 + SCOPES * (2 + MESSAGES)) + 1,
        "nothing is lost or duplicated"
    );
    assert!(
        matches!(events.last(), Some(Event::ScopeFinished(e)) if e.path.is_root()),
        "the root finished after all workers were joined"
    );

    for t in 0..THREADS {
        let worker = ScopePath::root().child(format!("worker {}", t));
        let of_worker: Vec<_> = events.iter().filter(|e| e.path().starts_with(&worker)).collect();
        assert!(matches!(of_worker.first(), Some(Event::ScopeStarted(e)) if e.path == worker));
        assert!(matches!(of_worker.last(), Some(Event::ScopeFinished(e)) if e.path == worker));
        for s in 0..SCOPES {
            let scope = worker.child(format!("scope {}", s));
            let texts: Vec<_> = of_worker
                .iter()
                .filter(|e| e.path() == &scope)
                .map(|e| match e {
                    Event::ScopeStarted(_) => "start".to_string(),
                    Event::Message(m) => m.text.clone(),
                    Event::ScopeFinished(_) => "finish".to_string(),
                })
                .collect();
            assert_eq!(texts, ["start", "0\n", "1\n", "2\n", "3\n", "4\n", "finish"]);
        }
    }
}

#[test]
fn the_consumer_stops_only_once_all_loggers_are_dropped() {
    let (root, consumer) = Logger::new(Level::Info, Discard);
    let job = root.scoped("job");
    drop(root);
    let late = std::thread::spawn(move || {
        std::thread::sleep(std::time::Duration::from_millis(20));
        job.info("still here\n");
        job.finish(true);
    });
    assert!(consumer.wait().is_some());
    late.join().expect("no panic");
}

#[test]
fn a_panicking_renderer_yields_no_renderer_and_doesnt_affect_loggers() {
    struct Panicking;
    impl Renderer for Panicking {
        fn scope_started(&mut self, _event: &ScopeStarted) {
            panic!("renderer failure")
        }
        fn scope_finished(&mut self, _event: &ScopeFinished) {}
        fn message(&mut self, _event: &Message) {}
    }

    let (root, consumer) = Logger::new(Level::Info, Panicking);
    let job = root.scoped("job");
    std::thread::sleep(std::time::Duration::from_millis(20));
    job.info("goes nowhere\n");
    job.finish(true);
    drop((job, root));
    assert!(consumer.wait().is_none());
}
