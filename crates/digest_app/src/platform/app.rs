use std::io::{self, BufRead, Write};
use std::sync::{mpsc, Arc};
use std::thread;

use anyhow::Context;
use digest_core::{update, AppState, Msg};
use digest_engine::{EngineHandle, FileStorage, HistoryStore, KeyValueStorage, Osc52Clipboard};
use digest_logging::{digest_info, digest_warn};

use super::effects::{self, EffectRunner};
use super::logging::{self, LogDestination};
use super::ui::constants::{BUSY_NOTICE, HELP_TEXT, PROMPT};
use super::ui::input::{parse_command, Command};
use super::ui::render::render;
use super::{config, persistence};

pub fn run_app() -> anyhow::Result<()> {
    let config = config::load().context("loading configuration")?;
    let destination = if config.log_to_terminal {
        LogDestination::Both
    } else {
        LogDestination::File
    };
    logging::initialize(destination, &config.log_file);
    digest_info!(
        "Starting digest endpoint={} data_dir={:?}",
        config.endpoint,
        config.data_dir
    );
    if config.api_key.is_none() {
        digest_warn!("No API key configured; the summary API will likely reject requests");
    }

    let engine = Arc::new(
        EngineHandle::new(config.summary_settings()).context("starting summary engine")?,
    );
    let history = HistoryStore::new(FileStorage::new(&config.data_dir));
    let runner = EffectRunner::new(engine.clone(), history, Arc::new(Osc52Clipboard::stdout()));

    let (tx, rx) = mpsc::channel::<AppEvent>();
    effects::spawn_event_forwarder(engine.clone(), tx.clone(), AppEvent::Core);
    spawn_stdin_reader(tx);

    let mut app = App::new(runner, io::stdout());
    let result = app.start().and_then(|()| app.run(&rx));
    engine.shutdown();
    digest_info!("Exiting digest");
    result.context("terminal io")
}

enum AppEvent {
    Core(Msg),
    Line(String),
    InputClosed,
}

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

struct App<S, W> {
    state: AppState,
    runner: EffectRunner<S>,
    out: W,
}

impl<S: KeyValueStorage, W: Write> App<S, W> {
    fn new(runner: EffectRunner<S>, out: W) -> Self {
        Self {
            state: AppState::new(),
            runner,
            out,
        }
    }

    fn start(&mut self) -> io::Result<()> {
        let articles = persistence::load_history(self.runner.history());
        self.dispatch(Msg::HistoryLoaded(articles));
        self.render()
    }

    fn run(&mut self, rx: &mpsc::Receiver<AppEvent>) -> io::Result<()> {
        while let Ok(event) = rx.recv() {
            match event {
                AppEvent::Core(msg) => {
                    if self.dispatch(msg) {
                        self.render()?;
                    }
                }
                AppEvent::Line(line) => {
                    if self.handle_command(parse_command(&line))? == Flow::Quit {
                        break;
                    }
                }
                AppEvent::InputClosed => break,
            }
        }
        Ok(())
    }

    /// Applies `msg`, runs its effects and reports whether a redraw is due.
    fn dispatch(&mut self, msg: Msg) -> bool {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        self.runner.run(effects);
        let dirty = state.consume_dirty();
        self.state = state;
        dirty
    }

    fn handle_command(&mut self, command: Command) -> io::Result<Flow> {
        match command {
            Command::Submit(url) => {
                if self.state.is_fetching() {
                    digest_info!("Submit of {} rejected: a request is in flight", url);
                    return self.notice(BUSY_NOTICE);
                }
                self.dispatch(Msg::InputChanged(url));
                self.dispatch(Msg::UrlSubmitted);
                self.render()?;
            }
            Command::Open(position) => {
                if self.dispatch(Msg::HistorySelected {
                    index: position - 1,
                }) {
                    self.render()?;
                } else {
                    return self.notice(&format!("No history entry {position}."));
                }
            }
            Command::Copy(position) => {
                if self.dispatch(Msg::CopyClicked {
                    index: position - 1,
                }) {
                    self.render()?;
                } else {
                    return self.notice(&format!("No history entry {position}."));
                }
            }
            Command::Show => self.render()?,
            Command::Help => return self.notice(HELP_TEXT),
            Command::Quit => return Ok(Flow::Quit),
            Command::Empty => self.prompt()?,
            Command::Unknown(text) => {
                return self.notice(&format!("Unknown command `{text}`; type `help`."));
            }
        }
        Ok(Flow::Continue)
    }

    fn render(&mut self) -> io::Result<()> {
        let screen = render(&self.state.view());
        writeln!(self.out)?;
        write!(self.out, "{screen}")?;
        self.prompt()
    }

    fn notice(&mut self, text: &str) -> io::Result<Flow> {
        writeln!(self.out, "{text}")?;
        self.prompt()?;
        Ok(Flow::Continue)
    }

    fn prompt(&mut self) -> io::Result<()> {
        write!(self.out, "{PROMPT}")?;
        self.out.flush()
    }
}

fn spawn_stdin_reader(tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else {
                break;
            };
            if tx.send(AppEvent::Line(line)).is_err() {
                return;
            }
        }
        let _ = tx.send(AppEvent::InputClosed);
    });
}

#[cfg(test)]
mod tests {
    use std::sync::{mpsc, Arc, Once};
    use std::time::Duration;

    use digest_core::{Article, FetchStatus, ResultPanel};
    use digest_engine::{
        EngineHandle, FailureKind, FetchError, HistoryStore, MemoryClipboard, MemoryStorage,
        SummaryClient, HISTORY_KEY,
    };
    use pretty_assertions::assert_eq;

    use super::{App, AppEvent, Flow};
    use crate::platform::effects::{spawn_event_forwarder, EffectRunner};
    use crate::platform::persistence::load_history;
    use crate::platform::ui::input::Command;

    struct FakeApi;

    #[async_trait::async_trait]
    impl SummaryClient for FakeApi {
        async fn fetch_summary(&self, article_url: &str) -> Result<String, FetchError> {
            if article_url.contains("fail") {
                return Err(FetchError {
                    kind: FailureKind::HttpStatus(500),
                    message: "upstream unavailable".to_string(),
                });
            }
            if article_url.contains("slow") {
                tokio::time::sleep(Duration::from_millis(300)).await;
            }
            Ok(format!("summary:{article_url}"))
        }
    }

    type TestApp = App<MemoryStorage, Vec<u8>>;

    struct Harness {
        app: TestApp,
        rx: mpsc::Receiver<AppEvent>,
        clipboard: Arc<MemoryClipboard>,
        engine: Arc<EngineHandle>,
    }

    impl Drop for Harness {
        fn drop(&mut self) {
            self.engine.shutdown();
        }
    }

    fn init_logging() {
        static INIT: Once = Once::new();
        INIT.call_once(digest_logging::initialize_for_tests);
    }

    fn harness(storage: MemoryStorage) -> Harness {
        init_logging();
        let engine = Arc::new(EngineHandle::with_client(Arc::new(FakeApi)).unwrap());
        let clipboard = Arc::new(MemoryClipboard::new());
        let runner = EffectRunner::new(
            engine.clone(),
            HistoryStore::new(storage),
            clipboard.clone(),
        );
        let (tx, rx) = mpsc::channel();
        spawn_event_forwarder(engine.clone(), tx, AppEvent::Core);

        let mut app = App::new(runner, Vec::new());
        app.start().unwrap();
        Harness {
            app,
            rx,
            clipboard,
            engine,
        }
    }

    impl Harness {
        fn submit(&mut self, url: &str) {
            let flow = self
                .app
                .handle_command(Command::Submit(url.to_string()))
                .unwrap();
            assert_eq!(flow, Flow::Continue);
        }

        /// Delivers the next engine event to the app, redrawing like `run` does.
        fn pump(&mut self) {
            match self.rx.recv_timeout(Duration::from_secs(5)) {
                Ok(AppEvent::Core(msg)) => {
                    if self.app.dispatch(msg) {
                        self.app.render().unwrap();
                    }
                }
                Ok(_) => panic!("unexpected non-core event"),
                Err(err) => panic!("no engine event: {err}"),
            }
        }

        fn persisted(&self) -> Vec<Article> {
            load_history(self.app.runner.history())
        }

        fn output(&self) -> String {
            String::from_utf8_lossy(&self.app.out).into_owned()
        }
    }

    #[test]
    fn successful_submit_is_persisted_as_head() {
        let mut h = harness(MemoryStorage::new());
        h.submit("https://news.example.com/one");
        h.pump();
        h.submit("https://news.example.com/two");
        h.pump();

        let expected_head = Article::new(
            "https://news.example.com/two",
            "summary:https://news.example.com/two",
        );
        assert_eq!(h.app.state.article(), &expected_head);
        assert_eq!(h.app.state.history().len(), 2);
        assert_eq!(h.persisted(), h.app.state.history().to_vec());
        assert_eq!(h.persisted()[0], expected_head);
        assert!(h.output().contains("summary:https://news.example.com/two"));
    }

    #[test]
    fn failed_submit_leaves_storage_untouched() {
        let seeded = r#"[{"url":"https://old.example.com","summary":"old"}]"#;
        let mut h = harness(MemoryStorage::with_item(HISTORY_KEY, seeded));
        h.submit("https://news.example.com/fail");
        h.pump();

        assert!(matches!(h.app.state.status(), FetchStatus::Error(_)));
        assert_eq!(
            h.app.state.view().panel,
            ResultPanel::Error {
                heading: digest_core::ERROR_HEADING.to_string(),
                detail: "upstream unavailable".to_string(),
            }
        );
        assert_eq!(h.persisted(), vec![Article::new("https://old.example.com", "old")]);
        assert!(h.output().contains("upstream unavailable"));
    }

    #[test]
    fn second_submit_while_busy_is_refused() {
        let mut h = harness(MemoryStorage::new());
        h.submit("https://news.example.com/slow");
        h.submit("https://news.example.com/other");
        assert!(h.output().contains(super::BUSY_NOTICE));

        h.pump();
        assert_eq!(h.app.state.history().len(), 1);
        assert_eq!(h.app.state.history()[0].url, "https://news.example.com/slow");
    }

    #[test]
    fn open_and_copy_use_stored_entries() {
        let seeded = r#"[{"url":"https://b.example.com","summary":"bee"},{"url":"https://a.example.com","summary":"ay"}]"#;
        let mut h = harness(MemoryStorage::with_item(HISTORY_KEY, seeded));

        h.app.handle_command(Command::Open(2)).unwrap();
        assert_eq!(h.app.state.article(), &Article::new("https://a.example.com", "ay"));

        h.app.handle_command(Command::Copy(1)).unwrap();
        assert_eq!(h.clipboard.contents().as_deref(), Some("https://b.example.com"));
        assert!(h.output().contains("[copied] https://b.example.com"));

        h.app.handle_command(Command::Copy(7)).unwrap();
        assert!(h.output().contains("No history entry 7."));
        assert_eq!(h.clipboard.write_count(), 1);
    }

    #[test]
    fn malformed_storage_starts_empty() {
        let h = harness(MemoryStorage::with_item(HISTORY_KEY, "{oops"));
        assert!(h.app.state.history().is_empty());
        assert!(h.output().contains("(no articles yet)"));
    }

    #[test]
    fn quit_stops_the_loop() {
        let mut h = harness(MemoryStorage::new());
        assert_eq!(h.app.handle_command(Command::Quit).unwrap(), Flow::Quit);
    }
}
