use std::io::BufRead;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tracker_core::{update, AppState, AppViewModel, Effect, FixedAnswer, Msg};
use tracker_engine::{EngineHandle, ReqwestTrackerApi};
use tracker_logging::{tracker_info, tracker_warn};

use super::config::{self, AppConfig};
use super::confirm::LineConfirmation;
use super::effects::EffectRunner;
use super::logging;
use super::ui::commands::{self, UserCommand, HELP};
use super::ui::render;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Loads configuration, wires the engine and runs the terminal loop until
/// the user quits or input closes.
pub fn run_app() -> anyhow::Result<()> {
    let path = config::config_path();
    let (config, config_problem) = match config::load_config(&path) {
        Ok(config) => (config, None),
        Err(err) => (AppConfig::default(), Some(err)),
    };
    logging::initialize(config.log_destination);
    if let Some(err) = config_problem {
        tracker_warn!("{}; using defaults", err);
        eprintln!("Warning: {err}; using defaults");
    }

    let settings = config.api_settings()?;
    tracker_info!("Job tracker client for {}", settings.base_url);
    let base_url = settings.base_url.clone();
    let api = Arc::new(ReqwestTrackerApi::new(settings)?);
    let engine = EngineHandle::new(api);

    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let runner = EffectRunner::new(engine, base_url, msg_tx);
    let lines = spawn_input_reader();

    println!("{HELP}");
    runner.enqueue(vec![Effect::Navigate {
        target: config.start_path.clone(),
    }]);

    let mut app = App::new(runner, config.confirm_deletes);
    app.run(&msg_rx, &lines);
    tracker_info!("Job tracker client exiting");
    Ok(())
}

fn spawn_input_reader() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

struct App {
    state: AppState,
    runner: EffectRunner,
    confirm_deletes: bool,
    last_view: Option<AppViewModel>,
}

impl App {
    fn new(runner: EffectRunner, confirm_deletes: bool) -> Self {
        Self {
            state: AppState::new(),
            runner,
            confirm_deletes,
            last_view: None,
        }
    }

    fn run(&mut self, msg_rx: &mpsc::Receiver<Msg>, lines: &mpsc::Receiver<String>) {
        loop {
            while let Ok(msg) = msg_rx.try_recv() {
                self.dispatch(msg, lines);
            }
            match lines.recv_timeout(POLL_INTERVAL) {
                Ok(line) => {
                    if self.handle_line(&line, lines) == Flow::Quit {
                        break;
                    }
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    }

    fn handle_line(&mut self, line: &str, lines: &mpsc::Receiver<String>) -> Flow {
        let command = match commands::parse_command(line) {
            Ok(command) => command,
            Err(problem) => {
                if !problem.is_empty() {
                    println!("{problem}");
                }
                return Flow::Continue;
            }
        };

        match command {
            UserCommand::Quit => return Flow::Quit,
            UserCommand::Help => println!("{HELP}"),
            UserCommand::Show => print_lines(&render::render_page(&self.state.view())),
            command => match commands::messages_for(command, &self.state.view()) {
                Ok(msgs) => {
                    for msg in msgs {
                        self.dispatch(msg, lines);
                    }
                }
                Err(problem) => println!("{problem}"),
            },
        }
        Flow::Continue
    }

    fn dispatch(&mut self, msg: Msg, lines: &mpsc::Receiver<String>) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = if self.confirm_deletes {
            update(state, msg, &LineConfirmation::new(lines))
        } else {
            update(state, msg, &FixedAnswer(true))
        };
        self.state = state;
        self.runner.enqueue(effects);

        if self.state.consume_dirty() {
            let view = self.state.view();
            print_lines(&render::render(&view, self.last_view.as_ref()));
            self.last_view = Some(view);
        }
    }
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}
