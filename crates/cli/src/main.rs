//! Pipeline simulator dashboard CLI.
//!
//! This binary connects to a running simulator and draws its state in the terminal. It performs:
//! 1. **Interactive session:** Reads operator commands from stdin and redraws after each one,
//!    with an optional periodic refresh tick.
//! 2. **Scripted session:** Performs a fixed list of commands in order and exits non-zero if
//!    any of them failed.
//!
//! Rendered views go to stdout; logs and error banners go to stderr.

mod input;
mod sink;

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::mpsc::{self, Receiver, SyncSender, TryRecvError, TrySendError};
use std::time::Duration;
use std::{fs, thread};

use clap::{Parser, Subcommand};
use pipedash_core::link::{Command, TcpLink};
use pipedash_core::{Action, DashboardConfig, ViewCoordinator};
use tracing::{debug, error, info, trace, warn};
use tracing_subscriber::EnvFilter;

use crate::input::{Directive, USAGE};
use crate::sink::TerminalSink;

type Coordinator = ViewCoordinator<TcpLink, TerminalSink<io::Stdout, io::Stderr>>;

#[derive(Parser, Debug)]
#[command(
    name = "pipedash",
    author,
    version,
    about = "Operator dashboard for a remote pipeline simulator",
    long_about = "Drive a pipelined-processor simulator over TCP and draw its registers, \
                  pipeline stages, and memory after every command.\n\nExamples:\n  \
                  pipedash --address 127.0.0.1:8080\n  \
                  pipedash --tick-ms 500 repl\n  \
                  pipedash send reset 'load prog.s' run 'mem 16'"
)]
struct Cli {
    /// JSON configuration file; flags below override its values.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Simulator address (host:port).
    #[arg(short, long)]
    address: Option<String>,

    /// Periodic refresh interval in milliseconds; 0 disables it.
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Initial memory display line.
    #[arg(short, long)]
    line: Option<u32>,

    /// Log debug output (overridden by `RUST_LOG`).
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Interactive session reading commands from stdin (default).
    Repl,

    /// Perform the given commands in order, then exit.
    Send {
        /// Operator commands, one per argument (e.g. `advance`, `"mem 4"`).
        #[arg(required = true)]
        actions: Vec<String>,
    },
}

/// Events waiting for the session loop; a tick that finds the buffer full is dropped.
const EVENT_BACKLOG: usize = 1;

/// Events consumed by the session loop.
#[derive(Debug)]
enum Event {
    Line(String),
    Tick,
    Closed,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "startup failed");
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    info!(address = %config.link.address, "pipedash starting");
    let tick = config.refresh.tick_interval();
    let link = TcpLink::new(config.link.clone());
    let mut coordinator = ViewCoordinator::new(link, TerminalSink::stdio(), config);

    match cli.command.unwrap_or(Commands::Repl) {
        Commands::Repl => run_repl(&mut coordinator, tick),
        Commands::Send { actions } => run_script(&mut coordinator, &actions),
    }
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "pipedash=debug" } else { "pipedash=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Reads the configuration file (if any) and applies command-line overrides.
///
/// # Errors
///
/// Returns the file or validation error; overrides are validated together with the file.
fn load_config(cli: &Cli) -> pipedash_core::Result<DashboardConfig> {
    let mut config = match &cli.config {
        Some(path) => DashboardConfig::from_file(path)?,
        None => DashboardConfig::default(),
    };
    if let Some(address) = &cli.address {
        config.link.address.clone_from(address);
    }
    if let Some(tick_ms) = cli.tick_ms {
        config.refresh.tick_ms = (tick_ms > 0).then_some(tick_ms);
    }
    if let Some(line) = cli.line {
        config.layout.display_line = line;
    }
    config.validate()?;
    Ok(config)
}

fn run_repl(coordinator: &mut Coordinator, tick: Option<Duration>) -> ExitCode {
    let (tx, rx) = mpsc::sync_channel(EVENT_BACKLOG);
    spawn_stdin_reader(tx.clone());
    if let Some(interval) = tick {
        spawn_ticker(tx, interval);
    }

    println!("{USAGE}");
    submit(coordinator, Action::Refresh);
    let _ = coordinator.drain();

    loop {
        let Ok(first) = rx.recv() else {
            break;
        };
        let quit = batch(first, &rx)
            .into_iter()
            .any(|event| handle(coordinator, event));
        let failed = coordinator.drain();
        if failed > 0 {
            debug!(failed, "refresh batch finished with failures");
        }
        if quit {
            break;
        }
        prompt();
    }
    info!("session closed");
    ExitCode::SUCCESS
}

fn run_script(coordinator: &mut Coordinator, actions: &[String]) -> ExitCode {
    let mut ok = true;
    for line in actions {
        match input::parse(line) {
            Ok(Some(Directive::Quit)) => break,
            Ok(Some(Directive::Help)) => println!("{USAGE}"),
            Ok(Some(directive)) => {
                if let Some(action) = resolve(directive)
                    && coordinator.perform(action).is_err()
                {
                    ok = false;
                }
            }
            Ok(None) => {}
            Err(e) => {
                eprintln!("{e}");
                ok = false;
            }
        }
    }
    if ok && coordinator.sink().failures() == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Collects the first event plus everything already waiting in the channel.
fn batch(first: Event, rx: &Receiver<Event>) -> Vec<Event> {
    let mut events = vec![first];
    loop {
        match rx.try_recv() {
            Ok(event) => events.push(event),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => return events,
        }
    }
}

/// Turns one event into queued actions. Returns `true` when the session should end.
fn handle(coordinator: &mut Coordinator, event: Event) -> bool {
    match event {
        Event::Tick => {
            submit(coordinator, Action::Refresh);
            false
        }
        Event::Closed => true,
        Event::Line(line) => match input::parse(&line) {
            Ok(Some(Directive::Quit)) => true,
            Ok(Some(Directive::Help)) => {
                println!("{USAGE}");
                false
            }
            Ok(Some(directive)) => {
                if let Some(action) = resolve(directive) {
                    submit(coordinator, action);
                }
                false
            }
            Ok(None) => false,
            Err(e) => {
                eprintln!("{e}\n{USAGE}");
                false
            }
        },
    }
}

/// Converts a directive into an action, reading program files for `load`.
fn resolve(directive: Directive) -> Option<Action> {
    match directive {
        Directive::Act(action) => Some(action),
        Directive::Load(path) => read_program(&path).map(|src| Command::Load(src).into()),
        Directive::Help | Directive::Quit => None,
    }
}

fn read_program(path: &Path) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(source) => {
            debug!(path = %path.display(), bytes = source.len(), "program read");
            Some(source)
        }
        Err(e) => {
            eprintln!("cannot read {}: {e}", path.display());
            None
        }
    }
}

fn submit(coordinator: &mut Coordinator, action: Action) {
    if let Err(e) = coordinator.submit(action) {
        eprintln!("!! {e}");
    }
}

fn prompt() {
    print!("> ");
    if let Err(e) = io::stdout().flush() {
        warn!(error = %e, "stdout flush failed");
    }
}

fn spawn_stdin_reader(tx: SyncSender<Event>) {
    let _ = thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(Event::Line(line)).is_err() {
                        return;
                    }
                }
                Err(e) => {
                    warn!(error = %e, "stdin read failed");
                    break;
                }
            }
        }
        let _ = tx.send(Event::Closed);
    });
}

fn spawn_ticker(tx: SyncSender<Event>, interval: Duration) {
    debug!(interval_ms = interval.as_millis() as u64, "periodic refresh enabled");
    let _ = thread::spawn(move || {
        loop {
            thread::sleep(interval);
            if !offer_tick(&tx) {
                return;
            }
        }
    });
}

/// Queues a tick unless the session loop is still busy. Returns `false` once the loop is gone.
fn offer_tick(tx: &SyncSender<Event>) -> bool {
    match tx.try_send(Event::Tick) {
        Ok(()) => true,
        Err(TrySendError::Full(_)) => {
            trace!("session busy, dropping tick");
            true
        }
        Err(TrySendError::Disconnected(_)) => false,
    }
}
