//! minivi entrypoint: startup, file load, and the synchronous key loop.

use anyhow::Result;
use clap::Parser;
use core_actions::{command_literal, insert_literal, register_defaults};
use core_keymap::{HandlerOutcome, KeyHandlerRegistry};
use core_state::{AlertState, EditorState, Mode, read_lines};
use core_terminal::{CrosstermBackend, KeyInput, TerminalBackend, TextStyle, Theme};
use std::io::{BufRead, stdin};
use std::path::PathBuf;
use std::sync::Once;
use tracing::{debug, info};
use tracing_appender::non_blocking::WorkerGuard;

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "mvi", version, about = "minivi editor")]
struct Args {
    /// Optional path to open at startup; loaded line-by-line with trailing
    /// newlines stripped. If omitted the buffer starts with one empty line.
    pub path: Option<PathBuf>,
    /// Optional configuration file path (overrides discovery of `minivi.toml`).
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
    /// Print the registered key bindings and wait for Enter before starting.
    #[arg(long = "debug")]
    pub debug: bool,
}

struct AppStartup {
    log_guard: Option<WorkerGuard>,
}

impl AppStartup {
    fn new() -> Self {
        Self { log_guard: None }
    }

    /// Log through tracing to `minivi.log`; stdout belongs to the raw-mode
    /// terminal.
    fn configure_logging(&mut self) -> Result<()> {
        let log_path = PathBuf::from("minivi.log");
        if log_path.exists() {
            let _ = std::fs::remove_file(&log_path);
        }
        let file_appender = tracing_appender::rolling::never(".", "minivi.log");
        let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
        match tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(nb_writer)
            .try_init()
        {
            Ok(_) => {
                self.log_guard = Some(guard);
            }
            Err(_err) => {
                // Global tracing subscriber already installed; drop guard so writer shuts down.
            }
        }
        Ok(())
    }

    fn install_panic_hook() {
        static HOOK: Once = Once::new();
        HOOK.call_once(|| {
            let default_panic = std::panic::take_hook();
            std::panic::set_hook(Box::new(move |info| {
                tracing::error!(target: "runtime.panic", ?info, "panic");
                default_panic(info);
            }));
        });
    }
}

/// Result of loading the startup file. Failures are recoverable: the editor
/// starts with an empty buffer and the message becomes a status alert.
struct LoadOutcome {
    success: bool,
    message: String,
    lines: Vec<String>,
    path: Option<PathBuf>,
}

fn load(args: &Args) -> LoadOutcome {
    let Some(path) = &args.path else {
        return LoadOutcome {
            success: true,
            message: "new file".to_string(),
            lines: vec![String::new()],
            path: None,
        };
    };
    match read_lines(path) {
        Ok(lines) => LoadOutcome {
            success: true,
            message: path.display().to_string(),
            lines,
            path: Some(path.clone()),
        },
        Err(err) => LoadOutcome {
            success: false,
            message: format!("error opening file: {err:#}"),
            lines: vec![String::new()],
            // The path stays attached so a later `w` can create the file.
            path: Some(path.clone()),
        },
    }
}

/// Dump the handler table on the cooked-mode screen (dim key names, bold
/// scopes) and wait for Enter.
fn show_bindings(registry: &KeyHandlerRegistry, term: &mut dyn TerminalBackend) -> Result<()> {
    for binding in registry.bindings() {
        term.print_styled(binding.name, TextStyle::Dim)?;
        term.print(": ")?;
        let scope = match binding.mode {
            None => "all modes".to_string(),
            Some(mode) => format!("{} only", mode.label()),
        };
        term.print_styled(&scope, TextStyle::Bold)?;
        term.print("\n")?;
    }
    term.print("Press Enter to start the editor...\n")?;
    term.flush()?;
    let mut line = String::new();
    stdin().lock().read_line(&mut line)?;
    Ok(())
}

fn run(
    term: &mut dyn TerminalBackend,
    registry: &KeyHandlerRegistry,
    config: &core_config::Config,
    outcome: LoadOutcome,
) -> Result<()> {
    let mut state = EditorState::new();
    state.alert = AlertState::new(config.alert_timeout());
    state.set_contents(outcome.lines);
    state.path = outcome.path;

    let style = if outcome.success {
        TextStyle::Success
    } else {
        TextStyle::Alert
    };
    core_render::set_mode(&mut state, term, Mode::Insert)?;
    core_render::draw_lines_from(&state, term, 0)?;
    core_render::show_alert(&mut state, term, &outcome.message, style)?;
    core_render::position_cursor(&mut state, term)?;

    let poll = config.poll_interval();
    loop {
        match term.poll_key(poll)? {
            // Idle tick: service lazy alert expiry.
            None => core_render::revoke_expired_alert(&mut state, term)?,
            Some(KeyInput::Named(name)) => match registry.dispatch(&name, &mut state, term)? {
                Some(HandlerOutcome::Quit) => break,
                Some(HandlerOutcome::Continue) => {}
                None => {
                    // Unhandled named key: show its name instead of erroring.
                    core_render::show_alert(&mut state, term, &name, TextStyle::Alert)?;
                }
            },
            Some(KeyInput::Char(ch)) => match state.mode {
                Mode::Insert => insert_literal(&mut state, term, ch)?,
                Mode::Command => {
                    if command_literal(&mut state, term, ch)? == HandlerOutcome::Quit {
                        break;
                    }
                }
            },
        }
    }
    info!(target: "runtime", "shutdown");
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut startup = AppStartup::new();
    startup.configure_logging()?;
    AppStartup::install_panic_hook();
    info!(target: "runtime", "startup");

    let config = core_config::load_from(args.config.clone())?;
    let mut registry = KeyHandlerRegistry::new();
    register_defaults(&mut registry);

    let theme = Theme::from_hex(
        &config.file.theme.dim,
        &config.file.theme.bold,
        &config.file.theme.alert,
        &config.file.theme.success,
    );
    let mut backend = CrosstermBackend::new(theme);

    if args.debug {
        // Still on the cooked-mode main screen; raw mode comes later.
        show_bindings(&registry, &mut backend)?;
    }

    let outcome = load(&args);
    info!(
        target: "runtime.startup",
        path = outcome.path.as_ref().map(|p| p.display().to_string()).as_deref(),
        open_failed = !outcome.success,
        lines = outcome.lines.len(),
        "loaded"
    );

    let mut guard = backend.enter_guard()?;
    let result = run(guard.term(), &registry, &config, outcome);
    drop(guard);
    debug!(target: "runtime", ok = result.is_ok(), "exit");
    result
}
