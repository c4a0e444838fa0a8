use crate::command::{Action, Command, CommandInner};
use crate::model::Model;
use crate::subscription::SubscriptionManager;
use crossterm::{
    cursor,
    event::{DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
    },
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, stderr, stdout, Stderr, Stdout, Write};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tracing_subscriber::EnvFilter;

/// Filter used for the log file when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "combo=debug,combo_core=debug,combo_widgets=debug";

/// Output target for the terminal UI.
///
/// Switch to [`Stderr`](OutputTarget::Stderr) when stdout is piped, so the UI
/// stays on the terminal while data flows through the pipe.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum OutputTarget {
    /// Write to stdout (default).
    #[default]
    Stdout,
    /// Write to stderr.
    Stderr,
}

enum Output {
    Stdout(Stdout),
    Stderr(Stderr),
}

impl Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Stdout(w) => w.write(buf),
            Output::Stderr(w) => w.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout(w) => w.flush(),
            Output::Stderr(w) => w.flush(),
        }
    }
}

impl Output {
    fn new(target: OutputTarget) -> Self {
        match target {
            OutputTarget::Stdout => Output::Stdout(stdout()),
            OutputTarget::Stderr => Output::Stderr(stderr()),
        }
    }
}

/// Errors that can occur while initializing or running a [`Program`].
#[derive(Debug, thiserror::Error)]
pub enum ProgramError {
    /// An I/O error from terminal setup, rendering, or teardown.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// The log file could not be opened.
    #[error("cannot open log file {}: {source}", path.display())]
    LogFile {
        /// Path given in [`ProgramOptions::log_file`].
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },
}

/// Configuration options for a [`Program`].
///
/// Override only what you need with struct update syntax:
///
/// ```rust,ignore
/// use combo_core::ProgramOptions;
///
/// let opts = ProgramOptions {
///     title: Some("Fruit picker".into()),
///     log_file: Some("picker.log".into()),
///     ..ProgramOptions::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct ProgramOptions {
    /// Target frames per second (default: 60, clamped to 1..=120).
    pub fps: u32,
    /// Start in alternate screen (default: true).
    pub alt_screen: bool,
    /// Capture mouse clicks (default: true; the combobox picks items on click).
    pub mouse_capture: bool,
    /// Enable bracketed paste (default: true).
    pub bracketed_paste: bool,
    /// Set terminal title.
    pub title: Option<String>,
    /// Whether to restore the terminal before a panic message prints (default: true).
    pub catch_panics: bool,
    /// Whether Ctrl+C at the process level ends the loop (default: true).
    pub handle_signals: bool,
    /// Write `tracing` output to this file. Filter comes from `RUST_LOG`.
    pub log_file: Option<PathBuf>,
    /// Output target: stdout (default) or stderr.
    pub output: OutputTarget,
}

impl Default for ProgramOptions {
    fn default() -> Self {
        Self {
            fps: 60,
            alt_screen: true,
            mouse_capture: true,
            bracketed_paste: true,
            title: None,
            catch_panics: true,
            handle_signals: true,
            log_file: None,
            output: OutputTarget::default(),
        }
    }
}

/// The program runtime: terminal setup, the event loop, and the [`Model`]
/// lifecycle.
///
/// Every message, whether it came from the terminal, a timer or a command, goes
/// through one channel and is handled by a single `update` call at a time.
///
/// ```rust,ignore
/// #[tokio::main]
/// async fn main() -> Result<(), combo_core::ProgramError> {
///     let app = combo_core::Program::<Picker>::new(())?.run().await?;
///     println!("picked {:?}", app.picked);
///     Ok(())
/// }
/// ```
pub struct Program<M: Model> {
    model: M,
    terminal: Terminal<CrosstermBackend<Output>>,
    msg_tx: mpsc::UnboundedSender<M::Message>,
    msg_rx: mpsc::UnboundedReceiver<M::Message>,
    subscription_manager: SubscriptionManager<M::Message>,
    options: ProgramOptions,
    needs_redraw: bool,
    should_quit: bool,
}

impl<M: Model> Program<M> {
    /// Create a new program with default options.
    pub fn new(flags: M::Flags) -> Result<Self, ProgramError> {
        Self::with_options(flags, ProgramOptions::default())
    }

    /// Create a new program with custom options.
    pub fn with_options(flags: M::Flags, options: ProgramOptions) -> Result<Self, ProgramError> {
        if let Some(ref path) = options.log_file {
            init_file_logging(path)?;
        }

        let (msg_tx, msg_rx) = mpsc::unbounded_channel();
        let (model, init_cmd) = M::init(flags);
        let terminal = init_terminal(&options)?;
        let subscription_manager = SubscriptionManager::new(msg_tx.clone());

        let mut program = Self {
            model,
            terminal,
            msg_tx,
            msg_rx,
            subscription_manager,
            options,
            needs_redraw: true,
            should_quit: false,
        };

        tracing::debug!("program initialized");
        program.execute_command(init_cmd);
        let subs = program.model.subscriptions();
        program.subscription_manager.reconcile(subs);

        Ok(program)
    }

    /// Run the program until the model quits. Returns the final model.
    pub async fn run(mut self) -> Result<M, ProgramError> {
        let result = self.event_loop().await;

        tracing::debug!("shutting down");
        self.subscription_manager.shutdown();
        restore_terminal(self.options.alt_screen, self.options.output)?;
        result?;

        Ok(self.model)
    }

    async fn event_loop(&mut self) -> Result<(), ProgramError> {
        self.render()?;

        let fps = self.options.fps.clamp(1, 120);
        let mut frame_interval = tokio::time::interval(Duration::from_secs_f64(1.0 / fps as f64));
        frame_interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let handle_signals = self.options.handle_signals;

        loop {
            tokio::select! {
                biased;

                _ = tokio::signal::ctrl_c(), if handle_signals => {
                    tracing::debug!("received ctrl+c signal");
                    return Ok(());
                }

                Some(msg) = self.msg_rx.recv() => {
                    self.process_message(msg);

                    // Drain what is already queued (up to 100 messages or 100µs)
                    // so a burst of key presses renders once.
                    let deadline = Instant::now() + Duration::from_micros(100);
                    let mut drained = 0u32;
                    while Instant::now() < deadline && drained < 100 {
                        match self.msg_rx.try_recv() {
                            Ok(msg) => {
                                self.process_message(msg);
                                drained += 1;
                            }
                            Err(_) => break,
                        }
                    }

                    if self.should_quit {
                        return Ok(());
                    }
                }

                _ = frame_interval.tick() => {
                    if self.needs_redraw {
                        self.render()?;
                        self.needs_redraw = false;
                    }
                }
            }
        }
    }

    fn process_message(&mut self, msg: M::Message) {
        let cmd = self.model.update(msg);
        self.execute_command(cmd);

        let subs = self.model.subscriptions();
        self.subscription_manager.reconcile(subs);

        self.needs_redraw = true;
    }

    fn execute_command(&mut self, cmd: Command<M::Message>) {
        match cmd.inner {
            CommandInner::None => {}
            CommandInner::Action(Action::Message(msg)) => {
                let _ = self.msg_tx.send(msg);
            }
            CommandInner::Action(Action::Quit) => {
                self.should_quit = true;
            }
            CommandInner::Future(fut) => {
                let tx = self.msg_tx.clone();
                tokio::spawn(async move {
                    let _ = tx.send(fut.await);
                });
            }
            CommandInner::Batch(cmds) => {
                for cmd in cmds {
                    self.execute_command(cmd);
                }
            }
        }
    }

    fn render(&mut self) -> Result<(), ProgramError> {
        self.terminal.draw(|frame| {
            self.model.view(frame);
        })?;
        Ok(())
    }
}

fn init_file_logging(path: &std::path::Path) -> Result<(), ProgramError> {
    let file = log_to_file(path).map_err(|source| ProgramError::LogFile {
        path: path.to_path_buf(),
        source,
    })?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    // A second Program in the same process keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
    Ok(())
}

fn init_terminal(
    options: &ProgramOptions,
) -> Result<Terminal<CrosstermBackend<Output>>, ProgramError> {
    if options.catch_panics {
        use std::sync::Once;
        static HOOK_INSTALLED: Once = Once::new();
        let alt_screen = options.alt_screen;
        let output_target = options.output;
        HOOK_INSTALLED.call_once(|| {
            let original_hook = std::panic::take_hook();
            std::panic::set_hook(Box::new(move |info| {
                let _ = restore_terminal(alt_screen, output_target);
                original_hook(info);
            }));
        });
    }

    enable_raw_mode()?;
    let mut writer = Output::new(options.output);

    if options.alt_screen {
        execute!(writer, EnterAlternateScreen)?;
    }
    if options.bracketed_paste {
        execute!(writer, EnableBracketedPaste)?;
    }
    if options.mouse_capture {
        execute!(writer, EnableMouseCapture)?;
    }
    if let Some(ref title) = options.title {
        execute!(writer, SetTitle(title))?;
    }
    execute!(writer, cursor::Hide)?;

    let terminal = Terminal::new(CrosstermBackend::new(writer))?;
    Ok(terminal)
}

/// Best-effort: every step runs even if an earlier one failed.
fn restore_terminal(alt_screen: bool, output_target: OutputTarget) -> Result<(), io::Error> {
    let raw = disable_raw_mode();
    let mut writer = Output::new(output_target);
    execute!(writer, DisableBracketedPaste).ok();
    execute!(writer, DisableMouseCapture).ok();
    execute!(writer, cursor::Show).ok();
    if alt_screen {
        execute!(writer, LeaveAlternateScreen).ok();
    }
    raw
}

/// Open a log file in append mode.
pub fn log_to_file(path: impl AsRef<std::path::Path>) -> Result<std::fs::File, std::io::Error> {
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_capture_mouse() {
        let opts = ProgramOptions::default();
        assert_eq!(opts.fps, 60);
        assert!(opts.mouse_capture);
        assert!(opts.log_file.is_none());
        assert_eq!(opts.output, OutputTarget::Stdout);
    }

    #[test]
    fn log_file_error_names_path() {
        let err = init_file_logging(std::path::Path::new("/nonexistent-dir/combo.log"))
            .expect_err("directory does not exist");
        let text = err.to_string();
        assert!(text.contains("/nonexistent-dir/combo.log"), "{text}");
    }
}
