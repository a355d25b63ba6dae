mod actions;
mod app;
mod input;
mod persistence;
mod view;

use anyhow::{Context, Result};
use app::App;
use crossterm::event::{self, Event as CEvent, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{execute, ExecutableCommand};
use lotto_core::{LottoConfig, RngState};
use persistence::load_auto_perform_file;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::fs::OpenOptions;
use std::io::{self, stdout, IsTerminal};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

pub use app::{format_event, format_numbers, select_error_message, UiLocale};

#[derive(Debug, Clone, Default)]
pub struct LaunchOptions {
    pub locale: Option<String>,
    pub seed: Option<u64>,
    pub config: Option<LottoConfig>,
    pub auto_perform_json: Option<PathBuf>,
}

pub fn run(options: LaunchOptions) -> Result<()> {
    let mut app = prepare_app(options)?;

    ensure_interactive_terminal()?;

    enable_raw_mode().map_err(|err| {
        anyhow::anyhow!(
            "failed to enable raw mode; ensure the process owns an interactive terminal: {err}"
        )
    })?;
    let mut stdout = stdout();
    stdout
        .execute(EnterAlternateScreen)
        .context("enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let run_result = run_loop(&mut terminal, &mut app);
    restore_terminal(&mut terminal)?;
    run_result
}

/// Builds the app and applies any auto-perform script; no terminal access.
fn prepare_app(options: LaunchOptions) -> Result<App> {
    let mut locale_value = options.locale.clone();
    let mut seed_value = options.seed;
    let mut config_value = options.config;
    let mut auto_actions = None;
    if let Some(path) = options.auto_perform_json.as_ref() {
        let script = load_auto_perform_file(path)
            .map_err(|err| anyhow::anyhow!(err))
            .with_context(|| format!("load auto perform json from {}", path.display()))?;
        if locale_value.is_none() {
            locale_value = script.locale;
        }
        if seed_value.is_none() {
            seed_value = script.seed;
        }
        if config_value.is_none() {
            config_value = script.config;
        }
        auto_actions = Some(script.actions);
    }

    let locale = UiLocale::from_opt(locale_value.as_deref());
    let seed = seed_value.unwrap_or_else(|| RngState::from_entropy().seed());
    let mut app = App::bootstrap(locale, config_value.unwrap_or_default(), seed)?;
    if let Some(actions) = auto_actions {
        app.auto_perform_actions(&actions)
            .map_err(|err| anyhow::anyhow!(err))
            .context("apply auto perform actions")?;
    }
    info!(seed, locale = locale.code(), "cui starting");
    Ok(app)
}

pub fn run_with_args(args: &[String]) -> Result<()> {
    let options = parse_options(args)?;
    run(options)
}

/// Routes tracing output to `path`; the terminal itself belongs to the UI.
pub fn init_file_logging(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|err| anyhow::anyhow!(err))
        .context("install file logger")
}

fn parse_options(args: &[String]) -> Result<LaunchOptions> {
    let mut options = LaunchOptions {
        locale: std::env::var("LOTTO_LANG").ok(),
        ..LaunchOptions::default()
    };
    let mut idx = 0usize;
    while idx < args.len() {
        match args[idx].as_str() {
            "--lang" | "-l" => {
                if let Some(value) = args.get(idx + 1) {
                    options.locale = Some(value.clone());
                    idx += 1;
                }
            }
            "--seed" => {
                if let Some(value) = args.get(idx + 1) {
                    options.seed = value.parse::<u64>().ok();
                    idx += 1;
                }
            }
            "--config" => {
                if let Some(value) = args.get(idx + 1) {
                    options.config = Some(load_config_file(Path::new(value))?);
                    idx += 1;
                }
            }
            "--auto-perform-json" | "--auto-json" => {
                if let Some(value) = args.get(idx + 1) {
                    options.auto_perform_json = Some(PathBuf::from(value));
                    idx += 1;
                }
            }
            _ => {}
        }
        idx += 1;
    }
    Ok(options)
}

pub fn load_config_file(path: &Path) -> Result<LottoConfig> {
    let body = std::fs::read_to_string(path)
        .with_context(|| format!("read config {}", path.display()))?;
    let config: LottoConfig = serde_json::from_str(&body)
        .with_context(|| format!("parse config {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("invalid config {}", path.display()))?;
    Ok(config)
}

fn run_loop(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    let tick_rate = Duration::from_millis(120);
    while !app.should_quit {
        terminal.draw(|frame| view::draw(frame, app))?;
        if event::poll(tick_rate)? {
            if let CEvent::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if app.handle_path_prompt_key(key) {
                    continue;
                }
                let action = input::map_key(key);
                actions::dispatch(app, action);
            }
        }
    }
    Ok(())
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen).context("leave alternate screen")?;
    terminal.show_cursor().context("show cursor")?;
    Ok(())
}

fn ensure_interactive_terminal() -> Result<()> {
    if io::stdin().is_terminal() && io::stdout().is_terminal() {
        return Ok(());
    }
    anyhow::bail!(
        "lotto-cui requires an interactive TTY (run directly in a terminal, not a piped/headless shell)"
    );
}
