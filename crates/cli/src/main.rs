mod shell;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use lotto_core::{DrawResult, EventBus, LottoConfig, RngState, Selector};
use lotto_cui::{format_event, format_numbers, select_error_message, LaunchOptions, UiLocale};
use serde::Serialize;
use std::io;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "lotto-cli", version, about = "Pick lottery numbers, keeping the ones you choose")]
struct Cli {
    /// JSON file overriding the number range, pick count or preselection limit
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// UI language (en, ko); falls back to LOTTO_LANG
    #[arg(long, short = 'l', global = true)]
    lang: Option<String>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Draw once and print the numbers
    Draw {
        /// Number to keep in the result (repeatable)
        #[arg(long = "pick", short = 'p')]
        picks: Vec<u8>,
        #[arg(long)]
        seed: Option<u64>,
        /// Print the draw as JSON
        #[arg(long)]
        json: bool,
    },
    /// Line-based interactive session (default)
    Shell {
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Full-screen terminal UI
    Cui {
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long = "auto-perform-json", alias = "auto-json")]
        auto_perform_json: Option<PathBuf>,
    },
}

#[derive(Debug, Serialize)]
struct DrawReport<'a> {
    seed: u64,
    numbers: &'a [u8],
    preselected: &'a [u8],
    fillers: &'a [u8],
    sorted: Vec<u8>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let lang = cli.lang.clone().or_else(|| std::env::var("LOTTO_LANG").ok());
    let locale = UiLocale::from_opt(lang.as_deref());
    let config = cli
        .config
        .as_deref()
        .map(lotto_cui::load_config_file)
        .transpose()?;

    match cli.command {
        Some(Command::Cui {
            seed,
            auto_perform_json,
        }) => {
            if let Some(path) = std::env::var_os("LOTTO_LOG_FILE") {
                lotto_cui::init_file_logging(&PathBuf::from(path))?;
            }
            lotto_cui::run(LaunchOptions {
                locale: lang,
                seed,
                config,
                auto_perform_json,
            })
            .context("cui launch")
        }
        Some(Command::Draw { picks, seed, json }) => {
            init_logging(cli.verbose)?;
            let mut selector = build_selector(config.unwrap_or_default(), seed)?;
            let result = draw_with_picks(&mut selector, &picks, locale)?;
            if json {
                let report = DrawReport {
                    seed: selector.seed(),
                    numbers: result.numbers(),
                    preselected: result.preselected(),
                    fillers: result.fillers(),
                    sorted: result.sorted(),
                };
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", format_numbers(result.numbers()));
            }
            Ok(())
        }
        Some(Command::Shell { seed }) => {
            init_logging(cli.verbose)?;
            let mut selector = build_selector(config.unwrap_or_default(), seed)?;
            shell::run_shell(&mut selector, locale, io::stdin().lock(), io::stdout().lock())
        }
        None => {
            init_logging(cli.verbose)?;
            let mut selector = build_selector(config.unwrap_or_default(), None)?;
            shell::run_shell(&mut selector, locale, io::stdin().lock(), io::stdout().lock())
        }
    }
}

fn init_logging(verbose: u8) -> Result<()> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|err| anyhow::anyhow!(err))
        .context("install logger")
}

fn build_selector(config: LottoConfig, seed: Option<u64>) -> Result<Selector> {
    let seed = seed.unwrap_or_else(|| RngState::from_entropy().seed());
    info!(seed, "selector ready");
    Selector::new(config, seed).context("build selector")
}

fn draw_with_picks(selector: &mut Selector, picks: &[u8], locale: UiLocale) -> Result<DrawResult> {
    let mut events = EventBus::default();
    for pick in picks {
        selector
            .add_preselection(*pick, &mut events)
            .map_err(|err| anyhow::anyhow!(select_error_message(locale, &err)))
            .with_context(|| format!("preselect {pick}"))?;
    }
    let result = selector.draw(&mut events);
    for event in events.drain() {
        debug!(event = %format_event(locale, &event), "draw event");
    }
    Ok(result)
}
