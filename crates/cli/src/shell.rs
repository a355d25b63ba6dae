use anyhow::{Context, Result};
use lotto_core::{EventBus, Selector};
use lotto_cui::{format_event, format_numbers, select_error_message, UiLocale};
use std::io::{BufRead, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellCommand {
    Add(u8),
    Run,
    Reset,
    Show,
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Result<Option<ShellCommand>, String> {
    let mut parts = line.split_whitespace();
    let Some(head) = parts.next() else {
        return Ok(None);
    };
    let command = match head {
        "add" | "a" => {
            let value = parts
                .next()
                .ok_or_else(|| "usage: add <number>".to_string())?;
            let number = value
                .parse::<u8>()
                .map_err(|_| format!("not a number: {value}"))?;
            ShellCommand::Add(number)
        }
        "run" | "r" | "draw" => ShellCommand::Run,
        "reset" | "x" => ShellCommand::Reset,
        "show" | "s" | "ls" => ShellCommand::Show,
        "help" | "h" | "?" => ShellCommand::Help,
        "quit" | "q" | "exit" => ShellCommand::Quit,
        other => return Err(format!("unknown command '{other}' (try help)")),
    };
    if parts.next().is_some() {
        return Err(format!("too many arguments for '{head}'"));
    }
    Ok(Some(command))
}

pub fn run_shell<R: BufRead, W: Write>(
    selector: &mut Selector,
    locale: UiLocale,
    input: R,
    mut output: W,
) -> Result<()> {
    let mut events = EventBus::default();
    writeln!(
        output,
        "{} (seed {}) - {}",
        locale.text("lotto shell", "로또 셸"),
        selector.seed(),
        locale.text("type help for commands", "help 로 명령어 확인")
    )?;
    for line in input.lines() {
        let line = line.context("read command")?;
        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                writeln!(output, "{err}")?;
                continue;
            }
        };
        match command {
            ShellCommand::Add(number) => {
                if let Err(err) = selector.add_preselection(number, &mut events) {
                    writeln!(output, "{}", select_error_message(locale, &err))?;
                }
            }
            ShellCommand::Run => {
                selector.draw(&mut events);
            }
            ShellCommand::Reset => selector.reset(&mut events),
            ShellCommand::Show => writeln!(
                output,
                "{}: [{}]{}",
                locale.text("preselected", "지정 번호"),
                format_numbers(selector.preselected()),
                if selector.has_run() {
                    locale.text(" (drawn, reset to pick again)", " (생성 완료, 초기화 필요)")
                } else {
                    ""
                }
            )?,
            ShellCommand::Help => writeln!(
                output,
                "add <n> | run | reset | show | help | quit"
            )?,
            ShellCommand::Quit => break,
        }
        for event in events.drain() {
            writeln!(output, "{}", format_event(locale, &event))?;
        }
    }
    output.flush()?;
    Ok(())
}
