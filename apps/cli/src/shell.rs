//! Interactive session that keeps one screen alive across actions.

use std::io::Write;

use anyhow::Result;
use client_core::{Notification, ScreenController};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::render::{render_auth, render_logs, render_notification, render_screen};

const HELP: &str = "\
commands:
  name <text>       set the name field
  register [name]   register a person (defaults to the name field)
  authenticate      run an authentication check
  delete [name]     delete a person (defaults to the name field)
  logs              show authentication logs from the first page
  more              load the next page of logs
  show              print the current screen
  help              show this help
  quit              leave the shell";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    SetName(String),
    Register(Option<String>),
    Authenticate,
    Delete(Option<String>),
    Logs,
    More,
    Show,
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Result<Option<ShellCommand>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };
    let argument = (!rest.is_empty()).then(|| rest.to_string());

    let command = match verb.to_ascii_lowercase().as_str() {
        "name" => ShellCommand::SetName(rest.to_string()),
        "register" => ShellCommand::Register(argument),
        "authenticate" | "auth" => ShellCommand::Authenticate,
        "delete" => ShellCommand::Delete(argument),
        "logs" => ShellCommand::Logs,
        "more" => ShellCommand::More,
        "show" => ShellCommand::Show,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" => ShellCommand::Quit,
        other => return Err(format!("unknown command '{other}'; type `help`")),
    };
    Ok(Some(command))
}

pub async fn run_shell<R, W>(controller: &ScreenController, input: R, output: &mut W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    writeln!(output, "{HELP}")?;
    let mut lines = input.lines();
    loop {
        write!(output, "> ")?;
        output.flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };

        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                writeln!(output, "{message}")?;
                continue;
            }
        };
        if command == ShellCommand::Quit {
            break;
        }
        execute(controller, command, output).await?;
    }
    Ok(())
}

async fn execute<W: Write>(
    controller: &ScreenController,
    command: ShellCommand,
    output: &mut W,
) -> Result<()> {
    match command {
        ShellCommand::SetName(name) => {
            controller.set_name(&name).await;
        }
        ShellCommand::Register(name) => {
            let name = resolve_name(controller, name).await;
            print_notification(output, controller.register(&name).await)?;
        }
        ShellCommand::Delete(name) => {
            let name = resolve_name(controller, name).await;
            print_notification(output, controller.delete(&name).await)?;
        }
        ShellCommand::Authenticate => {
            print_notification(output, controller.authenticate().await)?;
            if let Some(text) = render_auth(&controller.snapshot().await) {
                writeln!(output, "{text}")?;
            }
        }
        ShellCommand::Logs => {
            print_notification(output, controller.fetch_logs(true).await)?;
            print_logs(controller, output).await?;
        }
        ShellCommand::More => {
            if !controller.snapshot().await.can_load_more() {
                writeln!(output, "No more logs to load.")?;
                return Ok(());
            }
            print_notification(output, controller.load_more().await)?;
            print_logs(controller, output).await?;
        }
        ShellCommand::Show => {
            writeln!(output, "{}", render_screen(&controller.snapshot().await))?;
        }
        ShellCommand::Help => writeln!(output, "{HELP}")?,
        ShellCommand::Quit => {}
    }
    Ok(())
}

/// An explicit argument also becomes the name field, like typing it in.
async fn resolve_name(controller: &ScreenController, name: Option<String>) -> String {
    match name {
        Some(name) => {
            controller.set_name(&name).await;
            name
        }
        None => controller.snapshot().await.name,
    }
}

async fn print_logs<W: Write>(controller: &ScreenController, output: &mut W) -> Result<()> {
    let lines = render_logs(&controller.snapshot().await);
    if lines.is_empty() {
        writeln!(output, "No authentication logs.")?;
    }
    for line in lines {
        writeln!(output, "{line}")?;
    }
    Ok(())
}

pub fn print_notification<W: Write>(
    output: &mut W,
    notification: Option<Notification>,
) -> Result<()> {
    if let Some(notification) = notification {
        writeln!(output, "{}", render_notification(&notification))?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/shell_tests.rs"]
mod tests;
