use std::{io, path::PathBuf, process::ExitCode, sync::Arc};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client_core::{HttpFaceAuthApi, Notification, ScreenController};
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod render;
mod shell;

use config::{load_settings, DEFAULT_CONFIG_PATH};
use render::{render_auth, render_logs, render_notification};

#[derive(Parser, Debug)]
#[command(name = "faceauth", about = "Client for the face authentication backend")]
struct Cli {
    /// Backend base address, e.g. http://192.168.8.101:8000/api
    #[arg(long)]
    api_url: Option<String>,
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Register a person under the given name.
    Register { name: String },
    /// Ask the backend to authenticate whoever is in front of the camera.
    Authenticate,
    /// Delete a registered person.
    Delete { name: String },
    /// Show authentication logs, newest first.
    Logs {
        /// Keep loading pages until the server has no more.
        #[arg(long)]
        all: bool,
    },
    /// Interactive session (the default).
    Shell,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let mut settings = load_settings(&cli.config)?;
    if let Some(api_url) = cli.api_url {
        settings.api_url = api_url;
    }

    let api = HttpFaceAuthApi::new(&settings.api_url)
        .with_context(|| format!("invalid api url '{}'", settings.api_url))?;
    info!(api_url = %api.base_url(), "using backend");
    let controller = ScreenController::new(Arc::new(api));

    let failed = match cli.command.unwrap_or(Command::Shell) {
        Command::Register { name } => report(controller.register(&name).await),
        Command::Delete { name } => report(controller.delete(&name).await),
        Command::Authenticate => {
            let failed = report(controller.authenticate().await);
            if let Some(text) = render_auth(&controller.snapshot().await) {
                println!("{text}");
            }
            failed
        }
        Command::Logs { all } => fetch_logs(&controller, all).await,
        Command::Shell => {
            let stdin = BufReader::new(tokio::io::stdin());
            shell::run_shell(&controller, stdin, &mut io::stdout()).await?;
            false
        }
    };

    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

/// Prints the notification and reports whether it was an error.
fn report(notification: Option<Notification>) -> bool {
    match notification {
        Some(notification) => {
            let text = render_notification(&notification);
            if notification.is_error() {
                eprintln!("{text}");
            } else {
                println!("{text}");
            }
            notification.is_error()
        }
        None => false,
    }
}

async fn fetch_logs(controller: &ScreenController, all: bool) -> bool {
    let mut failed = report(controller.fetch_logs(true).await);
    while all && !failed && controller.snapshot().await.can_load_more() {
        failed = report(controller.load_more().await);
    }

    let lines = render_logs(&controller.snapshot().await);
    if lines.is_empty() && !failed {
        println!("No authentication logs.");
    }
    for line in lines {
        println!("{line}");
    }
    failed
}
