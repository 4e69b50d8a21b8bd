//! TERMINALX-9000 Entry Point
//!
//! Usage:
//!   terminalx [OPTIONS] [COMMAND]
//!
//! With no command the full-screen terminal opens. See `terminalx --help`.

use std::fs::File;
use std::io::{self, IsTerminal};
use std::path::Path;
use std::sync::Mutex;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use terminalx_conductor::{default_config_path, load_config_from_path, TerminalConfig};
use terminalx_tui::cli::{Cli, Command};
use terminalx_tui::{commands, terminal, App, ConductorClient};

// Resolution tasks must run off the UI thread for the panic hook to tell them apart
#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let command = cli.resolved_command();

    // The full-screen terminal owns stderr, so it only logs to a file
    let log_to_stderr = !matches!(command, Command::Chat);
    init_logging(cli.log_file.as_deref(), log_to_stderr)?;

    let mut config = load_config_from_path(cli.config.clone().or_else(default_config_path))
        .context("failed to load configuration")?;
    cli.overrides().apply(&mut config)?;
    tracing::debug!(source = %config.source(), api = %config.api.base_url, "Configuration loaded");

    let mut stdout = io::stdout();
    match command {
        Command::Chat => run_chat(&config).await,
        Command::Ask { message } => {
            let mut client = ConductorClient::new(&config)?;
            commands::run_ask(&mut client, &message.join(" "), &mut stdout).await
        }
        Command::Movies(cmd) => commands::run_movies(&config, &cmd, &mut stdout).await,
        Command::Blog(cmd) => commands::run_blog(&config, &cmd, &mut stdout).await,
    }
}

/// Set up the tracing subscriber
fn init_logging(log_file: Option<&Path>, stderr: bool) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let file_layer = match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;
            Some(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };
    let stderr_layer = (stderr && file_layer.is_none()).then(|| {
        tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_writer(io::stderr)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .init();
    Ok(())
}

async fn run_chat(config: &TerminalConfig) -> anyhow::Result<()> {
    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        eprintln!("terminalx requires a terminal (TTY)");
        eprintln!("For one-off exchanges use: terminalx ask <MESSAGE>");
        std::process::exit(1);
    }

    let client = ConductorClient::new(config)?;

    // Restore the terminal on UI-thread panics; resolution faults stay in the transcript
    terminal::install_panic_hook();

    let mut tui = terminal::enter()?;
    let mut app = App::new(client);
    let result = app.run(&mut tui).await;

    terminal::restore()?;
    tui.show_cursor()?;

    if let Some(goodbye) = app.goodbye() {
        println!("\n\x1b[32m{goodbye}\x1b[0m\n");
    }

    result
}
