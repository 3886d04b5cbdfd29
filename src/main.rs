// scrollchat — A terminal chat screen with a scroll-aware transcript
// Copyright (C) 2025  Simon Peter Rothgang
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use clap::Parser;
use scrollchat::Cli;
use scrollchat::error::AppError;
use std::fs::{File, OpenOptions};
use std::path::Path;

#[allow(clippy::exit)]
fn main() {
    if let Err(err) = run() {
        if let Some(app_error) = extract_app_error(&err) {
            eprintln!("{}", app_error.user_message());
            std::process::exit(app_error.exit_code());
        }
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli)?;

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move {
        let mut app = scrollchat::app::create_app(&cli);
        scrollchat::app::run_tui(&mut app).await
    })
}

fn extract_app_error(err: &anyhow::Error) -> Option<AppError> {
    err.chain().find_map(|cause| cause.downcast_ref::<AppError>().cloned())
}

/// Diagnostics go to `--log-file` only; the terminal belongs to the chat screen.
fn init_tracing(cli: &Cli) -> anyhow::Result<()> {
    let Some(path) = cli.log_file.as_deref() else {
        return Ok(());
    };
    let directives = log_directives(cli);
    let filter = tracing_subscriber::EnvFilter::try_new(&directives).map_err(|e| {
        anyhow::Error::new(AppError::InvalidLogFilter).context(format!("`{directives}`: {e}"))
    })?;
    let file = open_log_file(path, cli.log_append).map_err(|e| {
        anyhow::Error::new(AppError::LogFileUnavailable).context(format!("{}: {e}", path.display()))
    })?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(file)
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("tracing subscriber already set: {e}"))?;

    tracing::info!(
        log_file = %path.display(),
        filter = %directives,
        "scrollchat {}",
        env!("CARGO_PKG_VERSION")
    );
    Ok(())
}

/// `--log-filter`, then `RUST_LOG`, then `info`.
fn log_directives(cli: &Cli) -> String {
    cli.log_filter
        .clone()
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| "info".to_owned())
}

fn open_log_file(path: &Path, append: bool) -> std::io::Result<File> {
    OpenOptions::new().create(true).write(true).append(append).truncate(!append).open(path)
}
