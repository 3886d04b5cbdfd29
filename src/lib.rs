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

pub mod app;
pub mod error;
pub mod harness;
pub mod ui;
pub mod visibility;

use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "scrollchat", about = "Terminal chat screen with an auto-scrolling transcript")]
pub struct Cli {
    /// Which phase of the Enter key commits a line
    #[arg(long, value_enum, default_value_t = CommitOn::Auto)]
    pub commit_on: CommitOn,

    /// Pre-fill the transcript with this many long demo messages
    #[arg(long, default_value_t = 0)]
    pub seed_lines: usize,

    /// Lines moved per mouse wheel step
    #[arg(long, default_value_t = 3)]
    pub scroll_step: usize,

    /// Write tracing diagnostics to this file (disabled when omitted)
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<std::path::PathBuf>,

    /// Tracing filter directives (falls back to `RUST_LOG`, then `info`)
    #[arg(long, value_name = "FILTER")]
    pub log_filter: Option<String>,

    /// Append to the log file instead of truncating it
    #[arg(long)]
    pub log_append: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CommitOn {
    /// Release when the terminal reports key releases, press otherwise
    Auto,
    Press,
    Release,
}
