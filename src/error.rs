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

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AppError {
    #[error("Terminal unavailable")]
    TerminalUnavailable,
    #[error("Log file unavailable")]
    LogFileUnavailable,
    #[error("Invalid log filter")]
    InvalidLogFilter,
}

impl AppError {
    pub const TERMINAL_UNAVAILABLE_EXIT_CODE: i32 = 20;
    pub const LOG_FILE_UNAVAILABLE_EXIT_CODE: i32 = 21;
    pub const INVALID_LOG_FILTER_EXIT_CODE: i32 = 22;

    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::TerminalUnavailable => Self::TERMINAL_UNAVAILABLE_EXIT_CODE,
            Self::LogFileUnavailable => Self::LOG_FILE_UNAVAILABLE_EXIT_CODE,
            Self::InvalidLogFilter => Self::INVALID_LOG_FILTER_EXIT_CODE,
        }
    }

    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::TerminalUnavailable => {
                "Could not take over the terminal. Run scrollchat from an interactive terminal."
            }
            Self::LogFileUnavailable => "The file passed to --log-file could not be opened.",
            Self::InvalidLogFilter => {
                "The tracing filter from --log-filter or RUST_LOG could not be parsed."
            }
        }
    }
}
