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

mod events;
mod input;
mod state;
mod submit;
mod viewport;

pub use events::{handle_app_event, handle_terminal_event};
pub use input::InputState;
pub use state::{App, AppEvent, ChatHandle, CommitPhase, Focus};
pub use submit::long_message;
pub use viewport::{ScrollRequest, Viewport};

use crate::error::AppError;
use crate::{Cli, CommitOn};
use crossterm::event::{
    EventStream, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
    PushKeyboardEnhancementFlags,
};
use futures::{FutureExt as _, StreamExt};
use std::time::{Duration, Instant};

pub fn create_app(cli: &Cli) -> App {
    let commit_phase = resolve_commit_phase(cli.commit_on);
    tracing::info!(?commit_phase, seed_lines = cli.seed_lines, "creating chat screen");

    let mut app = App::new(commit_phase);
    app.scroll_step = cli.scroll_step.max(1);
    for number in 1..=cli.seed_lines {
        let mut line = long_message(number);
        line.push('\n');
        submit::append_to_chat(&mut app, &line);
    }
    app
}

fn resolve_commit_phase(commit_on: CommitOn) -> CommitPhase {
    match commit_on {
        CommitOn::Press => CommitPhase::Press,
        CommitOn::Release => CommitPhase::Release,
        CommitOn::Auto => {
            // Release events only arrive with the keyboard enhancement protocol.
            if crossterm::terminal::supports_keyboard_enhancement().unwrap_or(false) {
                CommitPhase::Release
            } else {
                CommitPhase::Press
            }
        }
    }
}

// ---------------------------------------------------------------------------
// TUI event loop
// ---------------------------------------------------------------------------

pub async fn run_tui(app: &mut App) -> anyhow::Result<()> {
    let mut terminal = ratatui::try_init().map_err(|e| {
        anyhow::Error::new(AppError::TerminalUnavailable)
            .context(format!("failed to initialize terminal: {e}"))
    })?;

    // Ignore errors on terminals without these features
    let _ = crossterm::execute!(
        std::io::stdout(),
        crossterm::event::EnableBracketedPaste,
        crossterm::event::EnableMouseCapture,
    );
    let enhanced = app.commit_phase == CommitPhase::Release;
    if enhanced {
        let _ = crossterm::execute!(
            std::io::stdout(),
            // Release phases are only reported with event types enabled
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        );
    }

    let mut events = EventStream::new();
    let tick_duration = Duration::from_millis(16);
    let mut last_render = Instant::now();
    let mut result = Ok(());

    loop {
        // Phase 1: wait for at least one event or the next frame tick
        let time_to_next = tick_duration.saturating_sub(last_render.elapsed());
        tokio::select! {
            Some(Ok(event)) = events.next() => {
                handle_terminal_event(app, event);
            }
            Some(event) = app.event_rx.recv() => {
                handle_app_event(app, event);
            }
            () = tokio::time::sleep(time_to_next) => {}
        }

        // Phase 2: drain all remaining queued events (non-blocking)
        loop {
            // Terminal events first (keeps typing responsive)
            if let Some(Some(Ok(event))) = events.next().now_or_never() {
                handle_terminal_event(app, event);
                continue;
            }
            match app.event_rx.try_recv() {
                Ok(event) => handle_app_event(app, event),
                Err(_) => break,
            }
        }

        if app.should_quit {
            break;
        }

        // Phase 3: lay out and render once
        if let Err(e) = terminal.draw(|f| crate::ui::render(f, app)) {
            result = Err(e.into());
            break;
        }
        last_render = Instant::now();
    }

    // Restore terminal
    if enhanced {
        let _ = crossterm::execute!(std::io::stdout(), PopKeyboardEnhancementFlags);
    }
    let _ = crossterm::execute!(
        std::io::stdout(),
        crossterm::event::DisableBracketedPaste,
        crossterm::event::DisableMouseCapture,
    );
    ratatui::restore();

    result
}
