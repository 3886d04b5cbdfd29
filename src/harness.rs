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

//! Headless driver for the chat screen.
//!
//! Runs an [`App`] against ratatui's `TestBackend`: keys are injected as
//! synthetic crossterm events, frames are drawn on demand, and visibility
//! checks read the same layout and viewport the renderer used.

use crate::app::{self, App, ChatHandle};
use crate::visibility::{self, VisibilityError};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::TestBackend;

/// Upper bound on frames `settle` will draw before giving up.
const MAX_SETTLE_FRAMES: usize = 200;

pub struct Harness {
    app: App,
    terminal: Terminal<TestBackend>,
}

impl Harness {
    pub fn new(width: u16, height: u16) -> anyhow::Result<Self> {
        Self::with_app(App::test_default(), width, height)
    }

    pub fn with_app(app: App, width: u16, height: u16) -> anyhow::Result<Self> {
        let terminal = Terminal::new(TestBackend::new(width, height))?;
        let mut harness = Self { app, terminal };
        harness.pump()?;
        Ok(harness)
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn handle(&self) -> ChatHandle {
        self.app.handle()
    }

    /// Press and release `code`.
    pub fn send_key(&mut self, code: KeyCode) {
        for kind in [KeyEventKind::Press, KeyEventKind::Release] {
            let event = Event::Key(KeyEvent::new_with_kind(code, KeyModifiers::NONE, kind));
            app::handle_terminal_event(&mut self.app, event);
        }
    }

    /// Type `text` into the input field, one key at a time.
    pub fn enter_text(&mut self, text: &str) {
        for c in text.chars() {
            self.send_key(KeyCode::Char(c));
        }
    }

    /// Type `text` and commit it with Enter.
    pub fn write_line(&mut self, text: &str) {
        self.enter_text(text);
        self.send_key(KeyCode::Enter);
    }

    /// Resize the screen the way a terminal resize (or a device rotation)
    /// would.
    pub fn resize(&mut self, width: u16, height: u16) -> anyhow::Result<()> {
        self.terminal.backend_mut().resize(width, height);
        app::handle_terminal_event(&mut self.app, Event::Resize(width, height));
        self.pump()
    }

    /// Drain queued app events and draw one frame.
    pub fn pump(&mut self) -> anyhow::Result<()> {
        while let Ok(event) = self.app.event_rx.try_recv() {
            app::handle_app_event(&mut self.app, event);
        }
        let app = &mut self.app;
        self.terminal.draw(|f| crate::ui::render(f, app))?;
        Ok(())
    }

    /// Draw frames until no scroll is pending and the animation has stopped.
    /// Returns the number of frames drawn.
    pub fn settle(&mut self) -> anyhow::Result<usize> {
        for frame in 1..=MAX_SETTLE_FRAMES {
            self.pump()?;
            if self.app.viewport.is_settled() && self.app.event_rx.is_empty() {
                return Ok(frame);
            }
        }
        anyhow::bail!("viewport did not settle within {MAX_SETTLE_FRAMES} frames")
    }

    /// Whether the last occurrence of `text` is on screen right now.
    pub fn text_is_visible(&self, text: &str) -> Result<bool, VisibilityError> {
        visibility::text_is_visible(&self.app.transcript_view(), text)
    }

    /// Screen contents, one string per row.
    pub fn screen_lines(&self) -> Vec<String> {
        let buf = self.terminal.backend().buffer();
        (0..buf.area.height)
            .map(|y| (0..buf.area.width).map(|x| buf[(x, y)].symbol()).collect())
            .collect()
    }
}
