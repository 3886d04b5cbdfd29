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

use super::input::InputState;
use super::viewport::Viewport;
use crate::ui::wrap::TextLayout;
use crate::visibility::TranscriptView;
use crossterm::event::KeyEventKind;
use ratatui::layout::Rect;
use tokio::sync::{mpsc, oneshot, watch};

/// Key phase on which Enter commits the input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitPhase {
    Press,
    Release,
}

impl CommitPhase {
    #[must_use]
    pub fn matches(self, kind: KeyEventKind) -> bool {
        match self {
            Self::Press => kind == KeyEventKind::Press,
            Self::Release => kind == KeyEventKind::Release,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input,
    Transcript,
}

/// Work handed to the UI task from elsewhere.
#[derive(Debug)]
pub enum AppEvent {
    Append {
        message: String,
        /// Receives the layout epoch the append produced.
        ack: Option<oneshot::Sender<u64>>,
    },
}

pub struct App {
    /// Append-only chat text, lines separated by `\n`.
    pub transcript: String,
    pub input: InputState,
    pub focus: Focus,
    pub viewport: Viewport,
    /// Wrapped layout from the last layout pass.
    pub layout: TextLayout,
    /// Bumped on every change that needs a new layout (append, resize).
    pub layout_epoch: u64,
    /// Epoch the current `layout` was computed for.
    pub laid_out_epoch: u64,
    pub commit_phase: CommitPhase,
    pub scroll_step: usize,
    pub should_quit: bool,
    pub event_tx: mpsc::UnboundedSender<AppEvent>,
    pub event_rx: mpsc::UnboundedReceiver<AppEvent>,
    /// Publishes `laid_out_epoch` after every layout pass.
    pub layout_tx: watch::Sender<u64>,
    /// Area where the transcript was rendered.
    pub rendered_chat_area: Rect,
}

impl App {
    pub fn new(commit_phase: CommitPhase) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (layout_tx, _) = watch::channel(0);
        Self {
            transcript: String::new(),
            input: InputState::new(),
            focus: Focus::Input,
            viewport: Viewport::default(),
            layout: TextLayout::new("", 1),
            layout_epoch: 0,
            laid_out_epoch: 0,
            commit_phase,
            scroll_step: 3,
            should_quit: false,
            event_tx,
            event_rx,
            layout_tx,
            rendered_chat_area: Rect::default(),
        }
    }

    /// App with release-phase commits and no terminal attached.
    pub fn test_default() -> Self {
        Self::new(CommitPhase::Release)
    }

    /// A handle other threads and tasks can use to talk to this app.
    pub fn handle(&self) -> ChatHandle {
        ChatHandle { tx: self.event_tx.clone(), layout_rx: self.layout_tx.subscribe() }
    }

    /// Force a new layout pass before the next scroll resolves.
    pub fn invalidate_layout(&mut self) -> u64 {
        self.layout_epoch += 1;
        self.layout_epoch
    }

    /// Re-wrap the transcript if it changed or the width did. Publishes the
    /// laid-out epoch either way.
    pub fn refresh_layout(&mut self, width: u16) {
        if self.laid_out_epoch != self.layout_epoch || self.layout.width() != width.max(1) {
            self.layout = TextLayout::new(&self.transcript, width);
            self.laid_out_epoch = self.layout_epoch;
        }
        self.layout_tx.send_replace(self.laid_out_epoch);
    }

    /// The transcript as of the last layout pass, for visibility checks.
    pub fn transcript_view(&self) -> TranscriptView<'_> {
        TranscriptView {
            text: self.transcript.get(..self.layout.text_len()).unwrap_or(""),
            layout: &self.layout,
            area: self.rendered_chat_area,
            scroll_offset: self.viewport.scroll_offset,
        }
    }
}

/// Cloneable, `Send` entry point into the UI task's queue.
#[derive(Debug, Clone)]
pub struct ChatHandle {
    tx: mpsc::UnboundedSender<AppEvent>,
    layout_rx: watch::Receiver<u64>,
}

impl ChatHandle {
    /// Queue `message` for appending to the transcript. Returns false when the
    /// UI task is gone.
    pub fn append_to_chat(&self, message: impl Into<String>) -> bool {
        self.tx.send(AppEvent::Append { message: message.into(), ack: None }).is_ok()
    }

    /// Append `message` and wait until the layout pass that includes it has
    /// completed. Returns that layout epoch, or `None` if the UI task is gone.
    pub async fn append_and_wait_for_layout(&self, message: impl Into<String>) -> Option<u64> {
        let (ack_tx, ack_rx) = oneshot::channel();
        self.tx.send(AppEvent::Append { message: message.into(), ack: Some(ack_tx) }).ok()?;
        let epoch = ack_rx.await.ok()?;
        self.layout_settled(epoch).await.then_some(epoch)
    }

    /// Wait until layout epoch `epoch` has been laid out.
    pub async fn layout_settled(&self, epoch: u64) -> bool {
        let mut rx = self.layout_rx.clone();
        rx.wait_for(|laid_out| *laid_out >= epoch).await.is_ok()
    }
}
