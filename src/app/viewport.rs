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

use ratatui::layout::Rect;

/// Frames closer than this to the target snap onto it.
const SNAP_DISTANCE: f32 = 0.5;
/// Fraction of the remaining distance covered per frame.
const SMOOTH_FACTOR: f32 = 0.5;

/// A scroll-to-bottom that waits until the transcript change that caused it
/// has been laid out. Until then the content height is stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollRequest {
    pub after_epoch: u64,
}

/// Scroll state of the transcript container.
#[derive(Debug)]
pub struct Viewport {
    /// Rendered scroll offset (rounded from `scroll_pos`).
    pub scroll_offset: usize,
    /// Offset the smooth scroll is heading to.
    pub scroll_target: usize,
    /// Smooth scroll position (fractional) for animation.
    pub scroll_pos: f32,
    /// Wrapped height of the transcript at the last layout pass.
    pub content_height: usize,
    /// Container area at the last layout pass.
    pub area: Rect,
    pending: Option<ScrollRequest>,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            scroll_offset: 0,
            scroll_target: 0,
            scroll_pos: 0.0,
            content_height: 0,
            area: Rect::default(),
            pending: None,
        }
    }
}

impl Viewport {
    /// Scroll to the bottom once layout epoch `after_epoch` has been laid out.
    pub fn request_scroll_to_bottom(&mut self, after_epoch: u64) {
        let after_epoch = self.pending.map_or(after_epoch, |p| p.after_epoch.max(after_epoch));
        self.pending = Some(ScrollRequest { after_epoch });
    }

    #[must_use]
    pub fn pending_scroll(&self) -> Option<ScrollRequest> {
        self.pending
    }

    #[must_use]
    pub fn max_scroll(&self) -> usize {
        self.content_height.saturating_sub(usize::from(self.area.height))
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.scroll_target = self.scroll_target.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.scroll_target = self.scroll_target.saturating_add(lines).min(self.max_scroll());
    }

    /// Called by the renderer after laying out epoch `epoch` into `area`.
    /// Resolves a pending scroll-to-bottom whose change is now laid out.
    pub fn layout_complete(&mut self, epoch: u64, area: Rect, content_height: usize) {
        self.area = area;
        self.content_height = content_height;

        if let Some(request) = self.pending
            && request.after_epoch <= epoch
        {
            self.pending = None;
            // Aim past the end and let the clamp stop us at the real bottom.
            let target = usize::from(area.bottom()) + content_height;
            self.scroll_target = target.min(self.max_scroll());
            tracing::debug!(
                epoch,
                content_height,
                target = self.scroll_target,
                "scroll to bottom resolved"
            );
        }
        self.scroll_target = self.scroll_target.min(self.max_scroll());
    }

    /// Advance the smooth scroll by one frame.
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss, clippy::cast_sign_loss)]
    pub fn tick(&mut self) {
        let target = self.scroll_target as f32;
        let delta = target - self.scroll_pos;
        if delta.abs() < SNAP_DISTANCE {
            self.scroll_pos = target;
        } else {
            self.scroll_pos += delta * SMOOTH_FACTOR;
        }
        self.scroll_offset = (self.scroll_pos.round().max(0.0) as usize).min(self.max_scroll());
    }

    /// No scroll pending and the animation has reached its target.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.pending.is_none() && self.scroll_offset == self.scroll_target
    }
}
