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

use crate::app::{App, Focus};
use crate::ui::theme;
use crate::ui::wrap::display_width;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

/// Horizontal padding to match footer inset.
const INPUT_PAD: u16 = 2;

/// Prompt prefix width: "❯ " = 2 columns
const PROMPT_WIDTH: u16 = 2;

#[allow(clippy::cast_possible_truncation)]
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let padded = Rect {
        x: area.x + INPUT_PAD,
        y: area.y,
        width: area.width.saturating_sub(INPUT_PAD * 2),
        height: area.height,
    };
    let prompt =
        Span::styled(format!("{} ", theme::PROMPT_CHAR), Style::default().fg(theme::RUST_ORANGE));

    if app.input.is_empty() {
        let line = Line::from(vec![
            prompt,
            Span::styled("Type a message...", Style::default().fg(theme::DIM)),
        ]);
        frame.render_widget(Paragraph::new(line), padded);
        if app.focus == Focus::Input {
            frame.set_cursor_position((padded.x + PROMPT_WIDTH, padded.y));
        }
        return;
    }

    // Keep the cursor in view by dropping characters off the left edge.
    let content_width = usize::from(padded.width.saturating_sub(PROMPT_WIDTH));
    if content_width == 0 {
        return;
    }
    let text = app.input.text();
    let before_cursor: String = text.chars().take(app.input.cursor).collect();
    let mut skip = 0;
    while display_width(&before_cursor.chars().skip(skip).collect::<String>()) >= content_width {
        skip += 1;
    }
    let shown: String = text.chars().skip(skip).collect();
    let cursor_col = display_width(&before_cursor.chars().skip(skip).collect::<String>());

    frame.render_widget(Paragraph::new(Line::from(vec![prompt, Span::raw(shown)])), padded);
    if app.focus == Focus::Input {
        frame.set_cursor_position((padded.x + PROMPT_WIDTH + cursor_col as u16, padded.y));
    }
}
