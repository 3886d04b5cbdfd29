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

use crate::app::App;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Text};
use ratatui::widgets::Paragraph;

/// Lay out the transcript for `area`, settle the viewport against the new
/// layout, and draw the visible rows.
pub fn render(frame: &mut Frame, area: Rect, app: &mut App) {
    // Layout pass: the new height is known from here on
    app.refresh_layout(area.width);
    let content_height = app.layout.height();
    app.viewport.layout_complete(app.laid_out_epoch, area, content_height);
    app.viewport.tick();
    app.rendered_chat_area = area;

    let lines: Vec<Line> = app
        .layout
        .lines(&app.transcript)
        .skip(app.viewport.scroll_offset)
        .take(usize::from(area.height))
        .map(|line| Line::raw(line.trim_end_matches('\n')))
        .collect();

    frame.render_widget(Paragraph::new(Text::from(lines)), area);
}
