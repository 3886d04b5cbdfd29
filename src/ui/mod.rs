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

mod chat;
mod input;
mod layout;
pub mod theme;
pub mod wrap;

use crate::app::App;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

pub fn render(frame: &mut Frame, app: &mut App) {
    let areas = layout::compute(frame.area());

    // Body: transcript (runs the layout pass)
    chat::render(frame, areas.body, app);

    render_separator(frame, areas.input_sep);
    input::render(frame, areas.input, app);

    if let Some(footer_area) = areas.footer {
        render_footer(frame, footer_area, app);
    }
}

const FOOTER_PAD: u16 = 2;

fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
    let padded = Rect {
        x: area.x + FOOTER_PAD,
        y: area.y,
        width: area.width.saturating_sub(FOOTER_PAD * 2),
        height: area.height,
    };
    frame.render_widget(Paragraph::new(footer_line(app)), padded);
}

fn footer_line(app: &App) -> Line<'static> {
    let viewport = &app.viewport;
    let position = if viewport.max_scroll() == 0 {
        "all".to_owned()
    } else if viewport.scroll_offset >= viewport.max_scroll() {
        "bottom".to_owned()
    } else {
        format!("{}/{}", viewport.scroll_offset, viewport.max_scroll())
    };
    Line::from(vec![
        Span::styled(format!("[{position}]"), Style::default().fg(theme::RUST_ORANGE)),
        Span::styled(
            "  Enter to send · PgUp/PgDn to scroll · Ctrl+C to quit",
            Style::default().fg(theme::DIM),
        ),
    ])
}

fn render_separator(frame: &mut Frame, area: Rect) {
    if area.height == 0 {
        return;
    }
    let sep_str = theme::SEPARATOR_CHAR.repeat(usize::from(area.width));
    let line = Line::from(Span::styled(sep_str, Style::default().fg(theme::DIM)));
    frame.render_widget(Paragraph::new(line), area);
}
