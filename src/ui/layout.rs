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

use ratatui::layout::{Constraint, Layout, Rect};

pub struct AppLayout {
    pub body: Rect,
    pub input_sep: Rect,
    pub input: Rect,
    pub footer: Option<Rect>,
}

pub fn compute(area: Rect) -> AppLayout {
    if area.height < 4 {
        // Ultra-compact: no separator, no footer
        let [body, input] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);
        AppLayout { body, input_sep: Rect::new(area.x, input.y, area.width, 0), input, footer: None }
    } else {
        let [body, input_sep, input, footer] = Layout::vertical([
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);
        AppLayout { body, input_sep, input, footer: Some(footer) }
    }
}
