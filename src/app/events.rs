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

use super::submit::{append_to_chat, submit_line};
use super::{App, AppEvent, Focus};
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

pub fn handle_terminal_event(app: &mut App, event: Event) {
    match event {
        Event::Key(key) => handle_key(app, key),
        Event::Mouse(mouse) => handle_mouse_event(app, mouse),
        Event::Paste(text) => {
            app.focus = Focus::Input;
            app.input.insert_str(&text);
        }
        Event::Resize(width, height) => {
            // Wrapping changes with the width; stay pinned to the bottom.
            let epoch = app.invalidate_layout();
            app.viewport.request_scroll_to_bottom(epoch);
            tracing::debug!(width, height, epoch, "terminal resized");
        }
        _ => {}
    }
}

pub fn handle_app_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::Append { message, ack } => {
            let epoch = append_to_chat(app, &message);
            if let Some(ack) = ack {
                let _ = ack.send(epoch);
            }
        }
    }
}

fn is_ctrl_shortcut(modifiers: KeyModifiers) -> bool {
    modifiers.contains(KeyModifiers::CONTROL) && !modifiers.contains(KeyModifiers::ALT)
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Enter commits on exactly one phase; its other phases are swallowed.
    if key.code == KeyCode::Enter {
        if app.commit_phase.matches(key.kind) {
            submit_line(app);
        }
        return;
    }
    if key.kind == KeyEventKind::Release {
        return;
    }

    match (key.code, key.modifiers) {
        (KeyCode::Char(c), m) if is_ctrl_shortcut(m) && matches!(c, 'c' | 'q') => {
            app.should_quit = true;
        }
        (KeyCode::PageUp, _) => {
            app.viewport.scroll_up(page_size(app));
        }
        (KeyCode::PageDown, _) => {
            app.viewport.scroll_down(page_size(app));
        }
        (KeyCode::Char(c), m) if !is_ctrl_shortcut(m) => {
            app.focus = Focus::Input;
            app.input.insert_char(c);
        }
        (KeyCode::Backspace, _) => {
            app.focus = Focus::Input;
            app.input.delete_char_before();
        }
        (KeyCode::Delete, _) => {
            app.focus = Focus::Input;
            app.input.delete_char_after();
        }
        (KeyCode::Left, _) => app.input.move_left(),
        (KeyCode::Right, _) => app.input.move_right(),
        (KeyCode::Home, _) => app.input.move_home(),
        (KeyCode::End, _) => app.input.move_end(),
        (KeyCode::Esc, _) => app.focus = Focus::Transcript,
        _ => {}
    }
}

fn page_size(app: &App) -> usize {
    usize::from(app.viewport.area.height.saturating_sub(1)).max(1)
}

fn handle_mouse_event(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::ScrollUp => app.viewport.scroll_up(app.scroll_step),
        MouseEventKind::ScrollDown => app.viewport.scroll_down(app.scroll_step),
        MouseEventKind::Down(MouseButton::Left) => {
            let chat = app.rendered_chat_area;
            let inside = mouse.column >= chat.x
                && mouse.column < chat.right()
                && mouse.row >= chat.y
                && mouse.row < chat.bottom();
            app.focus = if inside { Focus::Transcript } else { Focus::Input };
        }
        _ => {}
    }
}
