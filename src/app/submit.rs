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

use super::{App, Focus};

/// Commit the input line: append it with a line terminator, clear the field,
/// give focus back to the input and scroll to the bottom once laid out.
pub(super) fn submit_line(app: &mut App) {
    let mut line = app.input.take();
    line.push('\n');
    append_to_chat(app, &line);
    app.focus = Focus::Input;
}

/// Append `message` verbatim and request a scroll to the bottom after the next
/// layout pass. Returns the layout epoch that will include the message.
pub(super) fn append_to_chat(app: &mut App, message: &str) -> u64 {
    app.transcript.push_str(message);
    let epoch = app.invalidate_layout();
    app.viewport.request_scroll_to_bottom(epoch);
    tracing::debug!(bytes = message.len(), epoch, "appended to transcript");
    epoch
}

/// Demo message in the style used to fill the transcript: long enough to wrap
/// and ending in a suffix unique to `number`.
pub fn long_message(number: usize) -> String {
    format!(
        "This is a long message which should wrap over several lines on a narrow screen, \
to check that scrolling keeps up. This is message number {number}.9!"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn submit_appends_line_and_clears_input() {
        let mut app = App::test_default();
        app.input.insert_str("hello");
        submit_line(&mut app);
        assert_eq!(app.transcript, "hello\n");
        assert!(app.input.is_empty());
    }

    #[test]
    fn submit_empty_input_appends_empty_line() {
        let mut app = App::test_default();
        submit_line(&mut app);
        submit_line(&mut app);
        assert_eq!(app.transcript, "\n\n");
    }

    #[test]
    fn submit_restores_input_focus() {
        let mut app = App::test_default();
        app.focus = Focus::Transcript;
        submit_line(&mut app);
        assert_eq!(app.focus, Focus::Input);
    }

    #[test]
    fn transcript_ends_with_each_submitted_line() {
        let mut app = App::test_default();
        for text in ["first", "second line", "ünïcödé", "  padded  "] {
            app.input.insert_str(text);
            submit_line(&mut app);
            assert!(app.transcript.ends_with(&format!("{text}\n")));
        }
    }

    #[test]
    fn append_bumps_epoch_and_requests_scroll() {
        let mut app = App::test_default();
        let epoch = append_to_chat(&mut app, "from elsewhere");
        assert_eq!(epoch, 1);
        assert_eq!(app.transcript, "from elsewhere");
        assert_eq!(app.viewport.pending_scroll().map(|r| r.after_epoch), Some(1));
    }

    #[test]
    fn long_message_has_unique_suffix() {
        assert!(long_message(7).ends_with("This is message number 7.9!"));
        assert!(!long_message(17).contains("number 7.9!"));
    }
}
