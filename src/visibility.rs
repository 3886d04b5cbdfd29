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

//! Checks whether a piece of transcript text is on screen.
//!
//! The transcript is word-wrapped, so a target string can be split across
//! several display lines that do not exist in the source text. The check
//! finds the display lines the target occupies, computes one screen cell per
//! line (the middle of the matched part), and requires every one of them to be
//! inside the chat viewport.
//!
//! Only the last occurrence of the target is checked.

use crate::ui::wrap::{TextLayout, display_width};
use ratatui::layout::Rect;
use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VisibilityError {
    #[error("Could not find: {text}")]
    NotFound { text: String },
    #[error("Cannot look for an empty string")]
    EmptyTarget,
}

/// The part of a target string found on one display line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub line_number: usize,
    /// Byte offset of the match within the display line.
    pub offset: usize,
    pub line_text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenPoint {
    pub x: i32,
    pub y: i32,
}

/// A rectangle of screen cells. Both edges are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl ScreenRect {
    /// Cells covered by `area`. A zero-sized area contains nothing.
    pub fn from_area(area: Rect) -> Self {
        let left = i32::from(area.x);
        let top = i32::from(area.y);
        Self {
            left,
            top,
            right: left + i32::from(area.width) - 1,
            bottom: top + i32::from(area.height) - 1,
        }
    }

    #[must_use]
    pub fn contains(&self, point: ScreenPoint) -> bool {
        point.x >= self.left && point.x <= self.right && point.y >= self.top && point.y <= self.bottom
    }
}

/// Read-only snapshot of the transcript as it was last laid out and drawn.
#[derive(Debug, Clone, Copy)]
pub struct TranscriptView<'a> {
    /// The laid-out transcript text.
    pub text: &'a str,
    pub layout: &'a TextLayout,
    /// Screen area of the scroll container.
    pub area: Rect,
    /// Rows scrolled past the top of the container.
    pub scroll_offset: usize,
}

impl TranscriptView<'_> {
    pub fn visible_area(&self) -> ScreenRect {
        ScreenRect::from_area(self.area)
    }

    /// Screen row of the first text row, after scrolling.
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn text_top(&self) -> i32 {
        i32::from(self.area.y) - self.scroll_offset as i32
    }
}

/// Whether the last occurrence of `text_to_find` is completely inside the
/// visible part of the transcript.
pub fn text_is_visible(
    view: &TranscriptView<'_>,
    text_to_find: &str,
) -> Result<bool, VisibilityError> {
    let visible = view.visible_area();
    let all_lines = all_lines_of_text(view.text, view.layout);
    let matching = matching_lines_of_text(view.text, &all_lines, text_to_find)?;

    for line in &matching {
        let full_line = all_lines.get(line.line_number).copied().unwrap_or("");
        let point = coordinates_for_line(view, line, full_line);
        if !visible.contains(point) {
            tracing::trace!(
                line = line.line_number,
                x = point.x,
                y = point.y,
                "match outside visible area"
            );
            return Ok(false);
        }
    }

    Ok(true)
}

/// The display lines of `full_text`, one entry per wrapped line.
pub fn all_lines_of_text<'a>(full_text: &'a str, layout: &TextLayout) -> Vec<&'a str> {
    layout.lines(full_text).collect()
}

/// Every display line covered by the last occurrence of `text_to_find`, with
/// the exact part of the target found on that line.
pub fn matching_lines_of_text(
    full_text: &str,
    all_lines: &[&str],
    text_to_find: &str,
) -> Result<Vec<Line>, VisibilityError> {
    if text_to_find.is_empty() {
        return Err(VisibilityError::EmptyTarget);
    }
    let Some(index) = full_text.rfind(text_to_find) else {
        return Err(VisibilityError::NotFound { text: text_to_find.to_owned() });
    };

    let Some((start_line, mut offset)) = find_start_line(all_lines, index) else {
        return Ok(Vec::new());
    };

    let mut words: VecDeque<String> =
        split_on_boundaries(text_to_find).into_iter().map(str::to_owned).collect();
    let mut matching = Vec::new();

    for (line_number, line) in all_lines.iter().enumerate().skip(start_line) {
        let rest = line.get(offset..).unwrap_or("");
        let matched = match_words(rest, &mut words);
        if matched.is_empty() {
            break;
        }
        matching.push(Line { line_number, offset, line_text: matched });
        if words.is_empty() {
            break;
        }
        // Wrapped continuations start at the beginning of the next line.
        offset = 0;
    }

    Ok(matching)
}

/// Display line holding byte `index`, and the offset of `index` within it.
fn find_start_line(all_lines: &[&str], index: usize) -> Option<(usize, usize)> {
    let mut current = 0;
    for (line_number, line) in all_lines.iter().enumerate() {
        if index < current + line.len() {
            return Some((line_number, index - current));
        }
        current += line.len();
    }
    None
}

/// Consume the words of the target that `line` starts with and return the
/// matched text. Words that did not match stay in `words`.
///
/// A token may match partially in two places: the target can end inside the
/// line's token, and a word broken by a hard wrap ends the line with a prefix
/// of the target's word (the remainder is left for the next line).
fn match_words(line: &str, words: &mut VecDeque<String>) -> String {
    let line_words = split_on_boundaries(line);
    let last = line_words.len().saturating_sub(1);
    let mut matched = String::new();

    for (i, line_word) in line_words.into_iter().enumerate() {
        let Some(word) = words.pop_front() else {
            break;
        };
        if word == line_word {
            matched.push_str(line_word);
            continue;
        }
        if words.is_empty() && line_word.starts_with(word.as_str()) {
            matched.push_str(&word);
            break;
        }
        if i == last && word.starts_with(line_word) {
            matched.push_str(line_word);
            words.push_front(word[line_word.len()..].to_owned());
            break;
        }
        words.push_front(word);
        break;
    }

    matched
}

/// Split `text` at every word boundary. Word characters are alphanumerics and
/// `_`; each run of word or non-word characters becomes one token. Never
/// yields empty tokens, so joining the tokens gives back `text`.
pub fn split_on_boundaries(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut prev: Option<bool> = None;

    for (i, ch) in text.char_indices() {
        let word = is_word_char(ch);
        if prev.is_some_and(|p| p != word) {
            tokens.push(&text[start..i]);
            start = i;
        }
        prev = Some(word);
    }
    if start < text.len() {
        tokens.push(&text[start..]);
    }

    tokens
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

/// Screen cell in the middle of a matched line part.
///
/// The width counts the part's trailing spaces, including ones hanging past
/// the right edge, so a part ending in many spaces can land off screen.
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
pub fn coordinates_for_line(view: &TranscriptView<'_>, line: &Line, full_line: &str) -> ScreenPoint {
    let pre_text = full_line.get(..line.offset).unwrap_or("");
    let pre_text_width = display_width(pre_text) as i32;
    let text_width = display_width(&line.line_text) as i32;

    // Middle of the matched text, from the left edge of the transcript
    let x = i32::from(view.area.x) + pre_text_width + text_width / 2;
    // Row of the line, plus the transcript top on screen (already scrolled)
    let y = view.layout.line_baseline(line.line_number) + view.text_top();

    ScreenPoint { x, y }
}

#[cfg(test)]
mod tests {
    // =====
    // TESTS: 24
    // =====

    use super::*;
    use pretty_assertions::assert_eq;

    fn view<'a>(text: &'a str, layout: &'a TextLayout, area: Rect, scroll: usize) -> TranscriptView<'a> {
        TranscriptView { text, layout, area, scroll_offset: scroll }
    }

    fn line(line_number: usize, offset: usize, text: &str) -> Line {
        Line { line_number, offset, line_text: text.to_owned() }
    }

    // split_on_boundaries

    #[test]
    fn split_separates_words_and_punctuation() {
        assert_eq!(
            split_on_boundaries("This is number 5.9!"),
            vec!["This", " ", "is", " ", "number", " ", "5", ".", "9", "!"]
        );
    }

    #[test]
    fn split_has_no_leading_empty_token() {
        assert_eq!(split_on_boundaries(" hi"), vec![" ", "hi"]);
        assert_eq!(split_on_boundaries("hi"), vec!["hi"]);
    }

    #[test]
    fn split_empty_text_is_empty() {
        assert!(split_on_boundaries("").is_empty());
    }

    #[test]
    fn split_keeps_newlines_in_non_word_runs() {
        assert_eq!(split_on_boundaries("a!\nb"), vec!["a", "!\n", "b"]);
    }

    #[test]
    fn split_then_join_round_trips() {
        for text in [
            "This is message number 200.9!",
            "  leading and trailing  ",
            "snake_case-and-kebab",
            "ünïcödé wörds, ok?",
            "\n\n",
        ] {
            assert_eq!(split_on_boundaries(text).concat(), text);
        }
    }

    // find_start_line

    #[test]
    fn start_line_for_offset_in_first_line() {
        assert_eq!(find_start_line(&["hello ", "world"], 2), Some((0, 2)));
    }

    #[test]
    fn start_line_at_exact_line_start() {
        assert_eq!(find_start_line(&["hello ", "world"], 6), Some((1, 0)));
    }

    #[test]
    fn start_line_past_layout_is_none() {
        assert_eq!(find_start_line(&["ab"], 5), None);
    }

    // matching_lines_of_text

    #[test]
    fn missing_text_is_an_error() {
        let err = matching_lines_of_text("hello\n", &["hello\n", ""], "bye").unwrap_err();
        assert_eq!(err, VisibilityError::NotFound { text: "bye".to_owned() });
    }

    #[test]
    fn empty_target_is_an_error() {
        let err = matching_lines_of_text("hello", &["hello"], "").unwrap_err();
        assert_eq!(err, VisibilityError::EmptyTarget);
    }

    #[test]
    fn match_on_single_line() {
        let found = matching_lines_of_text("say hello there", &["say hello there"], "hello").unwrap();
        assert_eq!(found, vec![line(0, 4, "hello")]);
    }

    #[test]
    fn match_spans_wrapped_lines() {
        let text = "This is message number 12.9!";
        let layout = TextLayout::new(text, 12);
        let lines = all_lines_of_text(text, &layout);
        assert_eq!(lines, vec!["This is ", "message ", "number 12.9!"]);

        let found = matching_lines_of_text(text, &lines, "is message number 12").unwrap();
        assert_eq!(
            found,
            vec![line(0, 5, "is "), line(1, 0, "message "), line(2, 0, "number 12")]
        );
    }

    #[test]
    fn match_across_hard_broken_word() {
        let text = "go abcdefghij now";
        let layout = TextLayout::new(text, 5);
        let lines = all_lines_of_text(text, &layout);
        assert_eq!(lines, vec!["go ", "abcde", "fghij ", "now"]);

        let found = matching_lines_of_text(text, &lines, "abcdefghij now").unwrap();
        assert_eq!(
            found,
            vec![line(1, 0, "abcde"), line(2, 0, "fghij "), line(3, 0, "now")]
        );
    }

    #[test]
    fn target_ending_inside_a_token() {
        let text = "number 5.9!\n";
        let lines = vec!["number 5.9!\n", ""];
        let found = matching_lines_of_text(text, &lines, "number 5.9!").unwrap();
        assert_eq!(found, vec![line(0, 0, "number 5.9!")]);
    }

    #[test]
    fn target_starting_mid_word_uses_occurrence_offset() {
        let text = "number 15.9!";
        let found = matching_lines_of_text(text, &[text], "5.9!").unwrap();
        assert_eq!(found, vec![line(0, 8, "5.9!")]);
    }

    #[test]
    fn last_occurrence_is_the_one_matched() {
        let text = "ping\npong\nping\n";
        let layout = TextLayout::new(text, 20);
        let lines = all_lines_of_text(text, &layout);
        let found = matching_lines_of_text(text, &lines, "ping").unwrap();
        assert_eq!(found, vec![line(2, 0, "ping")]);
    }

    // text_is_visible

    #[test]
    fn hello_in_full_viewport_is_visible() {
        let text = "hello\n";
        let layout = TextLayout::new(text, 20);
        let v = view(text, &layout, Rect::new(0, 0, 20, 5), 0);
        assert!(text_is_visible(&v, "hello").unwrap());
    }

    #[test]
    fn missing_text_is_not_silently_false() {
        let text = "hello\n";
        let layout = TextLayout::new(text, 20);
        let v = view(text, &layout, Rect::new(0, 0, 20, 5), 0);
        assert!(matches!(text_is_visible(&v, "nope"), Err(VisibilityError::NotFound { .. })));
    }

    #[test]
    fn line_scrolled_above_viewport_is_not_visible() {
        let text = "one\ntwo\nthree\nfour\n";
        let layout = TextLayout::new(text, 20);
        let v = view(text, &layout, Rect::new(0, 2, 20, 2), 2);
        assert!(!text_is_visible(&v, "one").unwrap());
        assert!(!text_is_visible(&v, "two").unwrap());
        assert!(text_is_visible(&v, "three").unwrap());
        assert!(text_is_visible(&v, "four").unwrap());
    }

    #[test]
    fn line_below_viewport_is_not_visible() {
        let text = "one\ntwo\nthree\n";
        let layout = TextLayout::new(text, 20);
        let v = view(text, &layout, Rect::new(0, 0, 20, 2), 0);
        assert!(text_is_visible(&v, "two").unwrap());
        assert!(!text_is_visible(&v, "three").unwrap());
    }

    #[test]
    fn partially_visible_wrapped_match_is_not_visible() {
        let text = "This is message number 12.9!";
        let layout = TextLayout::new(text, 12);
        // Rows 0 and 1 visible, row 2 ("number 12.9!") cut off.
        let v = view(text, &layout, Rect::new(0, 0, 12, 2), 0);
        assert!(text_is_visible(&v, "is message").unwrap());
        assert!(!text_is_visible(&v, "message number").unwrap());
    }

    #[test]
    fn coordinates_use_middle_of_match_and_scrolled_top() {
        let text = "aa bbbb\ncc\n";
        let layout = TextLayout::new(text, 20);
        let v = view(text, &layout, Rect::new(2, 5, 20, 3), 1);
        let point = coordinates_for_line(&v, &line(0, 3, "bbbb"), "aa bbbb\n");
        assert_eq!(point, ScreenPoint { x: 2 + 3 + 2, y: 4 });
    }

    #[test]
    fn hanging_spaces_push_the_midpoint_off_screen() {
        let text = "abcde     fgh";
        let layout = TextLayout::new(text, 5);
        let v = view(text, &layout, Rect::new(0, 0, 5, 4), 0);
        assert!(text_is_visible(&v, "abcde").unwrap());
        assert!(text_is_visible(&v, "fgh").unwrap());
        // "abcde     " is ten columns wide, its middle is column 5
        assert!(!text_is_visible(&v, text).unwrap());
    }

    #[test]
    fn zero_sized_area_contains_nothing() {
        let rect = ScreenRect::from_area(Rect::new(0, 0, 0, 0));
        assert!(!rect.contains(ScreenPoint { x: 0, y: 0 }));
    }
}
