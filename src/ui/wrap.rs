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

//! Word-wrap layout for the transcript.
//!
//! A [`TextLayout`] splits text into display lines for a given column width.
//! Every display line is a byte range into the source text. Ranges are
//! contiguous and together cover the whole text: a line keeps its trailing
//! spaces and its terminating `\n`, so summing line lengths walks the source
//! text offset by offset. Text ending in `\n` gets a final empty line, which is
//! where the next append will start.
//!
//! Break opportunities follow Unicode line breaking (after spaces, between
//! ideographs); hyphenated words are not split. Spaces never force a wrap
//! (they hang past the right edge); a word wider than the whole line is broken
//! at the column limit.

use textwrap::{Options, WordSeparator, WordSplitter, WrapAlgorithm};
use unicode_width::UnicodeWidthChar;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRange {
    pub start: usize,
    pub end: usize,
}

impl LineRange {
    #[must_use]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextLayout {
    lines: Vec<LineRange>,
    width: u16,
    text_len: usize,
}

impl TextLayout {
    pub fn new(text: &str, width: u16) -> Self {
        let width = width.max(1);
        let options = Options::new(usize::from(width))
            .break_words(true)
            .word_separator(WordSeparator::UnicodeBreakProperties)
            .word_splitter(WordSplitter::NoHyphenation)
            .wrap_algorithm(WrapAlgorithm::FirstFit);

        // Without indents or hyphens every wrapped line borrows from `text`,
        // so its start is its offset in `text`. The trimmed spaces and `\n`
        // between two lines belong to the earlier one.
        let mut starts: Vec<usize> = Vec::new();
        for line in textwrap::wrap(text, &options) {
            let prev = starts.last().copied().unwrap_or(0);
            let start = byte_offset(text, &line).filter(|&s| s >= prev).unwrap_or(prev);
            starts.push(start);
        }
        if let Some(first) = starts.first_mut() {
            *first = 0;
        } else {
            starts.push(0);
        }

        let ends = starts.iter().skip(1).copied().chain(std::iter::once(text.len()));
        let lines =
            starts.iter().copied().zip(ends).map(|(start, end)| LineRange { start, end }).collect();

        Self { lines, width, text_len: text.len() }
    }

    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Total height in rows. One row per display line.
    #[must_use]
    pub fn height(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Length of the source text this layout was computed for.
    #[must_use]
    pub fn text_len(&self) -> usize {
        self.text_len
    }

    #[must_use]
    pub fn line_range(&self, line: usize) -> Option<LineRange> {
        self.lines.get(line).copied()
    }

    #[must_use]
    pub fn line_start(&self, line: usize) -> usize {
        self.lines.get(line).map_or(self.text_len, |r| r.start)
    }

    #[must_use]
    pub fn line_end(&self, line: usize) -> usize {
        self.lines.get(line).map_or(self.text_len, |r| r.end)
    }

    /// Row of the line's baseline, relative to the top of the text.
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    #[must_use]
    pub fn line_baseline(&self, line: usize) -> i32 {
        line as i32
    }

    /// Iterate the display lines of `text`. `text` must be the text this layout
    /// was built from (or a longer text with the same prefix).
    pub fn lines<'s, 't>(&'s self, text: &'t str) -> impl Iterator<Item = &'t str> + use<'s, 't> {
        self.lines.iter().map(move |r| text.get(r.start..r.end).unwrap_or(""))
    }
}

/// Rendered width of `text` in terminal columns. Control characters take no
/// space.
#[must_use]
pub fn display_width(text: &str) -> usize {
    text.chars().map(char_width).sum()
}

fn char_width(ch: char) -> usize {
    UnicodeWidthChar::width(ch).unwrap_or(0)
}

/// Offset of `part` inside `text`, if `part` is a slice of it.
fn byte_offset(text: &str, part: &str) -> Option<usize> {
    let offset = part.as_ptr().addr().checked_sub(text.as_ptr().addr())?;
    (offset + part.len() <= text.len()).then_some(offset)
}
