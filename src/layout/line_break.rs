//! Line breaking algorithm

use crate::content::{Breakpoint, Run, StyledContent};
use crate::layout::font::FontLibrary;
use serde::Serialize;
use unicode_segmentation::UnicodeSegmentation;

/// Glyph drawn after a word split across lines
pub const HYPHEN: &str = "-";

/// One visual line: the content between two positions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LineSpan {
    pub start: Breakpoint,
    pub end: Breakpoint,
    /// Visible width in pixels, hanging whitespace excluded
    pub width: u32,
    /// Renderer draws a hyphen after the line
    pub hyphenated: bool,
    /// Line follows a half line break
    pub half_spacing: bool,
}

/// Greedy line breaker over styled content
#[derive(Debug, Clone, Copy)]
pub struct LineBreaker<'a> {
    content: &'a StyledContent,
    fonts: &'a FontLibrary,
    break_words: bool,
}

fn is_space(grapheme: &str) -> bool {
    grapheme.chars().all(char::is_whitespace)
}

impl<'a> LineBreaker<'a> {
    /// `break_words` allows breaks at any grapheme; otherwise lines break
    /// at whitespace and only over-long words are split.
    pub fn new(content: &'a StyledContent, fonts: &'a FontLibrary, break_words: bool) -> Self {
        Self {
            content,
            fonts,
            break_words,
        }
    }

    pub fn content(&self) -> &'a StyledContent {
        self.content
    }

    /// Lay out the line starting at `start`, `None` once content is exhausted.
    ///
    /// The returned line always ends strictly after its start.
    pub fn next_line(&self, start: Breakpoint, width: u32) -> Option<LineSpan> {
        let runs = self.content.runs();
        let start = self.content.normalize(start);
        if start.run >= runs.len() {
            return None;
        }

        let mut x: u32 = 0;
        let mut consumed = false;
        // Position after the last whitespace and the line width before it
        let mut word_break: Option<(Breakpoint, u32)> = None;
        // Last position where the line could end with a hyphen
        let mut hyphen_fit: Option<(Breakpoint, u32)> = None;

        for (idx, run) in runs.iter().enumerate().skip(start.run) {
            let (style, text) = match run {
                Run::NewLine | Run::HalfLineBreak => {
                    return Some(self.finish(start, Breakpoint::new(idx + 1, 0), x, false));
                }
                Run::Text { style, text } => (*style, text.as_str()),
            };

            let font = self.fonts.get(style);
            let hyphen_width = font.text_width(HYPHEN);
            let from = if idx == start.run { start.offset } else { 0 };
            let mut graphemes = text[from..]
                .grapheme_indices(true)
                .map(|(i, g)| (i + from, g))
                .peekable();

            while let Some((offset, grapheme)) = graphemes.next() {
                let here = Breakpoint::new(idx, offset);
                let w = font.grapheme_width(grapheme);

                if !self.break_words && is_space(grapheme) {
                    if x + w > width {
                        // Whitespace hangs past the edge of the line
                        let mut end = offset + grapheme.len();
                        while let Some(&(next, g)) = graphemes.peek() {
                            if !is_space(g) {
                                break;
                            }
                            end = next + g.len();
                            graphemes.next();
                        }
                        return Some(self.finish(start, Breakpoint::new(idx, end), x, false));
                    }
                    word_break = Some((Breakpoint::new(idx, offset + grapheme.len()), x));
                    x += w;
                    consumed = true;
                    continue;
                }

                if x + w <= width {
                    if !self.break_words && x + hyphen_width <= width {
                        hyphen_fit = Some((here, x));
                    }
                    x += w;
                    consumed = true;
                    continue;
                }

                if !consumed {
                    // A single glyph wider than the line gets clipped
                    let end = Breakpoint::new(idx, offset + grapheme.len());
                    return Some(self.finish(start, end, width, false));
                }

                if !self.break_words {
                    if let Some((at, line_width)) = word_break {
                        return Some(self.finish(start, at, line_width, false));
                    }
                    if let Some((at, line_width)) = hyphen_fit.filter(|(at, _)| *at > start) {
                        return Some(self.finish(start, at, line_width, true));
                    }
                }
                return Some(self.finish(start, here, x, false));
            }
        }

        Some(self.finish(start, self.content.end(), x, false))
    }

    fn finish(&self, start: Breakpoint, end: Breakpoint, width: u32, hyphenated: bool) -> LineSpan {
        // Empty text runs between the break and the line do not count
        let half_spacing = start.offset == 0
            && self.content.runs()[..start.run]
                .iter()
                .rev()
                .find(|run| !matches!(run, Run::Text { text, .. } if text.is_empty()))
                .is_some_and(|run| matches!(run, Run::HalfLineBreak));
        let line = LineSpan {
            start,
            end: self.content.normalize(end),
            width,
            hyphenated,
            half_spacing,
        };
        log::trace!(
            "line {:?}..{:?} width {}{}",
            line.start,
            line.end,
            line.width,
            if hyphenated { " (hyphenated)" } else { "" }
        );
        line
    }

    /// Iterate all lines from `start` at a fixed width
    pub fn lines_from(&self, start: Breakpoint, width: u32) -> Lines<'a> {
        Lines {
            breaker: *self,
            next: start,
            width,
        }
    }
}

/// Iterator over consecutive lines
#[derive(Debug, Clone)]
pub struct Lines<'a> {
    breaker: LineBreaker<'a>,
    next: Breakpoint,
    width: u32,
}

impl Iterator for Lines<'_> {
    type Item = LineSpan;

    fn next(&mut self) -> Option<LineSpan> {
        let line = self.breaker.next_line(self.next, self.width)?;
        self.next = line.end;
        Some(line)
    }
}

/// Break all content into lines no wider than `width`
pub fn break_lines(
    content: &StyledContent,
    fonts: &FontLibrary,
    width: u32,
    break_words: bool,
) -> Vec<LineSpan> {
    LineBreaker::new(content, fonts, break_words)
        .lines_from(Breakpoint::START, width)
        .collect()
}
