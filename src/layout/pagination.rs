//! Pagination: packing lines into fixed-height pages

use crate::content::{Breakpoint, Style, StyledContent};
use crate::error::ConfigError;
use crate::layout::font::FontLibrary;
use crate::layout::line_break::{LineBreaker, LineSpan};
use smallvec::{smallvec, SmallVec};

/// Drawn at the end of a page that continues on the next one
pub const OVERFLOW_INDICATOR: &str = "...";

/// Start position of every page, in order
pub type PageBreaks = SmallVec<[Breakpoint; 8]>;

/// Everything one pagination pass needs
#[derive(Debug, Clone, Copy)]
pub struct LayoutConfig<'a> {
    pub fonts: &'a FontLibrary,
    /// Pixel width available to each line
    pub line_width: u32,
    /// Lines per page
    pub max_lines: usize,
    /// Break at any grapheme instead of at whitespace
    pub break_words: bool,
    /// Reserve room for [`OVERFLOW_INDICATOR`] on the last line of
    /// every page that has a successor
    pub render_page_overflow: bool,
}

impl<'a> LayoutConfig<'a> {
    pub fn new(fonts: &'a FontLibrary, line_width: u32, max_lines: usize) -> Self {
        Self {
            fonts,
            line_width,
            max_lines,
            break_words: false,
            render_page_overflow: false,
        }
    }

    pub fn with_break_words(mut self, break_words: bool) -> Self {
        self.break_words = break_words;
        self
    }

    pub fn with_page_overflow(mut self, render_page_overflow: bool) -> Self {
        self.render_page_overflow = render_page_overflow;
        self
    }

    /// Reject budgets that cannot hold any text
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.line_width == 0 {
            return Err(ConfigError::ZeroLineWidth);
        }
        if self.max_lines == 0 {
            return Err(ConfigError::ZeroMaxLines);
        }
        Ok(())
    }
}

/// Result of one pagination pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    /// Start of each page; never empty, first entry is the content start
    pub starts: PageBreaks,
    /// Total number of lines laid out
    pub line_count: usize,
}

impl Pagination {
    pub fn page_count(&self) -> usize {
        self.starts.len()
    }
}

/// Group lines into pages of at most `max_lines_per_page` lines.
///
/// Returns the start of each page. No lines still yields one page, since a
/// dialog always renders at least its header.
pub fn paginate(lines: &[LineSpan], max_lines_per_page: usize) -> PageBreaks {
    let per_page = max_lines_per_page.max(1);
    let mut starts: PageBreaks = smallvec![Breakpoint::START];
    starts.extend(lines.iter().skip(per_page).step_by(per_page).map(|line| line.start));
    starts
}

/// Lines of consecutive pages, the way [`layout_pages`] lays them out.
///
/// Starts at slot 0 of a page. With `render_page_overflow`, the last line of
/// a page is narrowed by the indicator width unless it ends the content.
#[derive(Debug, Clone)]
pub struct PageLines<'a> {
    breaker: LineBreaker<'a>,
    pos: Breakpoint,
    line_width: u32,
    narrow: Option<u32>,
    per_page: usize,
    slot: usize,
}

impl Iterator for PageLines<'_> {
    type Item = LineSpan;

    fn next(&mut self) -> Option<LineSpan> {
        let wide = self.breaker.next_line(self.pos, self.line_width)?;
        let line = match self.narrow {
            Some(narrow)
                if self.slot + 1 == self.per_page && wide.end != self.breaker.content().end() =>
            {
                self.breaker.next_line(self.pos, narrow).unwrap_or(wide)
            }
            _ => wide,
        };
        self.slot = (self.slot + 1) % self.per_page;
        self.pos = line.end;
        Some(line)
    }
}

/// Iterate page lines from `start`, which must be a page start
pub fn page_lines<'a>(
    content: &'a StyledContent,
    config: &LayoutConfig<'a>,
    start: Breakpoint,
) -> PageLines<'a> {
    let narrow = config.render_page_overflow.then(|| {
        let indicator = config.fonts.get(Style::Normal).text_width(OVERFLOW_INDICATOR);
        config.line_width.saturating_sub(indicator)
    });
    PageLines {
        breaker: LineBreaker::new(content, config.fonts, config.break_words),
        pos: start,
        line_width: config.line_width,
        narrow,
        per_page: config.max_lines.max(1),
        slot: 0,
    }
}

/// Lay out content and compute page starts under `config`
pub fn layout_pages(content: &StyledContent, config: &LayoutConfig<'_>) -> Pagination {
    let lines: Vec<LineSpan> = page_lines(content, config, Breakpoint::START).collect();
    Pagination {
        starts: paginate(&lines, config.max_lines),
        line_count: lines.len(),
    }
}
