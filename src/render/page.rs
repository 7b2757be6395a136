//! Page views over paginated content

use crate::content::{Breakpoint, RunSlice, StyledContent};
use crate::layout::{page_lines, FontLibrary, LayoutConfig, LineSpan, PageBreaks};
use crate::render::Header;
use serde::Serialize;

/// Line budget the pages were laid out with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageLayout {
    pub line_width: u32,
    pub max_lines: usize,
    pub break_words: bool,
    /// Last line of a continued page leaves room for the overflow indicator
    pub render_page_overflow: bool,
}

impl PageLayout {
    /// Layout configuration that reproduces these pages
    pub fn config<'a>(&self, fonts: &'a FontLibrary) -> LayoutConfig<'a> {
        LayoutConfig::new(fonts, self.line_width, self.max_lines)
            .with_break_words(self.break_words)
            .with_page_overflow(self.render_page_overflow)
    }
}

/// How a page is framed on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PageStyle {
    /// The only page; no position indicator
    Single,
    /// One of several pages; the renderer draws position dots
    Paginated { index: usize, count: usize },
}

/// Paginated content: owns the runs, pages are index ranges into them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSet {
    header: Header,
    content: StyledContent,
    starts: PageBreaks,
    layout: PageLayout,
    paginated: bool,
}

impl PageSet {
    /// # Panics
    ///
    /// Panics if the page starts are not a strictly increasing sequence of
    /// positions inside `content` beginning at the content start, or if a
    /// single-page set has more than one start. Such a set would show the
    /// user something other than the content being confirmed.
    pub fn new(
        header: Header,
        content: StyledContent,
        starts: PageBreaks,
        layout: PageLayout,
        paginated: bool,
    ) -> Self {
        assert_eq!(starts.first(), Some(&Breakpoint::START), "first page must start at content start");
        assert!(
            paginated || starts.len() == 1,
            "single page layout with {} pages",
            starts.len()
        );
        assert!(
            starts.windows(2).all(|pair| pair[0] < pair[1]),
            "page starts out of order: {:?}",
            starts
        );
        let end = content.end();
        assert!(
            starts
                .iter()
                .skip(1)
                .all(|start| *start < end && content.contains(*start)),
            "page start outside of content: {:?}",
            starts
        );

        Self {
            header,
            content,
            starts,
            layout,
            paginated,
        }
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn content(&self) -> &StyledContent {
        &self.content
    }

    pub fn layout(&self) -> PageLayout {
        self.layout
    }

    pub fn starts(&self) -> &[Breakpoint] {
        &self.starts
    }

    /// Number of pages, at least one
    pub fn len(&self) -> usize {
        self.starts.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Laid out with room reserved for a position indicator
    pub fn is_paginated(&self) -> bool {
        self.paginated
    }

    pub fn page(&self, index: usize) -> Option<Page<'_>> {
        (index < self.starts.len()).then_some(Page { set: self, index })
    }

    pub fn pages(&self) -> impl ExactSizeIterator<Item = Page<'_>> {
        (0..self.starts.len()).map(move |index| Page { set: self, index })
    }
}

/// One screen of a [`PageSet`]
#[derive(Debug, Clone, Copy)]
pub struct Page<'a> {
    set: &'a PageSet,
    index: usize,
}

impl<'a> Page<'a> {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn header(&self) -> &'a Header {
        &self.set.header
    }

    pub fn content(&self) -> &'a StyledContent {
        &self.set.content
    }

    pub fn layout(&self) -> PageLayout {
        self.set.layout
    }

    pub fn style(&self) -> PageStyle {
        if self.set.paginated {
            PageStyle::Paginated {
                index: self.index,
                count: self.set.len(),
            }
        } else {
            PageStyle::Single
        }
    }

    pub fn start(&self) -> Breakpoint {
        self.set.starts[self.index]
    }

    /// Next page's start, or the end of content on the last page
    pub fn end(&self) -> Breakpoint {
        self.set
            .starts
            .get(self.index + 1)
            .copied()
            .unwrap_or_else(|| self.set.content.end())
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 == self.set.len()
    }

    /// Content pieces shown on this page
    pub fn runs(&self) -> impl Iterator<Item = RunSlice<'a>> {
        self.set.content.slice(self.start(), self.end())
    }

    /// Visible text, breaks rendered as `\n`
    pub fn text(&self) -> String {
        self.set.content.text_between(self.start(), self.end())
    }

    /// Lines of this page, as the renderer should draw them
    pub fn lines(&self, fonts: &FontLibrary) -> Vec<LineSpan> {
        let layout = self.set.layout;
        let end = self.end();
        page_lines(&self.set.content, &layout.config(fonts), self.start())
            .take_while(|line| line.start < end)
            .take(layout.max_lines)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Style;
    use crate::layout::{layout_pages, FontMetrics, OVERFLOW_INDICATOR};
    use smallvec::smallvec;

    fn layout() -> PageLayout {
        PageLayout {
            line_width: 100,
            max_lines: 4,
            break_words: false,
            render_page_overflow: false,
        }
    }

    fn two_pages() -> PageSet {
        let content = StyledContent::builder().bold("first").br().normal("second").build();
        PageSet::new(
            Header::warning(),
            content,
            smallvec![Breakpoint::START, Breakpoint::new(2, 0)],
            layout(),
            true,
        )
    }

    #[test]
    fn test_page_bounds() {
        let set = two_pages();
        assert_eq!(set.len(), 2);
        let first = set.page(0).unwrap();
        let last = set.page(1).unwrap();
        assert_eq!(first.end(), last.start());
        assert_eq!(last.end(), set.content().end());
        assert!(!first.is_last() && last.is_last());
        assert!(set.page(2).is_none());
    }

    #[test]
    fn test_pages_reconstruct_content() {
        let set = two_pages();
        let joined: String = set.pages().map(|p| p.text()).collect();
        assert_eq!(joined, set.content().plain_text());
        assert_eq!(set.page(0).unwrap().text(), "first\n");
    }

    #[test]
    fn test_page_style() {
        let set = two_pages();
        assert_eq!(
            set.page(1).unwrap().style(),
            PageStyle::Paginated { index: 1, count: 2 }
        );
        let single = PageSet::new(
            Header::success(),
            StyledContent::from_text(Style::Normal, "done"),
            smallvec![Breakpoint::START],
            layout(),
            false,
        );
        assert_eq!(single.page(0).unwrap().style(), PageStyle::Single);
    }

    #[test]
    fn test_empty_content_page() {
        let set = PageSet::new(
            Header::default(),
            StyledContent::default(),
            smallvec![Breakpoint::START],
            layout(),
            false,
        );
        let page = set.page(0).unwrap();
        assert_eq!(page.text(), "");
        assert!(page.lines(&FontLibrary::default()).is_empty());
    }

    #[test]
    #[should_panic]
    fn test_rejects_start_outside_content() {
        let _ = PageSet::new(
            Header::default(),
            StyledContent::from_text(Style::Normal, "abc"),
            smallvec![Breakpoint::START, Breakpoint::new(4, 0)],
            layout(),
            true,
        );
    }

    #[test]
    #[should_panic]
    fn test_rejects_unordered_starts() {
        let _ = PageSet::new(
            Header::default(),
            StyledContent::from_text(Style::Normal, "abcdef"),
            smallvec![Breakpoint::START, Breakpoint::new(0, 4), Breakpoint::new(0, 2)],
            layout(),
            true,
        );
    }

    #[test]
    fn test_overflow_pages_do_not_overlap() {
        let fonts = FontLibrary::with_all(FontMetrics::uniform(8, 10));
        let content = StyledContent::from_text(Style::Normal, "abcd efgh ijkl mnop");
        let layout = PageLayout {
            line_width: 40,
            max_lines: 2,
            break_words: false,
            render_page_overflow: true,
        };
        let pagination = layout_pages(&content, &layout.config(&fonts));
        assert!(pagination.page_count() > 1);
        let set = PageSet::new(Header::default(), content, pagination.starts, layout, true);

        let indicator = fonts.get(Style::Normal).text_width(OVERFLOW_INDICATOR);
        for page in set.pages() {
            let lines = page.lines(&fonts);
            assert_eq!(lines.first().unwrap().start, page.start());
            assert_eq!(lines.last().unwrap().end, page.end());
            if !page.is_last() {
                let last = lines.last().unwrap();
                let hyphen = if last.hyphenated { 8 } else { 0 };
                assert!(last.width + hyphen + indicator <= 40);
            }
        }
        let joined: String = set.pages().map(|p| p.text()).collect();
        assert_eq!(joined, "abcd efgh ijkl mnop");
    }
}
