//! Styled content: the immutable run sequence the layout engine consumes

mod run;

pub use run::{Breakpoint, Run, Style};

/// Ordered, immutable sequence of styled runs.
///
/// Layout never mutates content; it only computes [`Breakpoint`]s into it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StyledContent {
    runs: Vec<Run>,
}

/// Borrowed piece of a run, clipped to a range of positions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunSlice<'a> {
    Text { style: Style, text: &'a str },
    NewLine,
    HalfLineBreak,
}

impl StyledContent {
    /// Start building content run by run
    pub fn builder() -> StyledContentBuilder {
        StyledContentBuilder::default()
    }

    /// Content made of a single text run
    pub fn from_text(style: Style, text: impl Into<String>) -> Self {
        Self {
            runs: vec![Run::text(style, text)],
        }
    }

    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    /// Number of runs
    pub fn len(&self) -> usize {
        self.runs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Position just past the last run
    pub fn end(&self) -> Breakpoint {
        Breakpoint::new(self.runs.len(), 0)
    }

    /// Check that a position addresses this content
    pub fn contains(&self, pos: Breakpoint) -> bool {
        if pos == self.end() {
            return true;
        }
        match self.runs.get(pos.run) {
            Some(Run::Text { text, .. }) => text.is_char_boundary(pos.offset),
            Some(Run::NewLine | Run::HalfLineBreak) => pos.offset == 0,
            None => false,
        }
    }

    /// Canonical form of a position: the end of a text run (and any
    /// empty text runs after it) folds into the start of the next run.
    pub fn normalize(&self, mut pos: Breakpoint) -> Breakpoint {
        while let Some(Run::Text { text, .. }) = self.runs.get(pos.run) {
            if pos.offset < text.len() {
                break;
            }
            pos = Breakpoint::new(pos.run + 1, 0);
        }
        if pos.run >= self.runs.len() {
            return self.end();
        }
        pos
    }

    /// Iterate the pieces of content between two positions.
    ///
    /// # Panics
    ///
    /// Panics if either position is outside this content or `start > end`.
    /// A view over the wrong range must never reach the display.
    pub fn slice(&self, start: Breakpoint, end: Breakpoint) -> impl Iterator<Item = RunSlice<'_>> {
        assert!(
            self.contains(start) && self.contains(end) && start <= end,
            "content range {:?}..{:?} outside of {} runs",
            start,
            end,
            self.runs.len()
        );

        let last = end.run.min(self.runs.len().saturating_sub(1));
        let runs = if self.runs.is_empty() {
            &self.runs[..]
        } else {
            &self.runs[start.run.min(last + 1)..=last]
        };

        runs.iter().enumerate().filter_map(move |(i, run)| {
            let idx = start.run + i;
            match run {
                Run::Text { style, text } => {
                    let from = if idx == start.run { start.offset } else { 0 };
                    let to = if idx == end.run { end.offset } else { text.len() };
                    (from < to).then(|| RunSlice::Text {
                        style: *style,
                        text: &text[from..to],
                    })
                }
                Run::NewLine => (idx < end.run).then_some(RunSlice::NewLine),
                Run::HalfLineBreak => (idx < end.run).then_some(RunSlice::HalfLineBreak),
            }
        })
    }

    /// Visible text between two positions, breaks rendered as `\n`
    pub fn text_between(&self, start: Breakpoint, end: Breakpoint) -> String {
        let mut out = String::new();
        for piece in self.slice(start, end) {
            match piece {
                RunSlice::Text { text, .. } => out.push_str(text),
                RunSlice::NewLine | RunSlice::HalfLineBreak => out.push('\n'),
            }
        }
        out
    }

    /// Whole content as plain text, breaks rendered as `\n`
    pub fn plain_text(&self) -> String {
        self.text_between(Breakpoint::START, self.end())
    }
}

/// Builder mirroring how confirmation screens compose their text
#[derive(Debug, Default)]
pub struct StyledContentBuilder {
    runs: Vec<Run>,
}

impl StyledContentBuilder {
    pub fn push(&mut self, run: Run) -> &mut Self {
        self.runs.push(run);
        self
    }

    pub fn normal(mut self, text: impl Into<String>) -> Self {
        self.runs.push(Run::text(Style::Normal, text));
        self
    }

    pub fn bold(mut self, text: impl Into<String>) -> Self {
        self.runs.push(Run::text(Style::Bold, text));
        self
    }

    pub fn mono(mut self, text: impl Into<String>) -> Self {
        self.runs.push(Run::text(Style::Mono, text));
        self
    }

    pub fn br(mut self) -> Self {
        self.runs.push(Run::NewLine);
        self
    }

    pub fn br_half(mut self) -> Self {
        self.runs.push(Run::HalfLineBreak);
        self
    }

    /// Each row on its own line, in one style
    pub fn rows<I, S>(mut self, style: Style, rows: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for row in rows {
            if self.runs.last().is_some_and(|run| !run.is_break()) {
                self.runs.push(Run::NewLine);
            }
            self.runs.push(Run::text(style, row));
        }
        self
    }

    pub fn build(self) -> StyledContent {
        StyledContent { runs: self.runs }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> StyledContent {
        StyledContent::builder()
            .bold("Amount")
            .br_half()
            .normal("0.5 BTC to")
            .br()
            .mono("bc1qxyz")
            .build()
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(sample().plain_text(), "Amount\n0.5 BTC to\nbc1qxyz");
        assert_eq!(StyledContent::default().plain_text(), "");
    }

    #[test]
    fn test_normalize_folds_run_end() {
        let content = sample();
        assert_eq!(content.normalize(Breakpoint::new(0, 6)), Breakpoint::new(1, 0));
        assert_eq!(content.normalize(Breakpoint::new(2, 3)), Breakpoint::new(2, 3));
        assert_eq!(content.normalize(Breakpoint::new(4, 7)), content.end());
    }

    #[test]
    fn test_normalize_skips_empty_runs() {
        let content = StyledContent::builder().normal("").normal("").bold("x").build();
        assert_eq!(content.normalize(Breakpoint::START), Breakpoint::new(2, 0));
    }

    #[test]
    fn test_slice_clips_runs() {
        let content = sample();
        let pieces: Vec<_> = content
            .slice(Breakpoint::new(0, 3), Breakpoint::new(2, 3))
            .collect();
        assert_eq!(
            pieces,
            vec![
                RunSlice::Text { style: Style::Bold, text: "ount" },
                RunSlice::HalfLineBreak,
                RunSlice::Text { style: Style::Normal, text: "0.5" },
            ]
        );
    }

    #[test]
    fn test_split_text_reconstructs() {
        let content = sample();
        let mid = Breakpoint::new(2, 4);
        let joined = content.text_between(Breakpoint::START, mid)
            + &content.text_between(mid, content.end());
        assert_eq!(joined, content.plain_text());
    }

    #[test]
    fn test_contains_rejects_bad_positions() {
        let content = StyledContent::from_text(Style::Normal, "héllo");
        assert!(content.contains(Breakpoint::new(0, 1)));
        assert!(!content.contains(Breakpoint::new(0, 2)));
        assert!(!content.contains(Breakpoint::new(3, 0)));
        assert!(content.contains(content.end()));
    }

    #[test]
    #[should_panic]
    fn test_slice_out_of_range_panics() {
        let content = StyledContent::from_text(Style::Normal, "abc");
        let _ = content.slice(Breakpoint::START, Breakpoint::new(5, 0)).count();
    }

    #[test]
    fn test_rows_separate_lines() {
        let content = StyledContent::builder()
            .rows(Style::Normal, ["one", "two"])
            .build();
        assert_eq!(content.plain_text(), "one\ntwo");
    }
}
