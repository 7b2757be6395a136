//! Styled runs and positions within them

use serde::{Deserialize, Serialize};

/// Font style of a text run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    #[default]
    Normal,
    Bold,
    /// Fixed-width font used for addresses and paths
    Mono,
}

/// One item of styled content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Run {
    /// Text drawn in a single style
    Text { style: Style, text: String },
    /// Forced line break
    NewLine,
    /// Forced line break; the following line uses half line spacing
    HalfLineBreak,
}

impl Run {
    /// Create a text run
    pub fn text(style: Style, text: impl Into<String>) -> Self {
        Run::Text {
            style,
            text: text.into(),
        }
    }

    /// Text of this run, `None` for break runs
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Run::Text { text, .. } => Some(text),
            Run::NewLine | Run::HalfLineBreak => None,
        }
    }

    /// Whether this run forces a line break
    pub fn is_break(&self) -> bool {
        matches!(self, Run::NewLine | Run::HalfLineBreak)
    }

    /// Byte length of the run's text (0 for breaks)
    pub fn len(&self) -> usize {
        self.as_text().map_or(0, str::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Position in styled content: run index plus byte offset into that run.
///
/// Offsets always sit on grapheme cluster boundaries and are 0 for break
/// runs. Ordering is lexicographic, so it matches reading order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Breakpoint {
    pub run: usize,
    pub offset: usize,
}

impl Breakpoint {
    /// Start of all content
    pub const START: Breakpoint = Breakpoint { run: 0, offset: 0 };

    pub fn new(run: usize, offset: usize) -> Self {
        Self { run, offset }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breakpoint_order() {
        assert!(Breakpoint::new(0, 5) < Breakpoint::new(1, 0));
        assert!(Breakpoint::new(1, 2) < Breakpoint::new(1, 3));
        assert_eq!(Breakpoint::default(), Breakpoint::START);
    }

    #[test]
    fn test_run_len() {
        assert_eq!(Run::text(Style::Bold, "héllo").len(), 6);
        assert_eq!(Run::NewLine.len(), 0);
        assert!(Run::HalfLineBreak.is_break());
        assert!(!Run::text(Style::Normal, "x").is_break());
    }
}
