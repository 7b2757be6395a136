//! Font metrics for layout

use crate::content::Style;
use rustc_hash::FxHashMap;

/// Glyphs narrower than the common lowercase advance
const NARROW: &[u8] = b"!'(),-./:;I[]`fijlrt|";
/// Glyphs wider than the common uppercase advance
const WIDE: &[u8] = b"@MWmw";

/// Metrics needed for text layout, in whole display pixels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontMetrics {
    /// Line height in pixels
    pub line_height: u32,
    /// Advance of ASCII characters (0-127)
    pub char_widths: Vec<u8>,
    /// Advance for characters without an entry
    pub default_width: u8,
    /// Per-glyph advances outside the ASCII table
    overrides: FxHashMap<char, u8>,
}

impl Default for FontMetrics {
    fn default() -> Self {
        Self::proportional(0)
    }
}

impl FontMetrics {
    pub fn new(line_height: u32, char_widths: Vec<u8>, default_width: u8) -> Self {
        Self {
            line_height,
            char_widths,
            default_width,
            overrides: FxHashMap::default(),
        }
    }

    /// Every glyph has the same advance
    pub fn uniform(width: u8, line_height: u32) -> Self {
        Self::new(line_height, vec![width; 128], width)
    }

    /// Proportional UI font; `weight` widens every printable glyph
    pub fn proportional(weight: u8) -> Self {
        let mut char_widths = vec![0u8; 128];
        for (code, slot) in char_widths.iter_mut().enumerate() {
            let c = code as u8;
            *slot = match c {
                0..=31 | 127 => 0,
                b' ' => 5,
                _ if NARROW.contains(&c) => 5,
                _ if WIDE.contains(&c) => 14,
                b'A'..=b'Z' | b'0'..=b'9' => 11,
                _ => 9,
            };
            if *slot > 0 {
                *slot += weight;
            }
        }
        Self::new(26, char_widths, 10 + weight)
    }

    /// Register an advance for one glyph. Glyphs outside the ASCII table
    /// go to the overrides.
    pub fn set_width(&mut self, c: char, width: u8) {
        match self.char_widths.get_mut(c as usize) {
            Some(slot) if c.is_ascii() => *slot = width,
            _ => {
                self.overrides.insert(c, width);
            }
        }
    }

    /// Get width of a character
    pub fn width(&self, c: char) -> u32 {
        if c.is_ascii() {
            if let Some(w) = self.char_widths.get(c as usize) {
                return u32::from(*w);
            }
        }
        if c.is_control() {
            return 0;
        }
        u32::from(*self.overrides.get(&c).unwrap_or(&self.default_width))
    }

    /// Width of one grapheme cluster
    pub fn grapheme_width(&self, grapheme: &str) -> u32 {
        grapheme.chars().map(|c| self.width(c)).sum()
    }

    /// Width of a whole string
    pub fn text_width(&self, text: &str) -> u32 {
        text.chars().map(|c| self.width(c)).sum()
    }
}

/// One font per text style
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontLibrary {
    normal: FontMetrics,
    bold: FontMetrics,
    mono: FontMetrics,
}

impl Default for FontLibrary {
    fn default() -> Self {
        Self {
            normal: FontMetrics::proportional(0),
            bold: FontMetrics::proportional(1),
            mono: FontMetrics::uniform(12, 26),
        }
    }
}

impl FontLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Same metrics for every style
    pub fn with_all(metrics: FontMetrics) -> Self {
        Self {
            normal: metrics.clone(),
            bold: metrics.clone(),
            mono: metrics,
        }
    }

    /// Get font metrics for a style
    pub fn get(&self, style: Style) -> &FontMetrics {
        match style {
            Style::Normal => &self.normal,
            Style::Bold => &self.bold,
            Style::Mono => &self.mono,
        }
    }

    /// Set font metrics for a style
    pub fn set(&mut self, style: Style, metrics: FontMetrics) {
        match style {
            Style::Normal => self.normal = metrics,
            Style::Bold => self.bold = metrics,
            Style::Mono => self.mono = metrics,
        }
    }
}
