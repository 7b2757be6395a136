//! Pagination facade: fit on one page, or re-layout with room for the
//! page indicator

use crate::content::{Style, StyledContent};
use crate::error::ConfigError;
use crate::layout::font::FontLibrary;
use crate::layout::pagination::{layout_pages, LayoutConfig};
use crate::render::{Color, Header, Icon, PageLayout, PageSet};
use serde::{Deserialize, Serialize};

/// Fixed geometry of the display text area, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayGeometry {
    pub width: u32,
    pub height: u32,
    /// Left inset of text lines
    pub text_margin_left: u32,
    pub header_height: u32,
    pub line_height: u32,
    /// Text lines per page
    pub max_lines: usize,
    /// Line width used once content spans several pages, leaving room
    /// for the page position dots
    pub paginated_line_width: u32,
}

impl Default for DisplayGeometry {
    fn default() -> Self {
        Self {
            width: 240,
            height: 240,
            text_margin_left: 14,
            header_height: 48,
            line_height: 26,
            max_lines: 5,
            paginated_line_width: 204,
        }
    }
}

impl DisplayGeometry {
    /// Get usable line width on a single page
    pub fn line_width(&self) -> u32 {
        self.width.saturating_sub(self.text_margin_left)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.text_margin_left >= self.width {
            return Err(ConfigError::MarginTooLarge {
                margin: self.text_margin_left,
                width: self.width,
            });
        }
        if self.max_lines == 0 {
            return Err(ConfigError::ZeroMaxLines);
        }
        if self.paginated_line_width == 0 {
            return Err(ConfigError::ZeroLineWidth);
        }
        if self.paginated_line_width > self.line_width() {
            return Err(ConfigError::PaginatedWidthTooLarge {
                paginated: self.paginated_line_width,
                full: self.line_width(),
            });
        }
        let text_height = self.header_height as u64 + self.max_lines as u64 * self.line_height as u64;
        if text_height > u64::from(self.height) {
            return Err(ConfigError::TextAreaTooTall {
                needed: text_height,
                height: self.height,
            });
        }
        Ok(())
    }

    /// Load geometry from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let geometry: Self = serde_json::from_str(json)?;
        geometry.validate()?;
        Ok(geometry)
    }
}

/// Style flags for [`paginate_text`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginateOptions {
    pub style: Style,
    pub break_words: bool,
    pub icon: Icon,
    pub icon_color: Color,
}

impl Default for PaginateOptions {
    fn default() -> Self {
        Self {
            style: Style::Normal,
            break_words: false,
            icon: Icon::Default,
            icon_color: Color::ORANGE_ICON,
        }
    }
}

/// Paginate a single run of text under a header
pub fn paginate_text(
    text: &str,
    header: &str,
    options: &PaginateOptions,
    geometry: &DisplayGeometry,
    fonts: &FontLibrary,
) -> PageSet {
    let content = StyledContent::from_text(options.style, text);
    let header = Header::new(header, options.icon, options.icon_color);
    paginate_content(content, header, options.break_words, geometry, fonts)
}

/// Paginate styled content.
///
/// Content that fits one page at full width gets a single page with no
/// indicator. Otherwise it is laid out again at the narrower paginated
/// width so the indicator never overlaps text.
pub fn paginate_content(
    content: StyledContent,
    header: Header,
    break_words: bool,
    geometry: &DisplayGeometry,
    fonts: &FontLibrary,
) -> PageSet {
    let full = LayoutConfig::new(fonts, geometry.line_width(), geometry.max_lines)
        .with_break_words(break_words);

    let single = layout_pages(&content, &full);
    if single.page_count() == 1 {
        log::debug!(
            "\"{}\": {} lines fit one page at {}px",
            header.title,
            single.line_count,
            full.line_width
        );
        let layout = page_layout(&full);
        return PageSet::new(header, content, single.starts, layout, false);
    }

    let narrow = LayoutConfig {
        line_width: geometry.paginated_line_width,
        ..full
    };
    let paged = layout_pages(&content, &narrow);
    log::debug!(
        "\"{}\": {} lines need {} pages at {}px",
        header.title,
        paged.line_count,
        paged.page_count(),
        narrow.line_width
    );
    PageSet::new(header, content, paged.starts, page_layout(&narrow), true)
}

fn page_layout(config: &LayoutConfig<'_>) -> PageLayout {
    PageLayout {
        line_width: config.line_width,
        max_lines: config.max_lines.max(1),
        break_words: config.break_words,
        render_page_overflow: config.render_page_overflow,
    }
}
