//! Serializable page descriptors for hosts that draw pages themselves

use crate::content::Breakpoint;
use crate::layout::{FontLibrary, LineSpan};
use crate::render::{Header, Page, PageSet, PageStyle};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineDescriptor {
    pub text: String,
    pub width: u32,
    pub hyphenated: bool,
    pub half_spacing: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageDescriptor {
    pub style: PageStyle,
    pub start: Breakpoint,
    pub end: Breakpoint,
    pub line_width: u32,
    pub lines: Vec<LineDescriptor>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSetDescriptor {
    pub header: Header,
    pub pages: Vec<PageDescriptor>,
}

impl LineDescriptor {
    fn new(page: &Page<'_>, line: &LineSpan) -> Self {
        Self {
            text: page.content().text_between(line.start, line.end),
            width: line.width,
            hyphenated: line.hyphenated,
            half_spacing: line.half_spacing,
        }
    }
}

impl PageDescriptor {
    pub fn new(page: &Page<'_>, fonts: &FontLibrary) -> Self {
        Self {
            style: page.style(),
            start: page.start(),
            end: page.end(),
            line_width: page.layout().line_width,
            lines: page
                .lines(fonts)
                .iter()
                .map(|line| LineDescriptor::new(page, line))
                .collect(),
        }
    }
}

impl PageSetDescriptor {
    pub fn new(set: &PageSet, fonts: &FontLibrary) -> Self {
        Self {
            header: set.header().clone(),
            pages: set.pages().map(|page| PageDescriptor::new(&page, fonts)).collect(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
