//! Flat buffer protocol for zero-copy page transfer to the host
//!
//! ## u32 Buffer Layout:
//! ```text
//! Header:
//! [0]     MAGIC (0x54445350 = "TDSP" for validation)
//! [1]     SCHEMA_VERSION (protocol version, currently 1)
//! [2]     page_count
//! [3]     flags: bit0=paginated (renderer draws position dots)
//! [4]     line_width (px)
//! [5]     max_lines
//! [6]     line_total (lines over all pages)
//! [7]     text_buffer_len
//! [8..]   page data...
//!
//! Per-page:
//!   page_index
//!   line_count
//!   per-line: [start_run, start_offset, end_run, end_offset, width, y, flags,
//!              text_offset, text_len, text_utf16_offset, text_utf16_len,
//!              style_start_idx, style_count]
//!     text_offset/text_len: byte offsets in text_data (UTF-8)
//!     text_utf16_offset/text_utf16_len: offsets for JS substring (after single decode)
//!     y: baseline from the top of the display
//!     flags: bit0=hyphenated, bit1=half_spacing
//! ```
//!
//! ## Style Buffer Layout:
//! ```text
//! Per span: [start, len, style_id], start relative to the line text
//! ```

use crate::content::{RunSlice, Style};
use crate::layout::{DisplayGeometry, FontLibrary, LineSpan};
use crate::render::PageSet;

/// Magic number for format validation: "TDSP" (Trust DiSPlay)
pub const MAGIC: u32 = 0x5444_5350;

/// Schema version for protocol compatibility checking
pub const SCHEMA_VERSION: u32 = 1;

/// Header size in u32 elements
pub const HEADER_SIZE: usize = 8;

/// Header flags
pub const FLAG_PAGINATED: u32 = 0b01;

/// Line flags
pub const FLAG_HYPHENATED: u32 = 0b01;
pub const FLAG_HALF_SPACING: u32 = 0b10;

/// Number of u32 values per page before its lines
pub const U32_PER_PAGE: usize = 2;

/// Number of u32 values per line in the buffer
pub const U32_PER_LINE: usize = 13;

/// Number of u32 values per style span
/// [start, len, style_id]
pub const U32_PER_STYLE: usize = 3;

/// Style ids in the style buffer
pub fn style_id(style: Style) -> u32 {
    match style {
        Style::Normal => 0,
        Style::Bold => 1,
        Style::Mono => 2,
    }
}

/// Page buffer for zero-copy WASM transfer
#[derive(Debug)]
pub struct PageBuffer {
    /// Integer data (header, page and line records)
    pub u32_data: Vec<u32>,
    /// UTF-8 text of all lines
    pub text_data: Vec<u8>,
    /// Style spans of all lines
    pub style_data: Vec<u32>,

    // Track cumulative UTF-16 offset for efficient JS decoding
    utf16_text_offset: usize,
    line_total: u32,
}

impl Default for PageBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl PageBuffer {
    pub fn new() -> Self {
        Self {
            u32_data: Vec::with_capacity(256),
            text_data: Vec::with_capacity(1024),
            style_data: Vec::with_capacity(64),
            utf16_text_offset: 0,
            line_total: 0,
        }
    }

    pub fn clear(&mut self) {
        self.u32_data.clear();
        self.text_data.clear();
        self.style_data.clear();
        self.utf16_text_offset = 0;
        self.line_total = 0;
    }

    /// Pre-allocate buffers so pointers handed to JS stay valid while
    /// encoding. Capacity is reused when it is already large enough.
    pub fn prepare(&mut self, u32_needed: usize, text_needed: usize, styles_needed: usize) {
        let u32_target = u32_needed + 32;
        let text_target = text_needed + 256;
        let style_target = styles_needed * U32_PER_STYLE + 32;

        if self.u32_data.capacity() < u32_target {
            self.u32_data = Vec::with_capacity(u32_target);
        }
        if self.text_data.capacity() < text_target {
            self.text_data = Vec::with_capacity(text_target);
        }
        if self.style_data.capacity() < style_target {
            self.style_data = Vec::with_capacity(style_target);
        }
        self.clear();
    }

    pub fn write_header(&mut self, page_count: u32, paginated: bool, line_width: u32, max_lines: u32) {
        self.u32_data.push(MAGIC); // [0] magic number
        self.u32_data.push(SCHEMA_VERSION); // [1] schema version
        self.u32_data.push(page_count); // [2] page_count
        self.u32_data.push(if paginated { FLAG_PAGINATED } else { 0 }); // [3] flags
        self.u32_data.push(line_width); // [4] line_width
        self.u32_data.push(max_lines); // [5] max_lines
        self.u32_data.push(0); // [6] line_total (placeholder)
        self.u32_data.push(0); // [7] text_buffer_len (placeholder)
    }

    /// Write page header, returns index where line_count should be written
    pub fn begin_page(&mut self, page_index: usize) -> usize {
        self.u32_data.push(page_index as u32);
        let line_count_idx = self.u32_data.len();
        self.u32_data.push(0); // line_count placeholder
        line_count_idx
    }

    /// Update line count for a page
    pub fn set_line_count(&mut self, idx: usize, count: u32) {
        if idx < self.u32_data.len() {
            self.u32_data[idx] = count;
        }
    }

    /// Write one line: its span, baseline and the styled text pieces it covers
    pub fn write_line<'a>(
        &mut self,
        span: &LineSpan,
        y: u32,
        pieces: impl IntoIterator<Item = RunSlice<'a>>,
    ) {
        let text_offset = self.text_data.len();
        let style_start_idx = (self.style_data.len() / U32_PER_STYLE) as u32;
        let mut style_count = 0u32;
        let mut text_utf16_len = 0u32;

        for piece in pieces {
            if let RunSlice::Text { style, text } = piece {
                let start = self.text_data.len() - text_offset;
                text_utf16_len += text.chars().map(|c| c.len_utf16()).sum::<usize>() as u32;
                self.text_data.extend_from_slice(text.as_bytes());
                self.style_data.push(start as u32);
                self.style_data.push(text.len() as u32);
                self.style_data.push(style_id(style));
                style_count += 1;
            }
        }

        let text_len = self.text_data.len() - text_offset;
        let text_utf16_offset = self.utf16_text_offset as u32;
        self.utf16_text_offset += text_utf16_len as usize;

        let mut flags = 0;
        if span.hyphenated {
            flags |= FLAG_HYPHENATED;
        }
        if span.half_spacing {
            flags |= FLAG_HALF_SPACING;
        }

        self.u32_data.push(span.start.run as u32);
        self.u32_data.push(span.start.offset as u32);
        self.u32_data.push(span.end.run as u32);
        self.u32_data.push(span.end.offset as u32);
        self.u32_data.push(span.width);
        self.u32_data.push(y);
        self.u32_data.push(flags);
        self.u32_data.push(text_offset as u32);
        self.u32_data.push(text_len as u32);
        self.u32_data.push(text_utf16_offset);
        self.u32_data.push(text_utf16_len);
        self.u32_data.push(style_start_idx);
        self.u32_data.push(style_count);
        self.line_total += 1;
    }

    /// Synchronize header totals. Must be called after all pages are written.
    pub fn finalize(&mut self) {
        if self.u32_data.len() < HEADER_SIZE {
            return;
        }
        self.u32_data[6] = self.line_total;
        self.u32_data[7] = self.text_data.len() as u32;
    }

    /// Encode every page of `set` with line positions for `geometry`
    pub fn encode(&mut self, set: &PageSet, fonts: &FontLibrary, geometry: &DisplayGeometry) {
        let layout = set.layout();
        let content = set.content();
        let pages: Vec<_> = set.pages().map(|page| page.lines(fonts)).collect();
        let line_count: usize = pages.iter().map(Vec::len).sum();

        self.prepare(
            HEADER_SIZE + pages.len() * U32_PER_PAGE + line_count * U32_PER_LINE,
            content.plain_text().len(),
            content.len(),
        );
        self.write_header(
            set.len() as u32,
            set.is_paginated(),
            layout.line_width,
            layout.max_lines as u32,
        );

        for (index, lines) in pages.iter().enumerate() {
            let line_count_idx = self.begin_page(index);
            let mut y = geometry.header_height;
            for line in lines {
                y += if line.half_spacing {
                    geometry.line_height / 2
                } else {
                    geometry.line_height
                };
                self.write_line(line, y, content.slice(line.start, line.end));
            }
            self.set_line_count(line_count_idx, lines.len() as u32);
        }
        self.finalize();
    }

    // Accessors for WASM
    // Return u32 instead of usize for explicit WASM contract (wasm32 linear memory uses u32 offsets)

    pub fn u32_ptr(&self) -> u32 {
        self.u32_data.as_ptr() as u32
    }

    pub fn u32_len(&self) -> u32 {
        self.u32_data.len() as u32
    }

    pub fn text_ptr(&self) -> u32 {
        self.text_data.as_ptr() as u32
    }

    pub fn text_len(&self) -> u32 {
        self.text_data.len() as u32
    }

    pub fn style_ptr(&self) -> u32 {
        self.style_data.as_ptr() as u32
    }

    pub fn style_len(&self) -> u32 {
        self.style_data.len() as u32
    }
}
