//! WASM bindings for emulator and preview hosts

pub mod flat_buffer;

use crate::address::{path_to_string, qr_coefficient, split_address};
use crate::content::Style;
use crate::layout::{paginate_text, DisplayGeometry, FontLibrary, PaginateOptions};
use crate::render::{PageSet, PageSetDescriptor};
use flat_buffer::PageBuffer;
use wasm_bindgen::prelude::*;

/// Initialize panic hook for better error messages
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Parse a style name as sent by the host
pub fn parse_style(name: &str) -> Option<Style> {
    match name {
        "" | "normal" => Some(Style::Normal),
        "bold" => Some(Style::Bold),
        "mono" => Some(Style::Mono),
        _ => None,
    }
}

/// WASM-exposed paginator wrapper
#[wasm_bindgen]
pub struct WasmPaginator {
    geometry: DisplayGeometry,
    fonts: FontLibrary,
    buffer: PageBuffer,
}

impl WasmPaginator {
    fn layout(&self, text: &str, header: &str, style: &str, break_words: bool) -> Result<PageSet, JsError> {
        let style = parse_style(style).ok_or_else(|| JsError::new(&format!("unknown style {style:?}")))?;
        let options = PaginateOptions {
            style,
            break_words,
            ..PaginateOptions::default()
        };
        Ok(paginate_text(text, header, &options, &self.geometry, &self.fonts))
    }
}

#[wasm_bindgen]
impl WasmPaginator {
    /// Create a paginator for the default 240x240 display
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            geometry: DisplayGeometry::default(),
            fonts: FontLibrary::default(),
            buffer: PageBuffer::new(),
        }
    }

    /// Create a paginator with geometry from JSON; missing fields keep defaults
    #[wasm_bindgen(js_name = withGeometry)]
    pub fn with_geometry(json: &str) -> Result<WasmPaginator, JsError> {
        Ok(Self {
            geometry: DisplayGeometry::from_json(json)?,
            ..Self::new()
        })
    }

    /// Paginate text and return the page descriptors as JSON
    pub fn paginate(&self, text: &str, header: &str, style: &str, break_words: bool) -> Result<String, JsError> {
        let set = self.layout(text, header, style, break_words)?;
        Ok(PageSetDescriptor::new(&set, &self.fonts).to_json()?)
    }

    /// Paginate text into the flat buffer; returns the page count.
    /// Read the result through the pointer accessors.
    #[wasm_bindgen(js_name = paginateFlat)]
    pub fn paginate_flat(&mut self, text: &str, header: &str, style: &str, break_words: bool) -> Result<u32, JsError> {
        let set = self.layout(text, header, style, break_words)?;
        self.buffer.encode(&set, &self.fonts, &self.geometry);
        Ok(set.len() as u32)
    }

    #[wasm_bindgen(js_name = u32Ptr)]
    pub fn u32_ptr(&self) -> u32 {
        self.buffer.u32_ptr()
    }

    #[wasm_bindgen(js_name = u32Len)]
    pub fn u32_len(&self) -> u32 {
        self.buffer.u32_len()
    }

    #[wasm_bindgen(js_name = textPtr)]
    pub fn text_ptr(&self) -> u32 {
        self.buffer.text_ptr()
    }

    #[wasm_bindgen(js_name = textLen)]
    pub fn text_len(&self) -> u32 {
        self.buffer.text_len()
    }

    #[wasm_bindgen(js_name = stylePtr)]
    pub fn style_ptr(&self) -> u32 {
        self.buffer.style_ptr()
    }

    #[wasm_bindgen(js_name = styleLen)]
    pub fn style_len(&self) -> u32 {
        self.buffer.style_len()
    }

    /// QR module scale for an address
    #[wasm_bindgen(js_name = qrCoefficient)]
    pub fn qr_coefficient(address: &str) -> u8 {
        qr_coefficient(address.chars().count())
    }

    /// Format raw derivation path components
    #[wasm_bindgen(js_name = pathToString)]
    pub fn path_to_string(path: &[u32]) -> String {
        path_to_string(path)
    }

    /// Address chunks as a JSON array of strings
    #[wasm_bindgen(js_name = splitAddress)]
    pub fn split_address(address: &str) -> Result<String, JsError> {
        let chunks: Vec<&str> = split_address(address).collect();
        Ok(serde_json::to_string(&chunks)?)
    }
}

impl Default for WasmPaginator {
    fn default() -> Self {
        Self::new()
    }
}
