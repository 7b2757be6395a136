//! Trust Display: deterministic text pagination for a hardware wallet
//! confirmation screen
//!
//! This crate provides:
//! - Styled content runs with explicit line and half-line breaks
//! - Pixel-width line breaking over per-style font metrics
//! - Pagination that re-lays long text with room for the page indicator
//! - Address chunking, derivation path formatting and QR placement
//! - A cancellable confirmation flow and the standard confirmation screens

pub mod address;
pub mod confirm;
pub mod content;
pub mod error;
pub mod layout;
pub mod render;
pub mod screens;
pub mod wasm;

// Re-export WASM types for direct use
pub use wasm::WasmPaginator;

// Re-export primary types
pub use address::{chunk_address, path_to_string, qr_coefficient, split_address, DerivationPath};
pub use confirm::{
    cancel_channel, ButtonRequestType, Buttons, CancelHandle, CancelSignal, ConfirmFlow,
    ConfirmOutcome, Frame, HostLink, InputEvent, Renderer, Screen, UserInput,
};
pub use content::{Breakpoint, Run, Style, StyledContent};
pub use error::{ConfigError, PathError, ScreenError};
pub use layout::{
    break_lines, paginate_content, paginate_text, DisplayGeometry, FontLibrary, FontMetrics,
    LayoutConfig, LineSpan, PaginateOptions,
};
pub use render::{Header, Icon, Page, PageSet, PageStyle};
pub use screens::{ConfirmContext, PathPolicy, PathVerdict, SafetyChecks};
