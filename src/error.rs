//! Error types

use thiserror::Error;

/// Invalid display geometry or layout budget
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("line width must be at least one pixel")]
    ZeroLineWidth,
    #[error("a page must hold at least one line")]
    ZeroMaxLines,
    #[error("paginated line width {paginated}px exceeds full line width {full}px")]
    PaginatedWidthTooLarge { paginated: u32, full: u32 },
    #[error("text margin {margin}px leaves no room on a {width}px display")]
    MarginTooLarge { margin: u32, width: u32 },
    #[error("header and text lines need {needed}px but the display is {height}px tall")]
    TextAreaTooTall { needed: u64, height: u32 },
    #[error("invalid geometry json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Unparseable derivation path string
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PathError {
    #[error("empty path component at position {0}")]
    EmptyComponent(usize),
    #[error("invalid path component {0:?}")]
    InvalidComponent(String),
    #[error("path component {0} does not fit below the hardened bit")]
    ComponentTooLarge(u64),
}

/// Why a confirmation screen did not complete
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ScreenError {
    #[error("action cancelled by user")]
    Cancelled,
    #[error("confirmation timed out")]
    TimedOut,
    #[error("forbidden key path")]
    ForbiddenPath,
}
