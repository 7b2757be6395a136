//! Layout engine: line breaking, pagination and the pagination facade

mod engine;
pub mod font;
mod line_break;
mod pagination;

pub use engine::{paginate_content, paginate_text, DisplayGeometry, PaginateOptions};
pub use font::{FontLibrary, FontMetrics};
pub use line_break::{break_lines, LineBreaker, LineSpan, Lines, HYPHEN};
pub use pagination::{
    layout_pages, page_lines, paginate, LayoutConfig, PageBreaks, PageLines, Pagination,
    OVERFLOW_INDICATOR,
};
