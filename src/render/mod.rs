//! Render-facing output: page views, headers and host descriptors

mod descriptor;
mod header;
mod page;

pub use descriptor::{LineDescriptor, PageDescriptor, PageSetDescriptor};
pub use header::{Color, Header, Icon};
pub use page::{Page, PageLayout, PageSet, PageStyle};
