//! Diagram rendering
//!
//! Turns a validated [`FlowDocument`](crate::core::models::FlowDocument) into
//! an HTML page driven by vis-network, and optionally minifies the page in an
//! isolated worker.

pub mod html;
pub mod library;
pub mod minify;

pub use html::{fill_slots, render, render_skeleton};
pub use library::Library;
pub use minify::{minify_isolated, HtmlMinifier, Minifier};

/// Default `<title>` of the generated page.
pub const DEFAULT_TITLE: &str = "Flow Diagram";

/// Presentation choices for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Content of `<title>`.
    pub title: String,
    /// Minify the page before writing it.
    pub minify: bool,
    /// Reference vis-network from a CDN instead of inlining it.
    pub cdn: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            minify: false,
            cdn: false,
        }
    }
}
