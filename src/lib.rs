//! Shared library for `skyebridge`
//!
//! Turns a JSON flow description (nodes and directed edges) into a
//! self-contained HTML page that draws the flow with vis-network.

pub mod core;
pub mod logger;

pub use crate::core::config;
pub use crate::core::error::{Error, Result, SchemaError};
pub use crate::core::get_version;
pub use crate::core::models::{Edge, FlowDocument, Node};
pub use crate::core::pipeline::{build_html, generate, GenerateOptions, Settings};
pub use crate::core::render::{Library, RenderOptions};
