//! Generation pipeline: load, validate, render, minify, write

pub mod config;
pub mod error;
pub mod loader;
pub mod models;
pub mod pipeline;
pub mod render;
pub mod validator;
pub mod writer;

/// Returns the current version of the `skyebridge` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
