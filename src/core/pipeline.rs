//! End-to-end generation
//!
//! Stages run strictly in order and each one hands an owned value to the
//! next: load, validate raw text, parse, validate structure, build the
//! document, resolve the library, render, minify, write. The first failure
//! ends the run before anything is written.

use crate::core::config::Config;
use crate::core::error::{Error, Result};
use crate::core::loader::{self, Loader};
use crate::core::models::FlowDocument;
use crate::core::render::{self, minify, HtmlMinifier, Library, RenderOptions};
use crate::core::{validator, writer};
use crate::{debug, info, verbose};
use serde_json::Value;
use std::path::PathBuf;
use std::time::Duration;

/// What to generate in one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Local path or `http(s)://` URL of the flow JSON.
    pub input: String,
    /// Destination HTML file.
    pub output: PathBuf,
    /// Page title, minification and library embedding.
    pub render: RenderOptions,
}

impl GenerateOptions {
    /// Build options from possibly missing required values.
    ///
    /// # Errors
    /// Returns [`Error::Options`] naming every missing flag at once.
    pub fn new(
        input: Option<String>,
        output: Option<PathBuf>,
        render: RenderOptions,
    ) -> Result<Self> {
        match (input, output) {
            (Some(input), Some(output)) => Ok(Self {
                input,
                output,
                render,
            }),
            (input, output) => {
                let mut missing = Vec::new();
                if input.is_none() {
                    missing.push("--input");
                }
                if output.is_none() {
                    missing.push("--output");
                }
                Err(Error::Options(missing))
            }
        }
    }
}

/// Environment-level settings, usually taken from [`Config`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// vis-network URL for `--cdn` pages and for the first download.
    pub cdn_url: String,
    /// Where the inlined vis-network code is kept.
    pub library_path: PathBuf,
    /// HTTP timeout for URL inputs and the library download.
    pub fetch_timeout: Duration,
    /// Time the minifier worker gets.
    pub minify_timeout: Duration,
}

impl From<&Config> for Settings {
    fn from(config: &Config) -> Self {
        Self {
            cdn_url: config.render.cdn_url.clone(),
            library_path: PathBuf::from(&config.render.library_path),
            fetch_timeout: seconds_or(config.network.timeout_secs, loader::DEFAULT_TIMEOUT),
            minify_timeout: seconds_or(config.minify.timeout_secs, minify::DEFAULT_TIMEOUT),
        }
    }
}

fn seconds_or(secs: u64, default: Duration) -> Duration {
    if secs == 0 {
        default
    } else {
        Duration::from_secs(secs)
    }
}

/// Load and validate the flow behind `source`.
///
/// # Errors
/// Returns the loader, empty-input, parse or schema error that stopped it.
pub fn read_flow(source: &str, loader: &Loader) -> Result<FlowDocument> {
    let raw = loader.load(source)?;
    validator::validate_raw(&raw)?;
    debug!(
        "Loaded {} bytes from {} source",
        raw.len(),
        if loader::is_url(source) { "URL" } else { "file" }
    );

    let value: Value = serde_json::from_str(&raw)?;
    validator::validate_parsed(&value)?;

    let doc = FlowDocument::from_value(value)?;
    info!(
        "Flow has {} nodes and {} edges",
        doc.nodes.len(),
        doc.edges.len()
    );
    debug!(
        "{} nodes set their own level, {} edges point at unknown ids",
        doc.explicit_levels(),
        doc.dangling_edges()
    );
    Ok(doc)
}

/// Produce the final page for `options` without writing it.
///
/// # Errors
/// Returns the first stage failure.
pub fn build_html(options: &GenerateOptions, settings: &Settings) -> Result<String> {
    let loader = Loader::new(settings.fetch_timeout);
    let doc = read_flow(&options.input, &loader)?;

    let library = Library::resolve(
        options.render.cdn,
        &settings.cdn_url,
        &settings.library_path,
        &loader,
    )?;
    debug!(
        "vis-network is {}",
        if library.is_cdn() { "referenced" } else { "inlined" }
    );
    if !options.render.minify {
        return render::render(&doc, &options.render, &library);
    }

    // The data stays out of the minifier and is spliced into the result.
    let skeleton = render::render_skeleton(&options.render, &library)?;
    verbose!("Minifying {} bytes", skeleton.len());
    let minified = render::minify_isolated(HtmlMinifier, skeleton, settings.minify_timeout)?;
    render::fill_slots(&minified, &doc)
}

/// Generate the diagram described by `options` and write it to disk.
///
/// # Errors
/// Returns the first stage failure; the output file is untouched then.
pub fn generate(options: &GenerateOptions, settings: &Settings) -> Result<()> {
    let html = build_html(options, settings)?;
    writer::write(&options.output, &html)?;
    verbose!("Diagram written to {}", options.output.display());
    Ok(())
}
